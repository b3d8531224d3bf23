use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const DENSITY_CMD: &str = "densaround";

pub fn create_density_cli() -> Command {
    Command::new(DENSITY_CMD)
        .about("Histogram of density of events around objects.")
        .long_about(
            "Histogram of density of events around objects.\n\n\
             Objects and events are csv (or tsv) files, optionally gzipped, each line \
             reading 'start,end'. Use '-' to read from stdin; when both come from stdin, \
             end the events with two empty lines. Objects should be sorted by start.",
        )
        .arg(
            Arg::new("bin_size")
                .required(true)
                .value_parser(value_parser!(i64))
                .help("Width of the bins"),
        )
        .arg(
            Arg::new("num_of_bins")
                .required(true)
                .value_parser(value_parser!(usize))
                .help("Number of bins either side"),
        )
        .arg(
            Arg::new("objects")
                .required(true)
                .help("Path to objects file ('-' for stdin)"),
        )
        .arg(
            Arg::new("events")
                .required(true)
                .help("Path to events file ('-' for stdin)"),
        )
        .arg(
            Arg::new("output")
                .required(true)
                .help("Path to output csv ('-' for stdout, '.gz' to compress)"),
        )
        .arg(
            Arg::new("density")
                .long("density")
                .num_args(2)
                .value_names(["START", "END"])
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Region objects lie in; adds bin occupancy, required to calculate actual event density (e.g. '--density 1 2000000' for a chromosome)"),
        )
        .arg(
            Arg::new("density-out")
                .long("density-out")
                .value_name("PATH")
                .requires("density")
                .help("Write bin occupancy to a separate csv instead of a third column"),
        )
        .arg(
            arg!(--summary <SUMMARY>)
                .required(false)
                .help("Write a JSON summary of the run"),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .action(ArgAction::SetTrue)
                .help("Disable the progress spinner"),
        )
        .arg(
            arg!(-v --verbose)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
}
