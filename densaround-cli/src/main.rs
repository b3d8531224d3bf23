mod density;

use anyhow::Result;
use clap::Command;
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "densaround";
}

fn build_parser() -> Command {
    density::cli::create_density_cli()
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // also captures `log` records from the library crates
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_flag("verbose"));

    density::handlers::run_density(&matches)
}
