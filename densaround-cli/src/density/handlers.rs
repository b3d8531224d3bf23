use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;

use densaround_core::consts::STDIN_PATH;
use densaround_core::models::{Event, Object};
use densaround_core::records::RecordReader;
use densaround_core::utils::{get_dynamic_reader_w_stdin, is_stdin};
use densaround_histogram::{DensityHistogram, EventStore, HistogramConfig, ObjectSweeper, SweepStats};
use densaround_io::{HistogramWrite, OutputFile, StagedOutput, persist_all};

#[derive(Serialize)]
struct RunSummary<'a> {
    config: &'a HistogramConfig,
    events: usize,
    mean_event_length: f64,
    stats: &'a SweepStats,
    events_binned_left: u64,
    events_binned_right: u64,
    events_overlapping_objects: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    objects_in_region: Option<u64>,
}

impl<'a> From<&'a DensityHistogram> for RunSummary<'a> {
    fn from(histogram: &'a DensityHistogram) -> Self {
        RunSummary {
            config: &histogram.config,
            events: histogram.events,
            mean_event_length: histogram.mean_event_length,
            stats: &histogram.stats,
            events_binned_left: histogram.bins.left().iter().sum(),
            events_binned_right: histogram.bins.right().iter().sum(),
            events_overlapping_objects: histogram.bins.overlap(),
            objects_in_region: histogram.denominator.as_ref().map(|d| d.objects()),
        }
    }
}

fn build_config(matches: &ArgMatches) -> Result<HistogramConfig> {
    let bin_size = *matches
        .get_one::<i64>("bin_size")
        .expect("<bin_size> is required");
    let num_of_bins = *matches
        .get_one::<usize>("num_of_bins")
        .expect("<num_of_bins> is required");

    let mut builder = HistogramConfig::builder()
        .with_bin_size(bin_size)
        .with_num_of_bins(num_of_bins);

    if let Some(region) = matches.get_many::<i64>("density") {
        let region: Vec<i64> = region.copied().collect();
        builder = builder.with_region(region[0], region[1]);
    }

    builder.finish().context("Invalid arguments")
}

fn progress_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")
            .unwrap()
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Processing objects...");
    spinner
}

fn sweep_objects<R: BufRead>(
    config: HistogramConfig,
    events: &EventStore,
    objects: RecordReader<R, Object>,
    spinner: &ProgressBar,
) -> Result<DensityHistogram> {
    let source = objects.source().to_string();
    let mut sweeper = ObjectSweeper::new(config, events);

    let mut processed: u64 = 0;
    let objects = objects.inspect(|_| {
        processed += 1;
        if processed % 10_000 == 0 {
            spinner.set_message(format!("Processed {} objects", processed));
        }
        spinner.inc(1);
    });

    sweeper
        .sweep_all(objects)
        .with_context(|| format!("Failed to read objects from {}", source))?;

    Ok(sweeper.finish())
}

fn stage_summary(histogram: &DensityHistogram, path: &str) -> Result<StagedOutput> {
    let json = serde_json::to_string_pretty(&RunSummary::from(histogram))
        .context("Failed to serialize run summary to JSON")?;

    let mut out = OutputFile::create(path)
        .with_context(|| format!("Failed to create summary file: {}", path))?;
    writeln!(out, "{}", json)?;

    Ok(out.stage()?)
}

pub fn run_density(matches: &ArgMatches) -> Result<()> {
    let config = build_config(matches)?;

    let objects_path = matches
        .get_one::<String>("objects")
        .expect("<objects> is required");
    let events_path = matches
        .get_one::<String>("events")
        .expect("<events> is required");
    let output_path = matches
        .get_one::<String>("output")
        .expect("<output> is required");
    let density_out = matches.get_one::<String>("density-out");
    let summary_path = matches.get_one::<String>("summary");
    let spinner = progress_spinner(!matches.get_flag("no-progress"));

    // events and objects interleaved on stdin share one reader
    let shared_stdin = is_stdin(objects_path) && is_stdin(events_path);

    let mut stdin_reader = None;
    let mut objects_reader = None;
    if shared_stdin {
        stdin_reader = Some(get_dynamic_reader_w_stdin(STDIN_PATH).context("Cannot read stdin")?);
    } else {
        // open both inputs before the long event load so a bad path fails fast
        objects_reader = Some(
            get_dynamic_reader_w_stdin(objects_path)
                .with_context(|| format!("Cannot open objects file '{}'", objects_path))?,
        );
    }

    //
    // Load all events
    //
    let events = match stdin_reader.as_mut() {
        Some(reader) => {
            EventStore::from_records(RecordReader::<_, Event>::new(reader, STDIN_PATH).until_blank_pair())
        }
        None => {
            let reader = get_dynamic_reader_w_stdin(events_path)
                .with_context(|| format!("Cannot open events file '{}'", events_path))?;
            EventStore::from_records(RecordReader::<_, Event>::new(reader, events_path.as_str()))
        }
    }
    .context("Failed to load events")?;

    //
    // Read objects one at a time
    //
    let histogram = match (stdin_reader.as_mut(), objects_reader) {
        (Some(reader), _) => {
            sweep_objects(config, &events, RecordReader::new(reader, STDIN_PATH), &spinner)?
        }
        (None, Some(reader)) => sweep_objects(
            config,
            &events,
            RecordReader::new(reader, objects_path.as_str()),
            &spinner,
        )?,
        (None, None) => unreachable!("objects reader not opened"),
    };
    spinner.finish_and_clear();

    info!(
        "Processed {} objects ({} overlapping events)",
        histogram.stats.objects,
        histogram.bins.overlap()
    );

    // nothing lands on disk until every output is written
    let mut staged = histogram
        .stage_csv(output_path, density_out.map(String::as_str))
        .with_context(|| format!("Failed to write output: {}", output_path))?;

    if let Some(path) = summary_path {
        staged.push(stage_summary(&histogram, path)?);
    }

    persist_all(staged).context("Failed to save output")?;

    Ok(())
}
