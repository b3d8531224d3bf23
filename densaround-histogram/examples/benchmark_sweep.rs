//! Benchmark for the seeded sweep against a full linear scan.
//!
//! Usage:
//!   cargo run -p densaround-histogram --release --example benchmark_sweep -- --scale 1000000
//!   cargo run -p densaround-histogram --release --example benchmark_sweep -- --scale 100000 --bins 50

use std::env;
use std::time::Instant;

use densaround_core::models::{Event, Object};
use densaround_histogram::{EventStore, HistogramConfig, ObjectSweeper};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

const AXIS_LENGTH: i64 = 248_956_422;

fn generate_events(n: usize, seed: u64) -> EventStore {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let start = rng.gen_range(1..AXIS_LENGTH);
            Event::point(start)
        })
        .collect()
}

fn generate_objects(n: usize, seed: u64) -> Vec<Object> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut starts: Vec<i64> = (0..n).map(|_| rng.gen_range(1..AXIS_LENGTH - 10_000)).collect();
    starts.sort_unstable();

    starts
        .into_iter()
        .map(|start| {
            // 100 to 10000 wide
            let log_len: f64 = rng.gen_range(4.6..9.2);
            let length = (log_len.exp() as i64).clamp(100, 10_000);
            Object { start, end: start + length }
        })
        .collect()
}

fn time_sweep<F: Fn(&mut ObjectSweeper, &Object)>(
    config: HistogramConfig,
    events: &EventStore,
    objects: &[Object],
    sweep: F,
) -> (f64, u64) {
    let mut sweeper = ObjectSweeper::new(config, events);
    let start = Instant::now();
    for object in objects {
        sweep(&mut sweeper, object);
    }
    let elapsed = start.elapsed().as_micros() as f64;
    (elapsed, sweeper.bins().total())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut scale: usize = 100_000;
    let mut bins: usize = 100;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scale" => {
                i += 1;
                scale = args[i].parse().expect("Invalid scale value");
            }
            "--bins" => {
                i += 1;
                bins = args[i].parse().expect("Invalid bins value");
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    eprintln!("Generating synthetic data: {} events, {} objects (seed=42,43)...", scale, scale / 10);
    let events = generate_events(scale, 42);
    let objects = generate_objects(scale / 10, 43);
    let config = HistogramConfig::new(100, bins).expect("valid config");

    let (seeded_us, seeded_total) =
        time_sweep(config, &events, &objects, |s, o| s.sweep_object(o));
    eprintln!("seeded: {:.0} us ({} events binned)", seeded_us, seeded_total);

    // the linear scan is quadratic, keep it to small inputs
    if scale <= 200_000 {
        let (linear_us, linear_total) =
            time_sweep(config, &events, &objects, |s, o| s.sweep_object_linear(o));
        eprintln!("linear: {:.0} us ({} events binned)", linear_us, linear_total);
        assert_eq!(seeded_total, linear_total);
    }
}
