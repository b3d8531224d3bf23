//! Density of events around objects.
//!
//! This crate is the binning engine of densaround. Given events (points or
//! spans) and objects (intervals) on one integer axis, it counts how many
//! events fall at each distance bin to the left and right of every object,
//! and how many overlap an object. With a region configured it also builds
//! the occupancy denominators needed to turn counts into densities.
//!
//! - [`EventStore`]: every event, loaded once and sorted by start
//! - [`BoundaryLocator`]: lower-bound lookup seeding each object's scan
//! - [`ObjectSweeper`]: the per-object left / overlap / right sweep
//! - [`BinAccumulator`] and [`DenominatorAccumulator`]: the running totals
//!
//! # Example
//!
//! ```
//! use densaround_core::models::{Event, Object};
//! use densaround_histogram::{EventStore, HistogramConfig, ObjectSweeper};
//!
//! let config = HistogramConfig::new(10, 3).unwrap();
//! let events: EventStore = [5, 25, 55].into_iter().map(Event::point).collect();
//!
//! let mut sweeper = ObjectSweeper::new(config, &events);
//! sweeper.sweep_object(&Object::new(50, 50).unwrap());
//!
//! let histogram = sweeper.finish();
//! assert_eq!(histogram.bins.left(), &[0, 0, 1]);
//! assert_eq!(histogram.bins.right(), &[1, 0, 0]);
//! ```

pub mod bins;
pub mod config;
pub mod denominator;
pub mod errors;
pub mod event_store;
pub mod histogram;
pub mod locator;
pub mod sweep;

// re-exports
pub use bins::BinAccumulator;
pub use config::{HistogramConfig, HistogramConfigBuilder};
pub use denominator::DenominatorAccumulator;
pub use errors::HistogramError;
pub use event_store::EventStore;
pub use histogram::{BinOffset, DensityHistogram, HistogramRow};
pub use locator::BoundaryLocator;
pub use sweep::{ObjectSweeper, SweepStats};
