//! Core models and readers for densaround.
//!
//! This crate holds the types shared by every other densaround crate:
//!
//! - [`models::Event`], [`models::Object`] and [`models::Region`]
//! - [`records::RecordReader`], which turns `start,end` lines into validated records
//! - [`utils::get_dynamic_reader`] and friends for plain, gzipped or stdin input
//!
//! # Example
//!
//! ```no_run
//! use densaround_core::models::Event;
//! use densaround_core::records::RecordReader;
//! use densaround_core::utils::get_dynamic_reader_w_stdin;
//!
//! let reader = get_dynamic_reader_w_stdin("events.csv.gz").unwrap();
//! let events: Vec<Event> = RecordReader::new(reader, "events.csv.gz")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! ```

pub mod consts;
pub mod errors;
pub mod models;
pub mod records;
pub mod utils;

// re-exports
pub use errors::DensityError;
