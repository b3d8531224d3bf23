use thiserror::Error;

use densaround_core::DensityError;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("Invalid <bin_size>: {0} (must be a positive integer)")]
    InvalidBinSize(i64),

    #[error("Invalid <num_of_bins>: {0} (must be a positive integer)")]
    InvalidNumOfBins(usize),

    #[error("bin_size * num_of_bins overflows the coordinate range")]
    WindowOverflow,

    #[error("Missing configuration value: {0}")]
    MissingValue(&'static str),

    #[error("Not enough memory to read in events ({0} loaded)")]
    OutOfMemory(usize),

    #[error("Cannot merge accumulators with {0} and {1} bins")]
    BinCountMismatch(usize, usize),

    #[error(transparent)]
    Record(#[from] DensityError),
}
