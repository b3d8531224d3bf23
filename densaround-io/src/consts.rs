/// Suffix that switches an output file to gzip.
pub const GZIP_SUFFIX: &str = ".gz";

/// Decimal places for distances and occupancies.
pub const FLOAT_PRECISION: usize = 6;
