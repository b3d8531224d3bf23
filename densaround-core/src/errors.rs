use thiserror::Error;

#[derive(Error, Debug)]
pub enum DensityError {
    #[error("Cannot open file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error on line: {line} file: {path} ({reason})")]
    MalformedRecord {
        path: String,
        line: u64,
        reason: String,
    },

    #[error("Invalid event: end {end} is before start {start}")]
    InvalidEvent { start: i64, end: i64 },

    #[error("Invalid object: expected 0 < start <= end, got [{start}, {end}]")]
    InvalidObject { start: i64, end: i64 },

    #[error("Invalid region: region start must be less than the region end ({start} >= {end})")]
    InvalidRegion { start: i64, end: i64 },

    #[error("Error parsing record: {0}")]
    RecordParseError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
