//! Line-oriented `start,end` record reading.
//!
//! Every input stream (events and objects) uses the same format: two integer
//! fields per line separated by a comma or a tab. Lines starting with `#` and
//! whitespace-only lines are skipped. The first data line may fail to parse,
//! in which case it is taken as a column header and dropped; any later bad
//! line is an error naming the source and line number.
//!
//! When events and objects share standard input, the event segment ends at
//! two consecutive empty lines (see [`RecordReader::until_blank_pair`]).

use std::io::BufRead;
use std::marker::PhantomData;

use log::debug;

use crate::errors::DensityError;

/// Split a record line into its two integer fields.
pub fn parse_record(line: &str) -> Result<(i64, i64), DensityError> {
    let (start, end) = line
        .split_once(',')
        .or_else(|| line.split_once('\t'))
        .ok_or_else(|| DensityError::RecordParseError("missing field separator".to_string()))?;

    let start = start
        .trim()
        .parse::<i64>()
        .map_err(|e| DensityError::RecordParseError(format!("start '{}': {}", start.trim(), e)))?;
    let end = end
        .trim()
        .parse::<i64>()
        .map_err(|e| DensityError::RecordParseError(format!("end '{}': {}", end.trim(), e)))?;

    Ok((start, end))
}

///
/// Iterator over validated records of type `T` read from a buffered stream.
///
/// `T` decides what a valid record is (an [`Event`](crate::models::Event)
/// needs `end >= start`, an [`Object`](crate::models::Object) additionally
/// needs `start > 0`). Records failing validation are treated exactly like
/// unparsable lines.
///
pub struct RecordReader<R, T> {
    reader: R,
    source: String,
    line_num: u64,
    buf: Vec<u8>,
    seen_data: bool,
    seen_header: bool,
    stop_at_blank_pair: bool,
    previous_blank: bool,
    finished: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<R, T> RecordReader<R, T>
where
    R: BufRead,
    T: TryFrom<(i64, i64), Error = DensityError>,
{
    ///
    /// Create a new reader.
    ///
    /// # Arguments
    /// - reader: the stream to read lines from
    /// - source: name of the stream used in error messages (usually its path)
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        RecordReader {
            reader,
            source: source.into(),
            line_num: 0,
            buf: Vec::new(),
            seen_data: false,
            seen_header: false,
            stop_at_blank_pair: false,
            previous_blank: false,
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Stop reading at two consecutive empty lines, leaving the rest of the
    /// stream unread for the next consumer.
    pub fn until_blank_pair(mut self) -> Self {
        self.stop_at_blank_pair = true;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    ///
    /// Handle a line that is not a valid record: the first one before any
    /// data is dropped as a header, any other ends the stream with an error.
    ///
    fn reject_line(&mut self, reason: DensityError) -> Option<DensityError> {
        if !self.seen_data && !self.seen_header {
            debug!(
                "Skipping header line {} in {}: {}",
                self.line_num, self.source, reason
            );
            self.seen_header = true;
            return None;
        }

        self.finished = true;
        Some(DensityError::MalformedRecord {
            path: self.source.clone(),
            line: self.line_num,
            reason: reason.to_string(),
        })
    }
}

impl<R, T> Iterator for RecordReader<R, T>
where
    R: BufRead,
    T: TryFrom<(i64, i64), Error = DensityError>,
{
    type Item = Result<T, DensityError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => self.line_num += 1,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }

            let line = match std::str::from_utf8(&self.buf) {
                Ok(text) => text.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    self.previous_blank = false;
                    let reason = DensityError::RecordParseError(format!("invalid UTF-8: {}", e));
                    match self.reject_line(reason) {
                        Some(err) => return Some(Err(err)),
                        None => continue,
                    }
                }
            };

            if line.is_empty() {
                if self.stop_at_blank_pair && self.previous_blank {
                    self.finished = true;
                    return None;
                }
                self.previous_blank = true;
                continue;
            }
            self.previous_blank = false;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_record(line).and_then(T::try_from) {
                Ok(record) => {
                    self.seen_data = true;
                    return Some(Ok(record));
                }
                Err(e) => {
                    if let Some(err) = self.reject_line(e) {
                        return Some(Err(err));
                    }
                }
            }
        }

        None
    }
}
