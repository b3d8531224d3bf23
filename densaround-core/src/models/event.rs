use std::cmp::Ordering;
use std::fmt::{self, Display};

use crate::errors::DensityError;

///
/// Event struct, a point or span on the coordinate axis whose distance to
/// objects is being measured. A point is a span with `start == end`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub start: i64,
    pub end: i64,
}

impl Event {
    ///
    /// Create a new event, checking that `end >= start`.
    ///
    pub fn new(start: i64, end: i64) -> Result<Self, DensityError> {
        if end < start {
            return Err(DensityError::InvalidEvent { start, end });
        }
        Ok(Event { start, end })
    }

    /// A single-coordinate event.
    pub fn point(position: i64) -> Self {
        Event {
            start: position,
            end: position,
        }
    }

    ///
    /// Length of the event span (`end - start`), zero for points. Exact over
    /// the whole coordinate range.
    ///
    pub fn length(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Check if the event touches `[start, end]`, bounds inclusive.
    #[inline]
    pub fn intersects(&self, start: i64, end: i64) -> bool {
        self.start <= end && self.end >= start
    }
}

impl TryFrom<(i64, i64)> for Event {
    type Error = DensityError;

    fn try_from(value: (i64, i64)) -> Result<Self, Self::Error> {
        Event::new(value.0, value.1)
    }
}

impl Ord for Event {
    #[inline]
    fn cmp(&self, other: &Event) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl PartialOrd for Event {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}
