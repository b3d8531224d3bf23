use std::fmt::{self, Display};

use crate::errors::DensityError;

///
/// Object struct, an interval `[start, end]` around which event density is
/// measured. Objects always satisfy `0 < start <= end`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    pub start: i64,
    pub end: i64,
}

impl Object {
    pub fn new(start: i64, end: i64) -> Result<Self, DensityError> {
        if start <= 0 || start > end {
            return Err(DensityError::InvalidObject { start, end });
        }
        Ok(Object { start, end })
    }

    ///
    /// Get the width of the object
    ///
    pub fn width(&self) -> i64 {
        self.end - self.start
    }
}

impl TryFrom<(i64, i64)> for Object {
    type Error = DensityError;

    fn try_from(value: (i64, i64)) -> Result<Self, Self::Error> {
        Object::new(value.0, value.1)
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}
