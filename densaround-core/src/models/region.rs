use std::fmt::{self, Display};

use crate::errors::DensityError;
use crate::models::Object;

///
/// Region struct, the bounded stretch of the axis on which objects may lie.
/// It is only used to weight the occupancy denominator.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub start: i64,
    pub end: i64,
}

/// Where an object lies relative to a [Region].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Inside,
    StartsBefore,
    EndsAfter,
}

impl Region {
    pub fn new(start: i64, end: i64) -> Result<Self, DensityError> {
        if start >= end {
            return Err(DensityError::InvalidRegion { start, end });
        }
        Ok(Region { start, end })
    }

    ///
    /// Classify an object against this region. An object ending exactly on
    /// `end` is still inside.
    ///
    pub fn placement(&self, object: &Object) -> Placement {
        if object.start < self.start {
            Placement::StartsBefore
        } else if object.end > self.end {
            Placement::EndsAfter
        } else {
            Placement::Inside
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
