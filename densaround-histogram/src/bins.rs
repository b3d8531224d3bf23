use serde::Serialize;

use crate::errors::HistogramError;

///
/// Raw event counts per distance bin on each side of the objects, plus the
/// number of events overlapping an object.
///
/// `left[i]` counts events whose gap to an object's start lies in
/// `[i * bin_size, (i + 1) * bin_size)`, on the low-coordinate side;
/// `right[i]` is the same on the high-coordinate side of the object's end.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinAccumulator {
    left: Vec<u64>,
    right: Vec<u64>,
    overlap: u64,
}

impl BinAccumulator {
    pub fn new(num_of_bins: usize) -> Self {
        BinAccumulator {
            left: vec![0; num_of_bins],
            right: vec![0; num_of_bins],
            overlap: 0,
        }
    }

    pub fn num_of_bins(&self) -> usize {
        self.left.len()
    }

    /// Count one event in left bin `bin`; out of range bins are ignored.
    #[inline]
    pub fn add_left(&mut self, bin: usize) {
        if let Some(count) = self.left.get_mut(bin) {
            *count += 1;
        }
    }

    /// Count one event in right bin `bin`; out of range bins are ignored.
    #[inline]
    pub fn add_right(&mut self, bin: usize) {
        if let Some(count) = self.right.get_mut(bin) {
            *count += 1;
        }
    }

    #[inline]
    pub fn add_overlap(&mut self) {
        self.overlap += 1;
    }

    pub fn left(&self) -> &[u64] {
        &self.left
    }

    pub fn right(&self) -> &[u64] {
        &self.right
    }

    pub fn overlap(&self) -> u64 {
        self.overlap
    }

    /// Every event counted so far, binned or overlapping.
    pub fn total(&self) -> u64 {
        self.left.iter().sum::<u64>() + self.right.iter().sum::<u64>() + self.overlap
    }

    ///
    /// Add the counts of another accumulator with the same number of bins.
    ///
    pub fn merge(&mut self, other: &BinAccumulator) -> Result<(), HistogramError> {
        if self.num_of_bins() != other.num_of_bins() {
            return Err(HistogramError::BinCountMismatch(
                self.num_of_bins(),
                other.num_of_bins(),
            ));
        }

        for (a, b) in self.left.iter_mut().zip(&other.left) {
            *a += b;
        }
        for (a, b) in self.right.iter_mut().zip(&other.right) {
            *a += b;
        }
        self.overlap += other.overlap;

        Ok(())
    }
}
