//! Occupancy denominators.
//!
//! When objects are confined to a region, bins far from an object may reach
//! past the region edge and could never hold an event. Each in-region object
//! therefore adds, per bin, the fraction of that bin that is observable on
//! each side. Dividing raw counts by these totals gives event density.

use serde::Serialize;

use densaround_core::models::{Object, Region};

use crate::errors::HistogramError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenominatorAccumulator {
    bin_size: i64,
    left: Vec<f64>,
    right: Vec<f64>,
    overflow_left: u64,
    overflow_right: u64,
    object_overlap: f64,
    objects: u64,
}

///
/// Spread one unit of occupancy over `bins` for a side with `remaining`
/// distance to the region edge.
///
/// Bins fully inside the remaining distance get `1.0`, the bin the edge falls
/// in gets the covered fraction. If the edge lies past the last bin, only
/// `overflow` is bumped: every bin is fully covered.
///
fn spread_occupancy(bins: &mut [f64], overflow: &mut u64, remaining: u64, bin_size: u64) {
    let last_bin = match usize::try_from(remaining / bin_size) {
        Ok(bin) if bin < bins.len() => bin,
        _ => {
            *overflow += 1;
            return;
        }
    };

    for bin in &mut bins[..last_bin] {
        *bin += 1.0;
    }
    bins[last_bin] += (remaining % bin_size) as f64 / bin_size as f64;
}

impl DenominatorAccumulator {
    pub fn new(num_of_bins: usize, bin_size: i64) -> Self {
        DenominatorAccumulator {
            bin_size,
            left: vec![0.0; num_of_bins],
            right: vec![0.0; num_of_bins],
            overflow_left: 0,
            overflow_right: 0,
            object_overlap: 0.0,
            objects: 0,
        }
    }

    /// Occupancy for the left side, `remaining = object.start - region.start`.
    pub fn add_left(&mut self, remaining: u64) {
        spread_occupancy(
            &mut self.left,
            &mut self.overflow_left,
            remaining,
            self.bin_size as u64,
        );
    }

    /// Occupancy for the right side, `remaining = region.end - object.end`.
    pub fn add_right(&mut self, remaining: u64) {
        spread_occupancy(
            &mut self.right,
            &mut self.overflow_right,
            remaining,
            self.bin_size as u64,
        );
    }

    ///
    /// Record an object lying inside `region`: both sides plus the overlap
    /// bucket, which grows by the object width and `overlap_correction`.
    ///
    pub fn add_object(&mut self, object: &Object, region: &Region, overlap_correction: f64) {
        self.object_overlap += object.width() as f64 + overlap_correction;
        self.add_left(object.start.abs_diff(region.start));
        self.add_right(region.end.abs_diff(object.end));
        self.objects += 1;
    }

    pub fn num_of_bins(&self) -> usize {
        self.left.len()
    }

    /// Number of objects that contributed.
    pub fn objects(&self) -> u64 {
        self.objects
    }

    pub fn overflow_left(&self) -> u64 {
        self.overflow_left
    }

    pub fn overflow_right(&self) -> u64 {
        self.overflow_right
    }

    pub fn object_overlap(&self) -> f64 {
        self.object_overlap
    }

    /// Partial contributions on the left, without the overflow tally.
    pub fn left_partial(&self) -> &[f64] {
        &self.left
    }

    pub fn right_partial(&self) -> &[f64] {
        &self.right
    }

    /// Total occupancy of each left bin (`partial + overflow`).
    pub fn left_occupancy(&self) -> Vec<f64> {
        let overflow = self.overflow_left as f64;
        self.left.iter().map(|v| v + overflow).collect()
    }

    /// Total occupancy of each right bin (`partial + overflow`).
    pub fn right_occupancy(&self) -> Vec<f64> {
        let overflow = self.overflow_right as f64;
        self.right.iter().map(|v| v + overflow).collect()
    }

    pub fn merge(&mut self, other: &DenominatorAccumulator) -> Result<(), HistogramError> {
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
        self.overflow_left += other.overflow_left;
        self.overflow_right += other.overflow_right;
        self.object_overlap += other.object_overlap;
        self.objects += other.objects;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(0, vec![0.0, 0.0, 0.0], 0)]
    #[case(5, vec![0.5, 0.0, 0.0], 0)]
    #[case(10, vec![1.0, 0.0, 0.0], 0)]
    #[case(25, vec![1.0, 1.0, 0.5], 0)]
    #[case(29, vec![1.0, 1.0, 0.9], 0)]
    #[case(30, vec![0.0, 0.0, 0.0], 1)]
    #[case(1000, vec![0.0, 0.0, 0.0], 1)]
    fn test_spread_occupancy(
        #[case] remaining: u64,
        #[case] expected: Vec<f64>,
        #[case] expected_overflow: u64,
    ) {
        let mut denom = DenominatorAccumulator::new(3, 10);
        denom.add_left(remaining);
        assert_eq!(denom.left_partial(), expected.as_slice());
        assert_eq!(denom.overflow_left(), expected_overflow);
        assert_eq!(denom.right_partial(), &[0.0, 0.0, 0.0]);
    }

    #[rstest]
    fn test_each_bin_is_covered_at_most_once_per_object() {
        for remaining in 0..100 {
            let mut denom = DenominatorAccumulator::new(4, 7);
            denom.add_right(remaining);
            let occupancy = denom.right_occupancy();
            assert!(occupancy.iter().all(|&v| (0.0..=1.0).contains(&v)));
            // observable distance, capped at the tracked window
            let covered: f64 = occupancy.iter().sum::<f64>() * 7.0;
            assert!((covered - remaining.min(28) as f64).abs() < 1e-9);
        }
    }

    #[rstest]
    fn test_add_object() {
        let region = Region::new(100, 200).unwrap();
        let object = Object::new(120, 150).unwrap();

        let mut denom = DenominatorAccumulator::new(3, 10);
        denom.add_object(&object, &region, 0.0);

        // 20 to the left, 50 to the right
        assert_eq!(denom.left_occupancy(), vec![1.0, 1.0, 0.0]);
        assert_eq!(denom.right_occupancy(), vec![1.0, 1.0, 1.0]);
        assert_eq!(denom.overflow_right(), 1);
        assert_eq!(denom.object_overlap(), 30.0);
        assert_eq!(denom.objects(), 1);
    }

    #[rstest]
    fn test_add_object_in_unbounded_region() {
        let region = Region::new(i64::MIN, i64::MAX).unwrap();
        let object = Object::new(1, i64::MAX).unwrap();

        let mut denom = DenominatorAccumulator::new(3, 10);
        denom.add_object(&object, &region, 0.0);

        assert_eq!(denom.overflow_left(), 1);
        assert_eq!(denom.left_partial(), &[0.0, 0.0, 0.0]);
        // nothing observable to the right of an object ending on the region end
        assert_eq!(denom.right_occupancy(), vec![0.0, 0.0, 0.0]);
    }

    #[rstest]
    fn test_merge() {
        let mut a = DenominatorAccumulator::new(2, 10);
        a.add_left(15);
        let mut b = DenominatorAccumulator::new(2, 10);
        b.add_left(100);
        a.merge(&b).unwrap();
        assert_eq!(a.left_occupancy(), vec![2.0, 1.5]);
        assert!(a.merge(&DenominatorAccumulator::new(3, 10)).is_err());
    }
}
