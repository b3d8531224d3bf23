use serde::Serialize;

use crate::bins::BinAccumulator;
use crate::config::HistogramConfig;
use crate::denominator::DenominatorAccumulator;
use crate::sweep::SweepStats;

/// Position of a row in the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOffset {
    Left(usize),
    Overlap,
    Right(usize),
}

impl BinOffset {
    ///
    /// Signed bin midpoint: `-(i + 0.5) * bin_size` on the left,
    /// `(i + 0.5) * bin_size` on the right and `0` for the overlap bucket.
    ///
    pub fn distance(&self, bin_size: i64) -> f64 {
        match *self {
            BinOffset::Left(i) => -(i as f64 + 0.5) * bin_size as f64,
            BinOffset::Overlap => 0.0,
            BinOffset::Right(i) => (i as f64 + 0.5) * bin_size as f64,
        }
    }
}

/// One output row: a bin, its raw count and, with a region, its occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramRow {
    pub offset: BinOffset,
    pub distance: f64,
    pub count: u64,
    pub occupancy: Option<f64>,
}

///
/// The finished result of a run: counts, optional denominators and run stats.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityHistogram {
    pub config: HistogramConfig,
    pub bins: BinAccumulator,
    pub denominator: Option<DenominatorAccumulator>,
    pub stats: SweepStats,
    pub events: usize,
    pub mean_event_length: f64,
}

impl DensityHistogram {
    ///
    /// Rows from the leftmost bin to the rightmost, with the overlap bucket
    /// between the two halves.
    ///
    pub fn rows(&self) -> Vec<HistogramRow> {
        let bin_size = self.config.bin_size();
        let num_of_bins = self.bins.num_of_bins();

        let (left_occupancy, right_occupancy) = match &self.denominator {
            Some(d) => (Some(d.left_occupancy()), Some(d.right_occupancy())),
            None => (None, None),
        };

        let mut rows = Vec::with_capacity(2 * num_of_bins + 1);

        for i in (0..num_of_bins).rev() {
            let offset = BinOffset::Left(i);
            rows.push(HistogramRow {
                offset,
                distance: offset.distance(bin_size),
                count: self.bins.left()[i],
                occupancy: left_occupancy.as_ref().map(|o| o[i]),
            });
        }

        rows.push(HistogramRow {
            offset: BinOffset::Overlap,
            distance: 0.0,
            count: self.bins.overlap(),
            occupancy: self.denominator.as_ref().map(|d| d.object_overlap()),
        });

        for i in 0..num_of_bins {
            let offset = BinOffset::Right(i);
            rows.push(HistogramRow {
                offset,
                distance: offset.distance(bin_size),
                count: self.bins.right()[i],
                occupancy: right_occupancy.as_ref().map(|o| o[i]),
            });
        }

        rows
    }

    pub fn has_denominator(&self) -> bool {
        self.denominator.is_some()
    }
}
