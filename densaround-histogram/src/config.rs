use serde::Serialize;

use densaround_core::models::Region;

use crate::errors::HistogramError;

///
/// Run configuration shared by every stage of the histogram: bin geometry and
/// the optional region that switches on the occupancy denominator.
///
/// Use [`HistogramConfig::builder`] to construct one; the builder enforces
/// `bin_size > 0`, `num_of_bins > 0` and `region.start < region.end`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramConfig {
    bin_size: i64,
    num_of_bins: usize,
    region: Option<Region>,
}

impl HistogramConfig {
    pub fn builder() -> HistogramConfigBuilder {
        HistogramConfigBuilder::new()
    }

    /// Shorthand for a config without a region.
    pub fn new(bin_size: i64, num_of_bins: usize) -> Result<Self, HistogramError> {
        Self::builder()
            .with_bin_size(bin_size)
            .with_num_of_bins(num_of_bins)
            .finish()
    }

    pub fn bin_size(&self) -> i64 {
        self.bin_size
    }

    pub fn num_of_bins(&self) -> usize {
        self.num_of_bins
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// Total distance covered by the bins on one side: `bin_size * num_of_bins`.
    pub fn window(&self) -> i64 {
        // checked in the builder
        self.bin_size * self.num_of_bins as i64
    }

    ///
    /// Map a distance from an object boundary to its bin, or `None` when the
    /// distance falls beyond the last bin.
    ///
    /// Distance `k * bin_size` lands in bin `k`.
    ///
    #[inline]
    pub fn bin_of(&self, distance: u64) -> Option<usize> {
        // bin_size > 0 is checked in the builder
        usize::try_from(distance / self.bin_size as u64)
            .ok()
            .filter(|&bin| bin < self.num_of_bins)
    }
}

/// Builder for constructing a [`HistogramConfig`].
#[derive(Default)]
pub struct HistogramConfigBuilder {
    bin_size: Option<i64>,
    num_of_bins: Option<usize>,
    region: Option<(i64, i64)>,
}

impl HistogramConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bin_size(mut self, bin_size: i64) -> Self {
        self.bin_size = Some(bin_size);
        self
    }

    pub fn with_num_of_bins(mut self, num_of_bins: usize) -> Self {
        self.num_of_bins = Some(num_of_bins);
        self
    }

    /// Restrict objects to `[start, end]` and accumulate the denominator.
    pub fn with_region(mut self, start: i64, end: i64) -> Self {
        self.region = Some((start, end));
        self
    }

    /// Consumes the builder and validates the configuration.
    pub fn finish(self) -> Result<HistogramConfig, HistogramError> {
        let bin_size = self.bin_size.ok_or(HistogramError::MissingValue("bin_size"))?;
        let num_of_bins = self
            .num_of_bins
            .ok_or(HistogramError::MissingValue("num_of_bins"))?;

        if bin_size <= 0 {
            return Err(HistogramError::InvalidBinSize(bin_size));
        }
        if num_of_bins == 0 {
            return Err(HistogramError::InvalidNumOfBins(num_of_bins));
        }

        i64::try_from(num_of_bins)
            .ok()
            .and_then(|n| bin_size.checked_mul(n))
            .ok_or(HistogramError::WindowOverflow)?;

        let region = self
            .region
            .map(|(start, end)| Region::new(start, end))
            .transpose()?;

        Ok(HistogramConfig {
            bin_size,
            num_of_bins,
            region,
        })
    }
}
