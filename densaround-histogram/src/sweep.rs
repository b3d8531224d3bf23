//! The per-object sweep.
//!
//! For every object the sweeper seeds a start index with a lower-bound search
//! and then walks the sorted events once, classifying each event as left of,
//! overlapping, or right of the object. The walk stops at the first right-hand
//! event beyond the last bin, so the work per object is bounded by the events
//! in its `num_of_bins * bin_size` neighbourhood.

use log::{debug, warn};
use serde::Serialize;

use densaround_core::DensityError;
use densaround_core::models::{Object, Placement};

use crate::bins::BinAccumulator;
use crate::config::HistogramConfig;
use crate::denominator::DenominatorAccumulator;
use crate::errors::HistogramError;
use crate::event_store::EventStore;
use crate::histogram::DensityHistogram;
use crate::locator::BoundaryLocator;

/// Bookkeeping about the objects seen during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    /// Objects swept.
    pub objects: u64,
    /// Objects left out of the denominator because they leave the region.
    pub objects_outside_region: u64,
    /// Objects starting before the previous object's start.
    pub objects_out_of_order: u64,
}

pub struct ObjectSweeper<'a> {
    config: HistogramConfig,
    events: &'a EventStore,
    bins: BinAccumulator,
    denominator: Option<DenominatorAccumulator>,
    overlap_correction: f64,
    previous_start: Option<i64>,
    stats: SweepStats,
}

impl<'a> ObjectSweeper<'a> {
    ///
    /// Create a sweeper over a loaded event store. The denominator is only
    /// accumulated when `config` carries a region.
    ///
    pub fn new(config: HistogramConfig, events: &'a EventStore) -> Self {
        let denominator = config
            .region()
            .map(|_| DenominatorAccumulator::new(config.num_of_bins(), config.bin_size()));

        // interval events can touch an object from up to one event length away
        let overlap_correction = if events.is_point_store() {
            0.0
        } else {
            2.0 * (events.mean_length() - 1.0)
        };

        ObjectSweeper {
            config,
            events,
            bins: BinAccumulator::new(config.num_of_bins()),
            denominator,
            overlap_correction,
            previous_start: None,
            stats: SweepStats::default(),
        }
    }

    ///
    /// Index of the first event that can land in a bin of `object`.
    ///
    /// Every event before it ends more than `bin_size * num_of_bins` before
    /// the object starts, so skipping them never changes the counts.
    ///
    pub fn seed_index(&self, object: &Object) -> usize {
        let boundary = object
            .start
            .saturating_sub(self.config.window())
            .saturating_sub_unsigned(self.events.max_span());

        match self.events.first() {
            None => 0,
            Some(first) if first.start >= boundary => 0,
            Some(_) => self.events.lower_bound(boundary),
        }
    }

    /// Sweep one object, starting from the seeded index.
    pub fn sweep_object(&mut self, object: &Object) {
        let first = self.seed_index(object);
        debug!("Object {} seeded at event {}", object, first);
        self.sweep_from(object, first);
    }

    /// Sweep one object scanning every event from index 0.
    pub fn sweep_object_linear(&mut self, object: &Object) {
        self.sweep_from(object, 0);
    }

    fn sweep_from(&mut self, object: &Object, first: usize) {
        self.track_order(object);
        self.update_denominator(object);

        let config = self.config;
        let events = self.events;

        for event in &events.as_slice()[first.min(events.len())..] {
            if event.intersects(object.start, object.end) {
                self.bins.add_overlap();
            } else if event.end < object.start {
                if let Some(bin) = config.bin_of(object.start.abs_diff(event.end)) {
                    self.bins.add_left(bin);
                }
            } else {
                match config.bin_of(event.start.abs_diff(object.end)) {
                    Some(bin) => self.bins.add_right(bin),
                    // sorted by start: every later event is farther away
                    None => break,
                }
            }
        }

        self.stats.objects += 1;
    }

    fn track_order(&mut self, object: &Object) {
        if let Some(previous) = self.previous_start {
            if object.start < previous {
                if self.stats.objects_out_of_order == 0 {
                    warn!(
                        "Objects are not sorted by start ({} after {}), expect slower processing",
                        object.start, previous
                    );
                }
                self.stats.objects_out_of_order += 1;
            }
        }
        self.previous_start = Some(object.start);
    }

    fn update_denominator(&mut self, object: &Object) {
        let (Some(denominator), Some(region)) = (self.denominator.as_mut(), self.config.region())
        else {
            return;
        };

        match region.placement(object) {
            Placement::Inside => {
                denominator.add_object(object, &region, self.overlap_correction);
            }
            Placement::StartsBefore => {
                warn!(
                    "object starts before region ({} < {})",
                    object.start, region.start
                );
                self.stats.objects_outside_region += 1;
            }
            Placement::EndsAfter => {
                warn!("object ends after region ({} > {})", object.end, region.end);
                self.stats.objects_outside_region += 1;
            }
        }
    }

    ///
    /// Sweep every object of a record stream, stopping at the first error.
    ///
    pub fn sweep_all<I>(&mut self, objects: I) -> Result<(), HistogramError>
    where
        I: IntoIterator<Item = Result<Object, DensityError>>,
    {
        for object in objects {
            self.sweep_object(&object?);
        }
        Ok(())
    }

    pub fn bins(&self) -> &BinAccumulator {
        &self.bins
    }

    pub fn denominator(&self) -> Option<&DenominatorAccumulator> {
        self.denominator.as_ref()
    }

    pub fn stats(&self) -> &SweepStats {
        &self.stats
    }

    /// Consume the sweeper and hand back the finished histogram.
    pub fn finish(self) -> DensityHistogram {
        DensityHistogram {
            config: self.config,
            bins: self.bins,
            denominator: self.denominator,
            stats: self.stats,
            events: self.events.len(),
            mean_event_length: self.events.mean_length(),
        }
    }
}
