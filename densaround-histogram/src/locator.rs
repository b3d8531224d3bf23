use densaround_core::models::Event;

use crate::event_store::EventStore;

///
/// Lower-bound lookup over events sorted by start.
///
/// `lower_bound(boundary)` returns the smallest index `i` with
/// `events[i].start >= boundary`, or the number of events when no event
/// qualifies. An empty collection always yields `0`.
///
pub trait BoundaryLocator {
    fn lower_bound(&self, boundary: i64) -> usize;
}

impl BoundaryLocator for [Event] {
    #[inline]
    fn lower_bound(&self, boundary: i64) -> usize {
        self.partition_point(|event| event.start < boundary)
    }
}

impl BoundaryLocator for EventStore {
    #[inline]
    fn lower_bound(&self, boundary: i64) -> usize {
        self.as_slice().lower_bound(boundary)
    }
}
