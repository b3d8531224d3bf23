use std::ops::Index;

use log::info;

use densaround_core::DensityError;
use densaround_core::consts::DEFAULT_EVENT_CAPACITY;
use densaround_core::models::Event;

use crate::errors::HistogramError;

///
/// EventStore struct, every loaded event sorted ascending by start (ties by end).
///
/// The store is built once, before any object is processed, and never
/// changes afterwards. Besides the events it keeps the longest event span and
/// the summed event length, which the sweep needs for seeding and for the
/// overlap correction.
///
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
    max_span: u64,
    total_length: i128,
}

impl EventStore {
    ///
    /// Build a store from already validated events, sorting them.
    ///
    pub fn from_events(mut events: Vec<Event>) -> Self {
        events.sort_unstable();

        let max_span = events.iter().map(Event::length).max().unwrap_or(0);
        let total_length = events.iter().map(|e| e.length() as i128).sum();

        EventStore {
            events,
            max_span,
            total_length,
        }
    }

    ///
    /// Load every record from a record stream, then sort once.
    ///
    /// The buffer starts at [`DEFAULT_EVENT_CAPACITY`] and doubles whenever it
    /// fills up. Running out of memory is reported as
    /// [`HistogramError::OutOfMemory`] instead of aborting.
    ///
    /// # Arguments
    /// - records: e.g. a [`RecordReader`](densaround_core::records::RecordReader) over events
    pub fn from_records<I>(records: I) -> Result<Self, HistogramError>
    where
        I: IntoIterator<Item = Result<Event, DensityError>>,
    {
        let mut events: Vec<Event> = Vec::new();
        events
            .try_reserve_exact(DEFAULT_EVENT_CAPACITY)
            .map_err(|_| HistogramError::OutOfMemory(0))?;

        for record in records {
            let event = record?;
            if events.len() == events.capacity() {
                events
                    .try_reserve_exact(events.capacity())
                    .map_err(|_| HistogramError::OutOfMemory(events.len()))?;
            }
            events.push(event);
        }

        let store = EventStore::from_events(events);
        info!("Loaded {} events", store.len());
        info!("Mean event length {:.6}", store.mean_length());

        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first(&self) -> Option<&Event> {
        self.events.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Length of the longest event (`end - start`), zero for an empty store.
    pub fn max_span(&self) -> u64 {
        self.max_span
    }

    /// Mean event length, zero for an empty store.
    pub fn mean_length(&self) -> f64 {
        if self.events.is_empty() {
            0.0
        } else {
            self.total_length as f64 / self.events.len() as f64
        }
    }

    /// True when every event is a single coordinate.
    pub fn is_point_store(&self) -> bool {
        self.max_span == 0
    }
}

impl Index<usize> for EventStore {
    type Output = Event;

    fn index(&self, index: usize) -> &Self::Output {
        &self.events[index]
    }
}

impl FromIterator<Event> for EventStore {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        EventStore::from_events(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
