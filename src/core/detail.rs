//! # Detail Fetcher
//!
//! Holds one record keyed by identifier: either not yet available or
//! loaded. Mounting with a new identifier issues exactly one fetch; mounting
//! again with the same identifier while loaded or loading issues none.

use log::warn;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailTicket<I> {
    pub id: I,
    pub generation: u64,
}

pub struct DetailFetcher<I, T> {
    id: Option<I>,
    record: Option<T>,
    generation: u64,
    in_flight: bool,
}

impl<I, T> Default for DetailFetcher<I, T> {
    fn default() -> Self {
        Self {
            id: None,
            record: None,
            generation: 0,
            in_flight: false,
        }
    }
}

impl<I, T> DetailFetcher<I, T>
where
    I: Clone + PartialEq + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the fetcher at `id`. Returns a ticket when a fetch is needed.
    pub fn mount(&mut self, id: I) -> Option<DetailTicket<I>> {
        if self.id.as_ref() == Some(&id) && (self.record.is_some() || self.in_flight) {
            return None;
        }
        self.id = Some(id.clone());
        self.record = None;
        self.generation += 1;
        self.in_flight = true;
        Some(DetailTicket {
            id,
            generation: self.generation,
        })
    }

    /// Forget the current record. Outstanding tickets become stale.
    pub fn unmount(&mut self) {
        self.id = None;
        self.record = None;
        self.in_flight = false;
        self.generation += 1;
    }

    /// Settle a fetch. Failures keep the placeholder and are only logged.
    /// Returns `false` for stale tickets.
    pub fn resolve<E: fmt::Display>(
        &mut self,
        ticket: &DetailTicket<I>,
        result: Result<T, E>,
    ) -> bool {
        if ticket.generation != self.generation || self.id.as_ref() != Some(&ticket.id) {
            return false;
        }
        self.in_flight = false;
        match result {
            Ok(record) => self.record = Some(record),
            Err(e) => warn!("Failed to fetch details for {:?}: {}", ticket.id, e),
        }
        true
    }

    pub fn id(&self) -> Option<&I> {
        self.id.as_ref()
    }

    pub fn get(&self) -> Option<&T> {
        self.record.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }
}
