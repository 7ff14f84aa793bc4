//! # Paginated List Controller
//!
//! An append-only list fed one page at a time from a source keyed by
//! `(source, page)`.
//!
//! ```text
//!   mount(source)   ─► cursor = 1, items = [], generation += 1
//!   begin_next()    ─► PageTicket { source, page: cursor, generation }
//!   complete(t, xs) ─► items += xs, cursor += 1
//!   fail(t)         ─► nothing but clearing the in-flight slot
//! ```
//!
//! At most one page is in flight. A ticket issued before a mount carries
//! an old generation and is rejected as `Stale` when it comes back, so a
//! slow response for the previous category can never leak into the new one.

use std::fmt;

/// An item with a stable identity from its source.
pub trait Keyed {
    type Key: Clone + PartialEq + fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// Permission to fetch one page. Hand it back to `complete` or `fail`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTicket<K> {
    pub source: K,
    pub page: u32,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was appended; carries the number of new items.
    Appended(usize),
    /// The source returned an empty page. No more loads until the next mount.
    Exhausted,
    /// The ticket belongs to an earlier mount or was already settled.
    Stale,
}

pub struct PaginatedList<K, T> {
    source: K,
    items: Vec<T>,
    /// Next page to request. Starts at 1.
    cursor: u32,
    generation: u64,
    in_flight: Option<u32>,
    exhausted: bool,
}

impl<K, T> PaginatedList<K, T>
where
    K: Clone + PartialEq,
    T: Keyed,
{
    pub fn new(source: K) -> Self {
        Self {
            source,
            items: Vec::new(),
            cursor: 1,
            generation: 0,
            in_flight: None,
            exhausted: false,
        }
    }

    pub fn source(&self) -> &K {
        &self.source
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Discard everything and start over at page 1 for `source`.
    /// Any ticket still outstanding becomes stale.
    pub fn mount(&mut self, source: K) {
        self.source = source;
        self.items.clear();
        self.cursor = 1;
        self.generation += 1;
        self.in_flight = None;
        self.exhausted = false;
    }

    /// Claim the next page. `None` while a page is in flight or after the
    /// source ran dry.
    pub fn begin_next(&mut self) -> Option<PageTicket<K>> {
        if self.in_flight.is_some() || self.exhausted {
            return None;
        }
        self.in_flight = Some(self.cursor);
        Some(PageTicket {
            source: self.source.clone(),
            page: self.cursor,
            generation: self.generation,
        })
    }

    fn is_current(&self, ticket: &PageTicket<K>) -> bool {
        ticket.generation == self.generation
            && ticket.source == self.source
            && self.in_flight == Some(ticket.page)
    }

    /// Append a fetched page.
    pub fn complete(&mut self, ticket: &PageTicket<K>, page_items: Vec<T>) -> PageOutcome {
        if !self.is_current(ticket) {
            return PageOutcome::Stale;
        }
        self.in_flight = None;
        self.cursor += 1;
        if page_items.is_empty() {
            self.exhausted = true;
            return PageOutcome::Exhausted;
        }
        let added = page_items.len();
        self.items.extend(page_items);
        PageOutcome::Appended(added)
    }

    /// Release a failed ticket. Items and cursor stay as they were.
    /// Returns `false` if the ticket was stale.
    pub fn fail(&mut self, ticket: &PageTicket<K>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Index of the item with `key`, if loaded.
    pub fn position_of(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == *key)
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == *key)
    }

    /// Items that pass `pred`, in list order.
    pub fn renderable<'a, P>(&'a self, pred: P) -> impl Iterator<Item = &'a T> + 'a
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.items.iter().filter(move |item| pred(item))
    }
}
