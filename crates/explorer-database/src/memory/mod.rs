//! Process-local repository implementations backed by `dashmap`.
//!
//! Each mutation runs while holding the shard lock of the entry it
//! touches, which gives the same single-step semantics as the SQL
//! statements of the PostgreSQL repositories.

pub mod itinerary;
pub mod shared_link;

pub use itinerary::MemoryItineraryRepository;
pub use shared_link::MemorySharedLinkRepository;

use std::cmp::Reverse;

use chrono::{DateTime, Utc};

/// A stored document plus its insertion sequence, used to order
/// documents created within the same clock tick.
#[derive(Debug, Clone)]
pub(crate) struct Stored<T> {
    pub seq: u64,
    pub doc: T,
}

/// Newest first, ties broken by insertion order.
pub(crate) fn newest_first<T>(mut docs: Vec<(DateTime<Utc>, Stored<T>)>) -> Vec<T> {
    docs.sort_by_key(|(created, stored)| Reverse((*created, stored.seq)));
    docs.into_iter().map(|(_, stored)| stored.doc).collect()
}
