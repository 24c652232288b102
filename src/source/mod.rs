//! Acquisition and caching of CSV extracts.
//!
//! - [`fetch::CsvSource`]: where an extract lives (relay URL or file on disk)
//!   and how to fetch it
//! - [`cache::SnapshotCache`]: per-source memoization of the whole
//!   fetch-parse-index pipeline, with a single-flight guarantee for
//!   concurrent first queries and an explicit reset
//!
//! There is no TTL and no background refresh: the extracts change at most a
//! few times a day and a new snapshot is always caller-initiated.

pub mod cache;
pub mod fetch;

pub use cache::{Snapshot, SnapshotCache};
pub use fetch::{CsvSource, SourceError};
