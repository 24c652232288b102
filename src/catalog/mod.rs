//! Snapshot index storage: the layered lookup structures built from one pass
//! over a normalized extract.
//!
//! Three layers answer the selection flow of the lookup surface:
//!
//! 1. base reference -> distinct colors (first-seen display spelling per key)
//! 2. (base reference, color key) -> distinct canonical sizes
//! 3. (base reference, color key, size) -> aggregated quantity (+ first
//!    receive date for the replenishment extract)
//!
//! All three are built by [`builder::build_index`] in a single pass and are
//! immutable afterward; a reload builds a wholly new index and swaps it in
//! atomically, so readers never observe a partial update.

pub mod builder;
pub mod store;
