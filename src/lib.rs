//! # stocklens
//!
//! A library for answering inventory questions from the vendor's stock and
//! replenishment CSV extracts.
//!
//! The extracts are semicolon-delimited and not fully standardized between
//! revisions: column order and headers drift (and switch language), product
//! codes carry per-variant suffixes (`IB220A`, `IB220AX`), color spellings
//! change accents and punctuation, and size tokens alternate between
//! spellings (`2XL` vs `XXL`).
//!
//! `stocklens` turns that raw text into a queryable in-memory index with
//! stable semantics: fold first, then aggregate, so every spelling of the
//! same article lands in the same bucket.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stocklens::repository::InventoryRepository;
//! use stocklens::source::CsvSource;
//!
//! # async fn example() -> Result<(), stocklens::source::SourceError> {
//! let repo = InventoryRepository::new(
//!     Some(CsvSource::parse("data/stock.csv")),
//!     Some(CsvSource::parse("data/reappro.csv")),
//! );
//!
//! // First query fetches, parses, and indexes the extract once;
//! // everything after is served from memory.
//! let colors = repo.list_colors("IB220AX").await?;
//! let stock = repo.get_stock("IB220", "off white", "2XL").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: normalization rules and row types
//! - [`parsing`]: header resolution and tabular ingestion
//! - [`catalog`]: the layered lookup index
//! - [`source`]: CSV acquisition and the single-flight snapshot cache
//! - [`repository`]: the public read API
//! - [`cli`], [`web`]: command-line and HTTP delivery surfaces

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod repository;
pub mod source;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::InventoryIndex;
pub use core::row::{Replenishment, Row};
pub use parsing::header::TableKind;
pub use repository::InventoryRepository;
pub use source::cache::{Snapshot, SnapshotCache};
pub use source::fetch::{CsvSource, SourceError};
