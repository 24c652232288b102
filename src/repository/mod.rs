//! The public read API over the cached snapshots.
//!
//! [`InventoryRepository`] owns one [`SnapshotCache`] per extract and answers
//! every query as a pure function of the loaded snapshot. Listings come from
//! the stock extract (it is the authoritative assortment); replenishment
//! queries read the replenishment extract.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stocklens::repository::InventoryRepository;
//! use stocklens::source::CsvSource;
//!
//! # async fn example() -> Result<(), stocklens::source::SourceError> {
//! let repo = InventoryRepository::new(
//!     Some(CsvSource::parse("https://relay.example.com/api/stock")),
//!     Some(CsvSource::parse("data/reappro.csv")),
//! );
//!
//! for reference in repo.list_references().await? {
//!     println!("{reference}");
//! }
//! println!("{}", repo.get_stock("IB220AX", "off white", "2XL").await?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::core::row::Replenishment;
use crate::parsing::header::TableKind;
use crate::source::cache::{Snapshot, SnapshotCache};
use crate::source::fetch::{CsvSource, SourceError};

/// Read-only query surface over the two vendor extracts.
///
/// All methods are `&self`; the caches carry their own interior state, so a
/// repository can be shared behind an `Arc` by the web server and queried
/// concurrently.
#[derive(Debug)]
pub struct InventoryRepository {
    client: reqwest::Client,
    stock: Option<SnapshotCache>,
    reappro: Option<SnapshotCache>,
}

impl InventoryRepository {
    /// Build a repository from the configured sources. Either source may be
    /// absent; queries needing it then fail with
    /// [`SourceError::NotConfigured`] instead of pretending an empty feed.
    #[must_use]
    pub fn new(stock: Option<CsvSource>, reappro: Option<CsvSource>) -> Self {
        Self {
            client: reqwest::Client::new(),
            stock: stock.map(|s| SnapshotCache::new(s, TableKind::Stock)),
            reappro: reappro.map(|s| SnapshotCache::new(s, TableKind::Replenishment)),
        }
    }

    async fn stock_snapshot(&self) -> Result<Arc<Snapshot>, SourceError> {
        let cache = self
            .stock
            .as_ref()
            .ok_or(SourceError::NotConfigured("stock"))?;
        cache.snapshot(&self.client).await
    }

    async fn reappro_snapshot(&self) -> Result<Arc<Snapshot>, SourceError> {
        let cache = self
            .reappro
            .as_ref()
            .ok_or(SourceError::NotConfigured("replenishment"))?;
        cache.snapshot(&self.client).await
    }

    /// All base references in the stock extract, lexicographic.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the stock extract cannot be loaded.
    pub async fn list_references(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.stock_snapshot().await?.index.references())
    }

    /// Distinct colors for a reference, lexicographic; empty when unknown.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the stock extract cannot be loaded.
    pub async fn list_colors(&self, reference: &str) -> Result<Vec<String>, SourceError> {
        Ok(self.stock_snapshot().await?.index.colors_for(reference))
    }

    /// Distinct sizes for a (reference, color) pair in display order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the stock extract cannot be loaded.
    pub async fn list_sizes(
        &self,
        reference: &str,
        color: &str,
    ) -> Result<Vec<String>, SourceError> {
        Ok(self
            .stock_snapshot()
            .await?
            .index
            .sizes_for(reference, color))
    }

    /// Aggregated stock for a triple; `0` when nothing is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the stock extract cannot be loaded.
    pub async fn get_stock(
        &self,
        reference: &str,
        color: &str,
        size: &str,
    ) -> Result<u32, SourceError> {
        Ok(self
            .stock_snapshot()
            .await?
            .index
            .stock_level(reference, color, size))
    }

    /// Aggregated replenishment for a triple; `None` when nothing is
    /// scheduled (a distinct fact from a zero quantity).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the replenishment extract cannot be
    /// loaded or is not configured.
    pub async fn get_replenishment(
        &self,
        reference: &str,
        color: &str,
        size: &str,
    ) -> Result<Option<Replenishment>, SourceError> {
        Ok(self
            .reappro_snapshot()
            .await?
            .index
            .replenishment_for(reference, color, size))
    }

    /// Drop both memoized snapshots; the next query per source reloads.
    pub fn reset(&self) {
        if let Some(cache) = &self.stock {
            cache.reset();
        }
        if let Some(cache) = &self.reappro {
            cache.reset();
        }
    }

    /// Loaded stock snapshot, if any, without triggering a load.
    #[must_use]
    pub fn stock_loaded(&self) -> Option<Arc<Snapshot>> {
        self.stock.as_ref().and_then(SnapshotCache::peek)
    }

    /// Loaded replenishment snapshot, if any, without triggering a load.
    #[must_use]
    pub fn reappro_loaded(&self) -> Option<Arc<Snapshot>> {
        self.reappro.as_ref().and_then(SnapshotCache::peek)
    }
}
