use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::info;

use crate::catalog::builder::build_index;
use crate::catalog::store::InventoryIndex;
use crate::parsing::header::TableKind;
use crate::parsing::table::parse_table;
use crate::source::fetch::{CsvSource, SourceError};

/// One fully built, immutable projection of an extract.
#[derive(Debug)]
pub struct Snapshot {
    pub index: InventoryIndex,

    /// Rows that survived normalization
    pub rows: usize,

    /// Rows dropped for failing the non-empty-key invariant
    pub dropped: usize,

    /// Whether the file was read with fixed positional columns
    pub positional_fallback: bool,

    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Parse, normalize, and index raw CSV text.
    #[must_use]
    pub fn build(text: &str, kind: TableKind) -> Self {
        let table = parse_table(text, kind);
        let index = build_index(&table.rows);
        Self {
            index,
            rows: table.rows.len(),
            dropped: table.dropped,
            positional_fallback: table.positional_fallback,
            loaded_at: Utc::now(),
        }
    }
}

/// Memoizes the fetch-parse-index pipeline for one source.
///
/// Two states, `Empty` and `Loaded`. The first query runs the pipeline; every
/// query arriving while that load is in flight awaits the SAME pending
/// operation rather than triggering its own fetch (the `OnceCell` holds the
/// in-flight initializer, not a boolean). Once loaded, queries are served
/// from memory until an explicit [`SnapshotCache::reset`].
///
/// A failed load leaves the cache `Empty` (a later query may retry) and can
/// never corrupt a previously loaded snapshot, because a snapshot only
/// replaces the cell contents on success.
#[derive(Debug)]
pub struct SnapshotCache {
    source: CsvSource,
    kind: TableKind,
    cell: RwLock<Arc<OnceCell<Arc<Snapshot>>>>,
}

impl SnapshotCache {
    #[must_use]
    pub fn new(source: CsvSource, kind: TableKind) -> Self {
        Self {
            source,
            kind,
            cell: RwLock::new(Arc::new(OnceCell::new())),
        }
    }

    #[must_use]
    pub fn source(&self) -> &CsvSource {
        &self.source
    }

    /// Get the snapshot, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the fetch fails; parsing itself never
    /// fails (malformed rows are dropped or coerced).
    pub async fn snapshot(&self, client: &reqwest::Client) -> Result<Arc<Snapshot>, SourceError> {
        let cell = self.cell.read().expect("cache lock poisoned").clone();
        cell.get_or_try_init(|| async {
            let text = self.source.fetch(client).await?;
            let snapshot = Snapshot::build(&text, self.kind);
            info!(
                source = %self.source,
                rows = snapshot.rows,
                dropped = snapshot.dropped,
                positional = snapshot.positional_fallback,
                "loaded snapshot"
            );
            Ok(Arc::new(snapshot))
        })
        .await
        .cloned()
    }

    /// The loaded snapshot, if any, without triggering a load.
    #[must_use]
    pub fn peek(&self) -> Option<Arc<Snapshot>> {
        self.cell.read().expect("cache lock poisoned").get().cloned()
    }

    /// Drop the memoized snapshot and return to `Empty`.
    ///
    /// Installs a fresh cell, so queries already holding the old snapshot
    /// keep reading a consistent index while the next query rebuilds.
    pub fn reset(&self) {
        *self.cell.write().expect("cache lock poisoned") = Arc::new(OnceCell::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn stock_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn file_cache(file: &tempfile::NamedTempFile) -> SnapshotCache {
        SnapshotCache::new(
            CsvSource::File(file.path().to_path_buf()),
            TableKind::Stock,
        )
    }

    #[tokio::test]
    async fn test_snapshot_is_built_once() {
        let file = stock_file("ref;color;size;stock\nIB220;Navy;M;4\n");
        let cache = file_cache(&file);
        let client = reqwest::Client::new();

        let first = cache.snapshot(&client).await.unwrap();
        let second = cache.snapshot(&client).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.index.stock_level("IB220", "navy", "M"), 4);
    }

    #[tokio::test]
    async fn test_concurrent_first_queries_share_one_load() {
        let file = stock_file("ref;color;size;stock\nIB220;Navy;M;4\n");
        let cache = Arc::new(file_cache(&file));
        let client = reqwest::Client::new();

        let (a, b) = tokio::join!(
            {
                let cache = Arc::clone(&cache);
                let client = client.clone();
                async move { cache.snapshot(&client).await.unwrap() }
            },
            {
                let cache = Arc::clone(&cache);
                let client = client.clone();
                async move { cache.snapshot(&client).await.unwrap() }
            }
        );
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_reset_builds_an_independent_snapshot() {
        let file = stock_file("ref;color;size;stock\nIB220;Navy;M;4\n");
        let cache = file_cache(&file);
        let client = reqwest::Client::new();

        let first = cache.snapshot(&client).await.unwrap();
        cache.reset();
        assert!(cache.peek().is_none());

        let second = cache.snapshot(&client).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        // The old snapshot stays readable for anyone still holding it
        assert_eq!(first.index.stock_level("IB220", "Navy", "M"), 4);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_cache_empty() {
        let cache = SnapshotCache::new(
            CsvSource::File("/nonexistent/stock.csv".into()),
            TableKind::Stock,
        );
        let client = reqwest::Client::new();

        assert!(cache.snapshot(&client).await.is_err());
        assert!(cache.peek().is_none());
    }
}
