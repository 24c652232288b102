use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::normalize::{base_ref, color_key};
use crate::core::row::Replenishment;
use crate::core::size::{canonical_size, sort_sizes};

/// Composite lookup key for one aggregated (reference, color, size) bucket.
///
/// A proper key struct rather than delimiter-joined strings, so a reference
/// containing the delimiter can never collide with another triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub base_ref: String,
    pub color_key: String,
    pub size: String,
}

impl ItemKey {
    /// Build a key from caller-supplied values, folding each part the same
    /// way ingestion does. Callers may pass loosely formatted colors and
    /// sizes (`"Off White"` vs `"off-white"`, `"2XL"` vs `"XXL"`) and still
    /// hit the right bucket.
    #[must_use]
    pub fn fold(reference: &str, color: &str, size: &str) -> Self {
        Self {
            base_ref: base_ref(reference),
            color_key: color_key(color),
            size: canonical_size(size),
        }
    }
}

/// Aggregated value for one [`ItemKey`] bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Sum of quantities across all source lines for the triple
    pub quantity: u32,

    /// First non-placeholder receive date seen (replenishment only)
    pub date_to_receive: Option<String>,
}

/// The layered lookup structure for one extract, built once per snapshot and
/// never mutated afterward.
#[derive(Debug, Default)]
pub struct InventoryIndex {
    /// base ref -> color key -> first-seen display spelling
    pub(crate) colors_by_ref: HashMap<String, BTreeMap<String, String>>,

    /// (base ref, color key) -> canonical sizes
    pub(crate) sizes_by_ref_color: HashMap<(String, String), BTreeSet<String>>,

    /// (base ref, color key, size) -> aggregate
    pub(crate) totals: HashMap<ItemKey, Aggregate>,
}

impl InventoryIndex {
    /// All base references, lexicographic.
    #[must_use]
    pub fn references(&self) -> Vec<String> {
        let mut refs: Vec<String> = self.colors_by_ref.keys().cloned().collect();
        refs.sort();
        refs
    }

    /// Distinct display colors for a reference, lexicographic. The reference
    /// is folded to its base first, so variant codes work too. Empty when the
    /// reference is unknown.
    #[must_use]
    pub fn colors_for(&self, reference: &str) -> Vec<String> {
        let mut colors: Vec<String> = self
            .colors_by_ref
            .get(&base_ref(reference))
            .map(|by_key| by_key.values().cloned().collect())
            .unwrap_or_default();
        colors.sort();
        colors
    }

    /// Distinct canonical sizes for a (reference, color) pair, ordered by the
    /// fixed size priority with unknown tokens appended alphabetically.
    #[must_use]
    pub fn sizes_for(&self, reference: &str, color: &str) -> Vec<String> {
        let key = (base_ref(reference), color_key(color));
        let sizes: Vec<String> = self
            .sizes_by_ref_color
            .get(&key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        sort_sizes(sizes)
    }

    /// Aggregated stock for a triple. Absence means "no recorded stock" and
    /// reads as `0`, not an error.
    #[must_use]
    pub fn stock_level(&self, reference: &str, color: &str, size: &str) -> u32 {
        self.totals
            .get(&ItemKey::fold(reference, color, size))
            .map_or(0, |agg| agg.quantity)
    }

    /// Aggregated replenishment for a triple, or `None` when no row matched.
    /// "Nothing scheduled" is a distinct fact from "zero units", so absence
    /// is not collapsed to a zero quantity.
    #[must_use]
    pub fn replenishment_for(
        &self,
        reference: &str,
        color: &str,
        size: &str,
    ) -> Option<Replenishment> {
        self.totals
            .get(&ItemKey::fold(reference, color, size))
            .map(|agg| Replenishment {
                date_to_receive: agg
                    .date_to_receive
                    .clone()
                    .unwrap_or_else(|| crate::core::row::DATE_PLACEHOLDER.to_string()),
                quantity: agg.quantity,
            })
    }

    /// Number of aggregated buckets in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Check if the index holds no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builder::build_index;
    use crate::core::row::Row;

    fn stock_row(reference: &str, color: &str, size: &str, qty: &str) -> Row {
        Row::normalize(reference, color, size, qty, None).unwrap()
    }

    fn sample_index() -> InventoryIndex {
        build_index(&[
            stock_row("IB220A", "Off White", "2XL", "5"),
            stock_row("IB220", "off-white", "XXL", "3"),
            stock_row("IB220", "Navy", "M", "7"),
            stock_row("IB101", "Écru", "S", "2"),
        ])
    }

    #[test]
    fn test_references_sorted() {
        assert_eq!(sample_index().references(), vec!["IB101", "IB220"]);
    }

    #[test]
    fn test_colors_fold_the_reference_argument() {
        let index = sample_index();
        // Variant suffix on the query side still finds the base reference
        assert_eq!(index.colors_for("IB220AX"), vec!["Navy", "Off White"]);
        assert_eq!(index.colors_for("ZZ999"), Vec::<String>::new());
    }

    #[test]
    fn test_first_seen_color_spelling_wins() {
        let index = sample_index();
        // "off-white" arrived second; the display form stays "Off White"
        assert_eq!(index.colors_for("IB220"), vec!["Navy", "Off White"]);
    }

    #[test]
    fn test_sizes_tolerate_loose_color_spelling() {
        let index = sample_index();
        assert_eq!(index.sizes_for("IB220", "OFF WHITE"), vec!["XXL"]);
        assert_eq!(index.sizes_for("IB220", "off-white"), vec!["XXL"]);
    }

    #[test]
    fn test_stock_aggregates_across_variant_rows() {
        let index = sample_index();
        assert_eq!(index.stock_level("IB220", "off white", "2XL"), 8);
    }

    #[test]
    fn test_unknown_triple_reads_as_zero() {
        let index = sample_index();
        assert_eq!(index.stock_level("IB220", "Navy", "6XL"), 0);
        assert_eq!(index.stock_level("nope", "nope", "nope"), 0);
    }

    #[test]
    fn test_replenishment_absence_is_none_not_zero() {
        let index = sample_index();
        assert!(index.replenishment_for("IB220", "Navy", "6XL").is_none());
    }
}
