use crate::catalog::store::{Aggregate, InventoryIndex, ItemKey};
use crate::core::row::{Row, DATE_PLACEHOLDER};

/// Build the full lookup structure from normalized rows in one linear pass.
///
/// Quantities are ADDED into their bucket, never overwritten: the same
/// logical (reference, color, size) triple legitimately appears on multiple
/// source lines (split shipments, per-variant rows that fold to one base
/// reference), and summation is the documented aggregation semantic for both
/// extracts.
///
/// For replenishment rows the bucket keeps the first non-placeholder date
/// encountered in file order. Dates are not compared chronologically; the
/// stored date is a best-effort display value.
#[must_use]
pub fn build_index(rows: &[Row]) -> InventoryIndex {
    let mut index = InventoryIndex::default();

    for row in rows {
        index
            .colors_by_ref
            .entry(row.base_ref.clone())
            .or_default()
            .entry(row.color_key.clone())
            .or_insert_with(|| row.color.clone());

        index
            .sizes_by_ref_color
            .entry((row.base_ref.clone(), row.color_key.clone()))
            .or_default()
            .insert(row.size.clone());

        let key = ItemKey {
            base_ref: row.base_ref.clone(),
            color_key: row.color_key.clone(),
            size: row.size.clone(),
        };
        let agg: &mut Aggregate = index.totals.entry(key).or_default();
        agg.quantity += row.quantity;
        if agg.date_to_receive.is_none() {
            if let Some(date) = &row.date_to_receive {
                if date != DATE_PLACEHOLDER {
                    agg.date_to_receive = Some(date.clone());
                }
            }
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reappro_row(qty: &str, date: &str) -> Row {
        Row::normalize("IB220", "Off White", "2XL", qty, Some(date)).unwrap()
    }

    #[test]
    fn test_aggregation_is_additive() {
        let rows = vec![
            Row::normalize("IB220A", "Off White", "2XL", "5", None).unwrap(),
            Row::normalize("IB220", "Off White", "2XL", "3", None).unwrap(),
        ];
        let index = build_index(&rows);

        assert_eq!(index.stock_level("IB220", "Off White", "XXL"), 8);
        // One bucket, not two
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_first_non_placeholder_date_wins() {
        let rows = vec![
            reappro_row("5", "-"),
            reappro_row("10", "2025-10-01"),
            reappro_row("2", "2025-09-01"),
        ];
        let index = build_index(&rows);

        let rep = index
            .replenishment_for("IB220", "off white", "2XL")
            .unwrap();
        assert_eq!(rep.quantity, 17);
        // First non-"-" date in file order, even though a later row is sooner
        assert_eq!(rep.date_to_receive, "2025-10-01");
    }

    #[test]
    fn test_all_placeholder_dates_stay_placeholder() {
        let rows = vec![reappro_row("5", "-"), reappro_row("3", "-")];
        let index = build_index(&rows);

        let rep = index
            .replenishment_for("IB220", "Off White", "XXL")
            .unwrap();
        assert_eq!(rep.date_to_receive, "-");
        assert_eq!(rep.quantity, 8);
    }

    #[test]
    fn test_empty_rows_build_empty_index() {
        let index = build_index(&[]);
        assert!(index.is_empty());
        assert!(index.references().is_empty());
    }
}
