use serde::{Deserialize, Serialize};

use crate::core::normalize::{base_ref, color_key, display_color, parse_quantity};
use crate::core::size::canonical_size;

/// Placeholder the vendor uses for "no date" in the replenishment extract.
pub const DATE_PLACEHOLDER: &str = "-";

/// One normalized record from either extract.
///
/// The stock variant carries no date; the replenishment variant stores the raw
/// date string with missing/empty cells coerced to [`DATE_PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Base product code, variant suffix stripped
    pub base_ref: String,

    /// Display spelling of the color as it appeared in the file
    pub color: String,

    /// Folded color used for matching only
    pub color_key: String,

    /// Canonical size token
    pub size: String,

    /// Unit count, coerced to 0 when unparsable
    pub quantity: u32,

    /// Raw receive date for replenishment rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to_receive: Option<String>,
}

impl Row {
    /// Build a row from raw field values, applying every normalization rule.
    ///
    /// Returns `None` when the row cannot be addressed by any query (empty
    /// base reference, color key, or size after normalization); such rows
    /// are dropped rather than allowed to corrupt the aggregates.
    #[must_use]
    pub fn normalize(
        raw_ref: &str,
        raw_color: &str,
        raw_size: &str,
        raw_quantity: &str,
        raw_date: Option<&str>,
    ) -> Option<Self> {
        let base_ref = base_ref(raw_ref);
        let color = display_color(raw_color);
        let color_key = color_key(raw_color);
        let size = canonical_size(raw_size);

        if base_ref.is_empty() || color_key.is_empty() || size.is_empty() {
            return None;
        }

        let date_to_receive = raw_date.map(|d| {
            let d = d.trim();
            if d.is_empty() {
                DATE_PLACEHOLDER.to_string()
            } else {
                d.to_string()
            }
        });

        Some(Self {
            base_ref,
            color,
            color_key,
            size,
            quantity: parse_quantity(raw_quantity),
            date_to_receive,
        })
    }
}

/// Aggregated replenishment answer for one (reference, color, size) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replenishment {
    /// First non-placeholder date seen among the matching rows. Best-effort
    /// display value only; not guaranteed to be the soonest shipment.
    pub date_to_receive: String,

    /// Total units across all matching rows
    pub quantity: u32,
}
