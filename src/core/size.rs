//! Canonical garment size tokens and ordering.

/// Display order for canonical sizes. Sizes outside this list sort after it,
/// alphabetically.
pub const SIZE_ORDER: &[&str] = &[
    "XXS", "XS", "S", "M", "L", "XL", "XXL", "3XL", "4XL", "5XL", "6XL",
];

/// Map a raw size token to its canonical form.
///
/// The alias table folds the numeric spellings the vendor alternates between
/// (`2XL` vs `XXL`) into one canonical set. Unrecognized tokens pass through
/// uppercased with whitespace removed, so an odd one-off size still gets a
/// stable bucket instead of being lost.
#[must_use]
pub fn canonical_size(raw: &str) -> String {
    let token: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    match token.as_str() {
        "2XS" => "XXS".to_string(),
        "2XL" => "XXL".to_string(),
        "XXXL" => "3XL".to_string(),
        "XXXXL" => "4XL".to_string(),
        "XXXXXL" => "5XL".to_string(),
        "XXXXXXL" => "6XL".to_string(),
        _ => token,
    }
}

/// Sort sizes by canonical priority, unknown tokens last in alphabetical
/// order. Duplicates are collapsed.
#[must_use]
pub fn sort_sizes(sizes: Vec<String>) -> Vec<String> {
    let mut sizes = sizes;
    sizes.sort_by(|a, b| {
        let rank = |s: &str| SIZE_ORDER.iter().position(|o| *o == s);
        match (rank(a), rank(b)) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
    sizes.dedup();
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_closure() {
        assert_eq!(canonical_size("2XL"), "XXL");
        assert_eq!(canonical_size("XXL"), "XXL");
        assert_eq!(canonical_size("2XS"), "XXS");
        assert_eq!(canonical_size("XXXL"), "3XL");
        assert_eq!(canonical_size("3XL"), "3XL");
    }

    #[test]
    fn test_unknown_token_passes_through_normalized() {
        assert_eq!(canonical_size(" one size "), "ONESIZE");
        assert_eq!(canonical_size("37/38"), "37/38");
    }

    #[test]
    fn test_sort_sizes_priority_then_alpha() {
        let sizes = vec![
            "XL".to_string(),
            "S".to_string(),
            "3XL".to_string(),
            "M".to_string(),
        ];
        assert_eq!(sort_sizes(sizes), vec!["S", "M", "XL", "3XL"]);
    }

    #[test]
    fn test_sort_sizes_unknown_after_known() {
        let sizes = vec![
            "ONESIZE".to_string(),
            "XXL".to_string(),
            "37/38".to_string(),
            "XS".to_string(),
        ];
        assert_eq!(sort_sizes(sizes), vec!["XS", "XXL", "37/38", "ONESIZE"]);
    }

    #[test]
    fn test_sort_sizes_collapses_duplicates() {
        let sizes = vec!["M".to_string(), "M".to_string(), "S".to_string()];
        assert_eq!(sort_sizes(sizes), vec!["S", "M"]);
    }
}
