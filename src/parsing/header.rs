use crate::core::normalize::strip_accent;

/// Which extract a file is, and therefore which column roles it must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Stock extract: reference, color, size, quantity
    Stock,
    /// Replenishment extract: reference, color, size, quantity, receive date
    Replenishment,
}

impl TableKind {
    #[must_use]
    pub fn wants_date(self) -> bool {
        matches!(self, Self::Replenishment)
    }
}

/// Resolved column positions for the semantic roles of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub reference: usize,
    pub color: usize,
    pub size: usize,
    pub quantity: usize,
    pub date: Option<usize>,
}

impl ColumnMap {
    /// Fixed positional layout used when header resolution fails: the file is
    /// then read as `ref;color;size;quantity[;date]`, header line included.
    #[must_use]
    pub fn positional(kind: TableKind) -> Self {
        Self {
            reference: 0,
            color: 1,
            size: 2,
            quantity: 3,
            date: kind.wants_date().then_some(4),
        }
    }
}

/// Try to resolve the semantic columns from a raw header line.
///
/// Each role is matched against the cells with an ordered list of predicates:
/// exact synonym (multi-language), then substring containment, and for the
/// date role a final conjunctive fallback (`date` plus `receive`/`rec`). The
/// first cell satisfying any predicate wins the role.
///
/// Returns `None` when any required role fails to resolve. The caller then
/// falls back to [`ColumnMap::positional`] for the whole file, deliberately
/// all-or-nothing, so a half-recognized header never mixes named and
/// positional columns.
#[must_use]
pub fn resolve_columns(header_line: &str, kind: TableKind) -> Option<ColumnMap> {
    let cells: Vec<String> = header_line.split(';').map(fold_header_cell).collect();

    let find = |role: Role| cells.iter().position(|cell| role.matches(cell));

    let map = ColumnMap {
        reference: find(Role::Reference)?,
        color: find(Role::Color)?,
        size: find(Role::Size)?,
        quantity: find(Role::Quantity)?,
        date: if kind.wants_date() {
            Some(find(Role::Date)?)
        } else {
            None
        },
    };
    Some(map)
}

/// Semantic column roles the resolver knows about.
#[derive(Debug, Clone, Copy)]
enum Role {
    Reference,
    Color,
    Size,
    Quantity,
    Date,
}

impl Role {
    /// Exact synonyms, matched against folded header cells. Accented forms
    /// (`référence`, `quantité`) arrive here already folded to ASCII.
    fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Reference => &["ref", "reference", "article", "sku"],
            Self::Color => &["color", "colour", "couleur", "coloris"],
            Self::Size => &["size", "taille"],
            Self::Quantity => &["stock", "qty", "quantity", "quantite", "qte"],
            Self::Date => &[
                "date to receive",
                "date reception",
                "date de reception",
                "delivery date",
                "date livraison",
            ],
        }
    }

    fn matches(self, cell: &str) -> bool {
        if cell.is_empty() {
            return false;
        }
        let synonyms = self.synonyms();
        if synonyms.contains(&cell) {
            return true;
        }
        if synonyms.iter().any(|s| cell.contains(s)) {
            return true;
        }
        // Receive-date headers vary too much for a synonym list alone
        // ("date a recevoir", "reception date", ...)
        matches!(self, Self::Date)
            && cell.contains("date")
            && (cell.contains("receive") || cell.contains("rec"))
    }
}

/// Fold one header cell for matching: lower-cased, accents stripped,
/// punctuation dropped, whitespace collapsed to single spaces.
fn fold_header_cell(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        if let Some(s) = strip_accent(c) {
            folded.push_str(s);
        } else if c.is_alphanumeric() || c.is_whitespace() {
            folded.push(c);
        }
    }
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_english_stock_header() {
        let map = resolve_columns("ref;color;size;stock", TableKind::Stock).unwrap();
        assert_eq!(map, ColumnMap::positional(TableKind::Stock));
    }

    #[test]
    fn test_resolves_french_header_with_accents() {
        let map = resolve_columns(
            "Référence;Couleur;Taille;Quantité",
            TableKind::Stock,
        )
        .unwrap();
        assert_eq!(map.reference, 0);
        assert_eq!(map.color, 1);
        assert_eq!(map.size, 2);
        assert_eq!(map.quantity, 3);
        assert_eq!(map.date, None);
    }

    #[test]
    fn test_resolves_reordered_columns() {
        let map = resolve_columns("size;qty;ref;colour", TableKind::Stock).unwrap();
        assert_eq!(map.reference, 2);
        assert_eq!(map.color, 3);
        assert_eq!(map.size, 0);
        assert_eq!(map.quantity, 1);
    }

    #[test]
    fn test_substring_containment_matches() {
        let map = resolve_columns(
            "code article;coloris produit;taille;stock web",
            TableKind::Stock,
        )
        .unwrap();
        assert_eq!(map.reference, 0);
        assert_eq!(map.color, 1);
    }

    #[test]
    fn test_date_conjunctive_fallback() {
        let map = resolve_columns(
            "ref;couleur;taille;quantite;Date à recevoir",
            TableKind::Replenishment,
        )
        .unwrap();
        assert_eq!(map.date, Some(4));
    }

    #[test]
    fn test_date_reception_header() {
        let map = resolve_columns(
            "ref;couleur;taille;qty;Date de réception",
            TableKind::Replenishment,
        )
        .unwrap();
        assert_eq!(map.date, Some(4));
    }

    #[test]
    fn test_missing_role_fails_resolution_entirely() {
        // No quantity column: the whole header is rejected, not partially used
        assert!(resolve_columns("ref;color;size", TableKind::Stock).is_none());
        // Stock header is not enough for the replenishment extract
        assert!(resolve_columns("ref;color;size;qty", TableKind::Replenishment).is_none());
    }

    #[test]
    fn test_data_line_does_not_resolve() {
        assert!(resolve_columns("IB220;Off White;2XL;5", TableKind::Stock).is_none());
    }

    #[test]
    fn test_positional_layouts() {
        let stock = ColumnMap::positional(TableKind::Stock);
        assert_eq!((stock.reference, stock.quantity, stock.date), (0, 3, None));

        let reappro = ColumnMap::positional(TableKind::Replenishment);
        assert_eq!(reappro.date, Some(4));
    }
}
