use tracing::debug;

use crate::core::row::Row;
use crate::parsing::header::{resolve_columns, ColumnMap, TableKind};

/// Result of parsing one CSV extract.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Normalized rows, in file order
    pub rows: Vec<Row>,

    /// Rows dropped for failing the non-empty-key invariant
    pub dropped: usize,

    /// Whether the file was read with fixed positional columns because the
    /// header did not resolve
    pub positional_fallback: bool,
}

/// Parse a raw semicolon-delimited extract into normalized rows.
///
/// The first non-empty line is tried as a header; if any required role fails
/// to resolve there, the whole file (that line included) is read with the
/// fixed positional layout. Malformed data rows are dropped or coerced, never
/// fatal: a single bad vendor line must not take down the lookup surface.
#[must_use]
pub fn parse_table(text: &str, kind: TableKind) -> ParsedTable {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let Some(first) = lines.first() else {
        return ParsedTable {
            rows: Vec::new(),
            dropped: 0,
            positional_fallback: false,
        };
    };

    let (map, body, positional_fallback) = match resolve_columns(first, kind) {
        Some(map) => (map, &lines[1..], false),
        None => {
            debug!("header did not resolve, reading file positionally");
            (ColumnMap::positional(kind), &lines[..], true)
        }
    };

    let mut rows = Vec::with_capacity(body.len());
    let mut dropped = 0;
    for line in body {
        let fields: Vec<&str> = line.split(';').collect();
        match normalize_record(&fields, &map) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, total = body.len(), "dropped unaddressable rows");
    }

    ParsedTable {
        rows,
        dropped,
        positional_fallback,
    }
}

/// Normalize one raw record with the resolved (or positional) columns.
///
/// Cells past the end of a short record read as empty, which either coerces
/// (quantity, date) or drops the row (key fields).
fn normalize_record(fields: &[&str], map: &ColumnMap) -> Option<Row> {
    let cell = |i: usize| fields.get(i).copied().unwrap_or("");

    Row::normalize(
        cell(map.reference),
        cell(map.color),
        cell(map.size),
        cell(map.quantity),
        map.date.map(cell),
    )
}
