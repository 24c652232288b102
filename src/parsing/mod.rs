//! Ingestion of semicolon-delimited vendor extracts.
//!
//! Both extracts (stock and replenishment) share one generic tabular pipeline,
//! parameterized only by which column roles the file must provide:
//!
//! - [`header`]: maps an arbitrary header row to semantic columns, with an
//!   all-or-nothing positional fallback
//! - [`table`]: splits records and runs each through the row normalizer
//!
//! ## Header resolution
//!
//! The extracts come from a vendor back office whose column order, headers,
//! and language drift between revisions. Roles are found by synonym:
//!
//! | Role      | Matches (after accent folding)                  |
//! |-----------|-------------------------------------------------|
//! | reference | `ref`, `reference`, `article`, `sku`            |
//! | color     | `color`, `colour`, `couleur`, `coloris`         |
//! | size      | `size`, `taille`                                |
//! | quantity  | `stock`, `qty`, `quantity`, `quantite`, `qte`   |
//! | date      | `date ... receive`/`rec` (replenishment only)   |
//!
//! If any required role is missing, the whole file is read positionally as
//! `ref;color;size;quantity[;date]`, including the first line, which may
//! well be data in headerless revisions.

pub mod header;
pub mod table;

pub use header::TableKind;
