//! Command-line interface for stocklens.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **refs**: List all base references in the stock extract
//! - **colors**: List the colors available for a reference
//! - **sizes**: List the sizes available for a reference and color
//! - **stock**: Aggregated stock for a reference/color/size triple
//! - **reappro**: Scheduled replenishment for a reference/color/size triple
//! - **serve**: Start the HTTP JSON API
//!
//! ## Usage
//!
//! ```text
//! # Point at the extracts once, query away
//! stocklens --stock-csv data/stock.csv refs
//! stocklens --stock-csv data/stock.csv colors IB220
//! stocklens --stock-csv data/stock.csv stock IB220 "off white" 2XL
//!
//! # Replenishment needs the second extract
//! stocklens --reappro-csv https://relay.example.com/api/reappro \
//!     reappro IB220 "Off White" XXL
//!
//! # JSON output for scripting
//! stocklens --stock-csv data/stock.csv refs --format json
//!
//! # Serve the query surface to the browser UI
//! stocklens --stock-csv data/stock.csv --reappro-csv data/reappro.csv \
//!     serve --port 8080
//! ```

use clap::{Parser, Subcommand};

pub mod query;

#[derive(Parser)]
#[command(name = "stocklens")]
#[command(version)]
#[command(about = "Answer stock and replenishment questions from vendor CSV extracts")]
#[command(
    long_about = "stocklens ingests the vendor's stock and replenishment CSV extracts and answers inventory questions with stable semantics despite upstream inconsistencies.\n\nVariant product codes (IB220A, IB220AX) fold to their base reference, color spellings and accents are matched loosely, and size aliases (2XL vs XXL) land in one canonical bucket."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Stock extract: URL or file path
    #[arg(long, global = true, value_name = "URL_OR_PATH")]
    pub stock_csv: Option<String>,

    /// Replenishment extract: URL or file path
    #[arg(long, global = true, value_name = "URL_OR_PATH")]
    pub reappro_csv: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all base references in the stock extract
    Refs,

    /// List the colors available for a reference
    Colors {
        /// Product reference (variant suffixes are folded away)
        reference: String,
    },

    /// List the sizes available for a reference and color
    Sizes {
        reference: String,
        /// Color, matched loosely (case, accents, punctuation)
        color: String,
    },

    /// Aggregated stock for a reference/color/size triple
    Stock {
        reference: String,
        color: String,
        /// Size token, aliases accepted (2XL == XXL)
        size: String,
    },

    /// Scheduled replenishment for a reference/color/size triple
    Reappro {
        reference: String,
        color: String,
        size: String,
    },

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
