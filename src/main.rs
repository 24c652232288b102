use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod parsing;
mod repository;
mod source;
mod web;

use repository::InventoryRepository;
use source::fetch::CsvSource;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("stocklens=debug,info")
    } else {
        EnvFilter::new("stocklens=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let stock = cli.stock_csv.as_deref().map(CsvSource::parse);
    let reappro = cli.reappro_csv.as_deref().map(CsvSource::parse);

    if let cli::Commands::Serve(args) = cli.command {
        web::server::run(args, InventoryRepository::new(stock, reappro))?;
    } else {
        cli::query::run(cli)?;
    }

    Ok(())
}
