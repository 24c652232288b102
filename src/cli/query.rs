use anyhow::Result;
use serde_json::json;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::repository::InventoryRepository;
use crate::source::fetch::CsvSource;

/// Execute a query subcommand against the configured extracts.
///
/// # Errors
///
/// Returns an error when the required extract is not configured or cannot be
/// loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(cli: Cli) -> Result<()> {
    let repo = InventoryRepository::new(
        cli.stock_csv.as_deref().map(CsvSource::parse),
        cli.reappro_csv.as_deref().map(CsvSource::parse),
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async { execute(&cli, &repo).await })?;

    if cli.verbose {
        if let Some(snapshot) = repo.stock_loaded() {
            eprintln!(
                "stock extract: {} rows, {} dropped{}",
                snapshot.rows,
                snapshot.dropped,
                if snapshot.positional_fallback {
                    " (positional columns)"
                } else {
                    ""
                }
            );
        }
        if let Some(snapshot) = repo.reappro_loaded() {
            eprintln!(
                "replenishment extract: {} rows, {} dropped{}",
                snapshot.rows,
                snapshot.dropped,
                if snapshot.positional_fallback {
                    " (positional columns)"
                } else {
                    ""
                }
            );
        }
    }

    Ok(())
}

async fn execute(cli: &Cli, repo: &InventoryRepository) -> Result<()> {
    match &cli.command {
        Commands::Refs => {
            print_list(&repo.list_references().await?, cli.format);
        }
        Commands::Colors { reference } => {
            print_list(&repo.list_colors(reference).await?, cli.format);
        }
        Commands::Sizes { reference, color } => {
            print_list(&repo.list_sizes(reference, color).await?, cli.format);
        }
        Commands::Stock {
            reference,
            color,
            size,
        } => {
            let stock = repo.get_stock(reference, color, size).await?;
            match cli.format {
                OutputFormat::Text => println!("{stock}"),
                OutputFormat::Json => println!("{}", json!({ "stock": stock })),
            }
        }
        Commands::Reappro {
            reference,
            color,
            size,
        } => {
            let replenishment = repo.get_replenishment(reference, color, size).await?;
            match cli.format {
                OutputFormat::Text => match replenishment {
                    Some(rep) => println!(
                        "{} unit(s), date to receive: {}",
                        rep.quantity, rep.date_to_receive
                    ),
                    None => println!("no replenishment scheduled"),
                },
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string(&replenishment)?);
                }
            }
        }
        Commands::Serve(_) => unreachable!("serve is dispatched in main"),
    }
    Ok(())
}

fn print_list(values: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for value in values {
                println!("{value}");
            }
        }
        OutputFormat::Json => {
            // Serializing a Vec<String> cannot fail
            println!("{}", serde_json::to_string(values).expect("vec to json"));
        }
    }
}
