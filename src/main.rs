use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use cashcard::{find_cash_card, insert_cash_cards, load_csv, logging, verify_count, SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "cashcard", version, about = "Manage the cash card database")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "CASHCARD_DB", default_value = "cashcards.db")]
    db: PathBuf,

    /// tracing filter directive
    #[arg(long, global = true, env = "CASHCARD_LOG", default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import cash cards from a CSV file with an `id,amount` header
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print one cash card as JSON
    Show { id: i64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log);

    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("Failed to open database {:?}", cli.db))?;

    match cli.command {
        Command::Import { csv } => run_import(&store, &csv),
        Command::Show { id } => run_show(&store, id),
    }
}

fn run_import(store: &SqliteStore, csv_path: &Path) -> Result<()> {
    let cards = load_csv(csv_path)?;
    println!("✓ Loaded {} cash cards from CSV", cards.len());

    let (inserted, count) = store.with_conn(|conn| {
        let inserted = insert_cash_cards(conn, &cards)?;
        Ok((inserted, verify_count(conn)?))
    })?;

    println!("✓ Inserted: {} cash cards", inserted);
    println!("✓ Skipped duplicates: {}", cards.len() - inserted);
    println!("✓ Database contains {} cash cards", count);

    Ok(())
}

fn run_show(store: &SqliteStore, id: i64) -> Result<()> {
    match store.with_conn(|conn| find_cash_card(conn, id))? {
        Some(card) => {
            println!("{}", card.to_json()?);
            Ok(())
        }
        None => {
            eprintln!("❌ Cash card {} not found", id);
            std::process::exit(1);
        }
    }
}
