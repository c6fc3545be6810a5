// CashCard Service - Web Server

use anyhow::{Context, Result};
use cashcard::{api, logging, CashCard, CashCardStore, InMemoryStore, ServerConfig, SqliteStore};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    logging::init(&config.log);

    let store: Arc<dyn CashCardStore> = match &config.db {
        Some(db_path) => {
            let store = SqliteStore::open(db_path)
                .with_context(|| format!("Failed to open database {:?}", db_path))?;
            info!(db = ?db_path, "serving from sqlite");
            Arc::new(store)
        }
        None => {
            info!("no database configured, serving the demo card from memory");
            Arc::new(InMemoryStore::with_cards([CashCard::DEMO]))
        }
    };

    let app = api::router(store);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;

    info!(addr = %config.addr, version = cashcard::VERSION, "cashcard server listening");

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;

    Ok(())
}
