// CashCard Service - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod cashcard;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use cashcard::CashCard;
pub use config::ServerConfig;
pub use db::{
    find_cash_card, get_all_cash_cards, insert_cash_cards, load_csv, setup_database,
    verify_count, SqliteStore,
};
pub use error::{CashCardError, Result};
pub use store::{CashCardStore, InMemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

