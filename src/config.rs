// Server configuration: command-line flags with environment fallbacks

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "cashcard-server", about = "Serve cash cards over HTTP")]
pub struct ServerConfig {
    /// Address to bind, host:port
    #[arg(long, env = "CASHCARD_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// SQLite database to serve from. Without it the server runs on an
    /// in-memory store holding the demo card.
    #[arg(long, env = "CASHCARD_DB")]
    pub db: Option<PathBuf>,

    /// tracing filter directive
    #[arg(long, env = "CASHCARD_LOG", default_value = "info")]
    pub log: String,
}
