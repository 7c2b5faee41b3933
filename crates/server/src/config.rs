//! Server configuration from flags and environment

use clap::Parser;
use rolodex_engine::DurabilityMode;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default request body limit (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Rolodex HTTP server
#[derive(Debug, Clone, Parser)]
#[command(name = "rolodex-server", version, about = "Contacts API backed by a JSON file")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "ROLODEX_BIND", default_value = "127.0.0.1:3001")]
    pub bind: SocketAddr,

    /// Store file holding the contacts
    #[arg(long, env = "ROLODEX_DATA_FILE", default_value = "data/data.json")]
    pub data_file: PathBuf,

    /// none, async or strict
    #[arg(long, env = "ROLODEX_DURABILITY", default_value = "async")]
    pub durability: DurabilityMode,

    /// Largest accepted request body
    #[arg(long, env = "ROLODEX_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Emit logs as JSON lines
    #[arg(long, env = "ROLODEX_LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3001)),
            data_file: PathBuf::from("data/data.json"),
            durability: DurabilityMode::Async,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_json: false,
        }
    }
}
