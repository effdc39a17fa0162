//! Configuration for the vault indexer

use clap::Parser;

/// Vault event indexer
///
/// Replays a file of decoded vault events into the entity store,
/// maintaining per-event audit records, per-address balances, and the
/// global aggregate counters.
#[derive(Parser, Debug)]
#[command(name = "vault-indexer")]
#[command(about = "Project decoded vault events into a queryable state store", long_about = None)]
pub struct Config {
    /// Path to the JSON file of decoded events
    #[arg(long, env = "VAULT_EVENTS_FILE")]
    pub events_file: String,

    /// Database path for the entity store
    #[arg(long, default_value = "./vault-data.db")]
    pub db_path: String,

    /// Keep the entity store in memory instead of on disk
    #[arg(long)]
    pub in_memory: bool,

    /// Number of events fetched from the feed per batch
    #[arg(long, default_value = "256")]
    pub batch_size: usize,
}
