//! Vault event indexer
//!
//! Replays decoded vault-contract events into the projected state store:
//! one immutable audit record per event, a running balance per owner
//! address, and the global deposit/withdraw/participant aggregates.
//!
//! # Usage
//!
//! ```bash
//! # Replay a captured event stream into ./vault-data.db
//! vault-indexer --events-file events.json
//!
//! # Ephemeral run, keeping entities in memory
//! vault-indexer --events-file events.json --in-memory
//! ```

mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use config::Config;
use vault_core::{run_once_batch_with_config, RuntimeConfig, Sink};
use vault_feed_json::{JsonFeed, JsonFeedConfig};
use vault_projections::VaultSink;
use vault_store::{EntityStore, MemoryStore, SqliteStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .init();

    tracing::info!("Starting vault indexer");
    tracing::info!("Events file: {}", config.events_file);
    if config.in_memory {
        tracing::info!("Entity store: in-memory");
    } else {
        tracing::info!("Entity store: {}", config.db_path);
    }

    let store: Arc<dyn EntityStore> = if config.in_memory {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::new(&config.db_path)?)
    };

    let feed = JsonFeed::new(JsonFeedConfig {
        file_path: config.events_file.clone(),
        chunk_size: None,
    })?;
    tracing::info!(total_events = feed.len(), "feed loaded");

    let sink = Arc::new(VaultSink::new(store)?);
    let sinks: Vec<Arc<dyn Sink>> = vec![sink.clone()];

    let runtime_config = RuntimeConfig {
        batch_size: config.batch_size,
    };
    let dispatched = run_once_batch_with_config(&feed, &sinks, &runtime_config).await?;

    let global = sink.global_state();
    tracing::info!(
        events = dispatched,
        total_deposits = %global.total_deposits,
        total_withdraws = %global.total_withdraws,
        active_participants = %global.active_participants,
        total_balance = %global.total_balance,
        "replay complete"
    );

    Ok(())
}
