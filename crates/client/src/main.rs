//! Headless dice-combat client.
//!
//! Loads content from `COMBAT_DATA_DIR` (default `crates/game/content/data`),
//! builds the runtime and plays the whole run with [`GreedyProvider`],
//! logging each resolved turn and encounter. The final snapshot is written
//! to stdout as JSON; logs go to stderr.
//!
//! # Environment
//!
//! - `COMBAT_SEED`, `COMBAT_EVENT_BUFFER`, `COMBAT_COMMAND_BUFFER`: runtime config
//! - `COMBAT_DIFFICULTY`: `normal` or `nightmare`
//! - `COMBAT_LOG_DIR`: also write logs to `<dir>/combat.log`
//! - `RUST_LOG`: log filter

mod logging;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use combat_runtime::{GreedyProvider, Runtime, RuntimeConfig, Topic};
use dice_content::{ContentFactory, Difficulty};

const DEFAULT_DATA_DIR: &str = "crates/game/content/data";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let _log_guard = logging::setup_logging()?;

    let config = RuntimeConfig::from_env()?;
    let difficulty = match std::env::var("COMBAT_DIFFICULTY") {
        Ok(value) => value
            .parse::<Difficulty>()
            .map_err(|_| anyhow::anyhow!("unknown COMBAT_DIFFICULTY {value:?}"))?,
        Err(_) => Difficulty::default(),
    };
    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    tracing::info!(data_dir = %data_dir.display(), %difficulty, seed = config.seed, "Starting dice-combat");

    let content = ContentFactory::new(&data_dir)
        .load_run(difficulty)
        .with_context(|| format!("loading content from {}", data_dir.display()))?;
    tracing::info!(
        encounters = content.encounters.len(),
        dice = content.loadout.len(),
        "Content loaded"
    );

    let mut runtime = Runtime::builder()
        .config(config)
        .content(content)
        .player_provider(GreedyProvider::default())
        .build()
        .await?;

    let reporter = tokio::spawn(report::log_encounters(runtime.subscribe(Topic::Encounter)));

    let outcome = runtime.run_until_complete().await?;
    runtime.shutdown().await?;
    reporter.await.context("encounter reporter panicked")?;

    report::log_outcome(&outcome);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
