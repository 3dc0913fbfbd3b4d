//! Content loaders for reading combat data from files.
//!
//! TOML carries flat numeric tables (combat config, relic modifiers); RON
//! carries structured lists (loadout, scripted enemies, encounter sequence).

pub mod config;
pub mod encounters;
pub mod enemies;
pub mod factory;
pub mod loadout;

pub use config::{ConfigLoader, RelicLoader};
pub use encounters::{EncounterLoader, EncounterSpec};
pub use enemies::EnemyLoader;
pub use factory::{ContentFactory, RunContent};
pub use loadout::LoadoutLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
