//! Player loadout loader.

use std::path::Path;

use dice_core::{DieKind, LoadoutEntry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Loadout structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadoutCatalog {
    pub dice: Vec<LoadoutEntry>,
}

/// Loader for the player's owned dice.
pub struct LoadoutLoader;

impl LoadoutLoader {
    /// Load loadout entries in hand order. Battery dice come from the
    /// `battery_included` relic and are rejected here.
    pub fn load(path: &Path) -> LoadResult<Vec<LoadoutEntry>> {
        let content = read_file(path)?;
        let catalog: LoadoutCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loadout RON {}: {}", path.display(), e))?;

        if let Some(pos) = catalog.dice.iter().position(|entry| entry.kind == DieKind::Battery) {
            anyhow::bail!(
                "Loadout slot {} in {} is a battery; enable the battery relic instead",
                pos,
                path.display()
            );
        }

        Ok(catalog.dice)
    }
}
