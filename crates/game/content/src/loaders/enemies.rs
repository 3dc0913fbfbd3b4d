//! Scripted enemy catalog loader.

use std::path::Path;

use dice_core::ScriptedEnemy;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Scripted enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<ScriptedEnemy>,
}

/// Loader for data-only enemies that cycle a fixed move list.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ScriptedEnemy>> {
        let content = read_file(path)?;
        let catalog: EnemyCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON {}: {}", path.display(), e))?;

        for enemy in &catalog.enemies {
            if enemy.max_health == 0 {
                anyhow::bail!("Enemy '{}' has no health", enemy.name);
            }
            if enemy.moves.is_empty() {
                anyhow::bail!("Enemy '{}' has no moves", enemy.name);
            }
        }

        Ok(catalog.enemies)
    }
}
