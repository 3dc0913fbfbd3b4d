//! Content factory for building a run from data files.

use std::path::{Path, PathBuf};

use dice_core::{CombatConfig, EncounterDescriptor, LoadoutEntry, RelicModifiers, ScriptedEnemy};

use crate::loaders::{
    ConfigLoader, EncounterLoader, EnemyLoader, LoadResult, LoadoutLoader, RelicLoader,
};
use crate::roster::{Difficulty, Roster};

/// Everything a run needs, loaded from one data directory.
#[derive(Clone, Debug)]
pub struct RunContent {
    pub config: CombatConfig,
    pub relics: RelicModifiers,
    pub loadout: Vec<LoadoutEntry>,
    pub roster: Roster,
    pub encounters: Vec<EncounterDescriptor>,
}

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── relics.toml      (optional)
/// ├── loadout.ron
/// ├── enemies.ron
/// └── encounters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load relic modifiers from `relics.toml`, or none when the file is absent.
    pub fn load_relics(&self) -> LoadResult<RelicModifiers> {
        let path = self.data_dir.join("relics.toml");
        if !path.exists() {
            return Ok(RelicModifiers::default());
        }
        RelicLoader::load(&path)
    }

    /// Load the player's dice from `loadout.ron`.
    pub fn load_loadout(&self) -> LoadResult<Vec<LoadoutEntry>> {
        LoadoutLoader::load(&self.data_dir.join("loadout.ron"))
    }

    /// Load scripted enemies from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<ScriptedEnemy>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Build the roster: built-in enemies at `difficulty` plus scripted ones.
    pub fn load_roster(&self, difficulty: Difficulty) -> LoadResult<Roster> {
        Ok(Roster::new(difficulty).with_scripted(self.load_enemies()?))
    }

    /// Load the encounter sequence from `encounters.ron`, resolved against `roster`.
    pub fn load_encounters(&self, roster: &Roster) -> LoadResult<Vec<EncounterDescriptor>> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"), roster)
    }

    /// Load every file of the run in dependency order.
    pub fn load_run(&self, difficulty: Difficulty) -> LoadResult<RunContent> {
        let roster = self.load_roster(difficulty)?;
        let encounters = self.load_encounters(&roster)?;
        Ok(RunContent {
            config: self.load_config()?,
            relics: self.load_relics()?,
            loadout: self.load_loadout()?,
            roster,
            encounters,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_relics_file_means_no_relics() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_relics().unwrap(), RelicModifiers::default());
    }
}
