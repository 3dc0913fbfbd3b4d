//! Encounter sequence loader.

use std::path::Path;

use dice_core::EncounterDescriptor;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::roster::Roster;

/// One encounter as written in data: the enemy is named, not indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub enemy: String,
    #[serde(default)]
    pub reward_gold: u32,
    #[serde(default)]
    pub is_boss: bool,
}

/// Encounter sequence structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterSequence {
    pub encounters: Vec<EncounterSpec>,
}

/// Loader for the ordered encounter list of a run.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load the sequence and resolve enemy names against `roster`.
    pub fn load(path: &Path, roster: &Roster) -> LoadResult<Vec<EncounterDescriptor>> {
        let content = read_file(path)?;
        let sequence: EncounterSequence = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON {}: {}", path.display(), e))?;

        if sequence.encounters.is_empty() {
            anyhow::bail!("Encounter list {} is empty", path.display());
        }

        sequence
            .encounters
            .iter()
            .map(|spec| Self::resolve(spec, roster))
            .collect()
    }

    pub fn resolve(spec: &EncounterSpec, roster: &Roster) -> LoadResult<EncounterDescriptor> {
        let enemy_index = roster
            .index_of(&spec.enemy)
            .ok_or_else(|| anyhow::anyhow!("Unknown enemy '{}' in encounter list", spec.enemy))?;

        Ok(EncounterDescriptor {
            enemy_index,
            reward_gold: spec.reward_gold,
            is_boss: spec.is_boss,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Difficulty;
    use std::io::Write;

    fn ron_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn names_resolve_to_roster_indices() {
        let file = ron_file(
            r#"(encounters: [
                (enemy: "lockjaw", reward_gold: 10),
                (enemy: "wallop", reward_gold: 40, is_boss: true),
            ])"#,
        );
        let encounters = EncounterLoader::load(file.path(), &Roster::new(Difficulty::Normal)).unwrap();
        assert_eq!(
            encounters,
            vec![
                EncounterDescriptor { enemy_index: 1, reward_gold: 10, is_boss: false },
                EncounterDescriptor { enemy_index: 10, reward_gold: 40, is_boss: true },
            ]
        );
    }

    #[test]
    fn unknown_enemy_is_reported() {
        let file = ron_file(r#"(encounters: [(enemy: "Dragon")])"#);
        let err = EncounterLoader::load(file.path(), &Roster::new(Difficulty::Normal)).unwrap_err();
        assert!(err.to_string().contains("Dragon"));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let file = ron_file("(encounters: [])");
        assert!(EncounterLoader::load(file.path(), &Roster::default()).is_err());
    }
}
