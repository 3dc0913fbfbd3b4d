//! Combat configuration and relic loaders.

use std::path::Path;

use dice_core::{CombatConfig, RelicModifiers};

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`CombatConfig`] from a TOML file. Missing keys keep their
    /// defaults; the hand size is clamped to what a zone can hold.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config: CombatConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))?;

        if config.max_dice_per_zone == 0 {
            anyhow::bail!("max_dice_per_zone must be at least 1 in {}", path.display());
        }
        let hand_size = config.hand_size;
        Ok(config.with_hand_size(hand_size))
    }
}

/// Loader for the run's relic modifiers from TOML files.
pub struct RelicLoader;

impl RelicLoader {
    pub fn load(path: &Path) -> LoadResult<RelicModifiers> {
        let content = read_file(path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse relic TOML {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let file = toml_file("base_rolls_per_turn = 4\nhand_size = 9\n");
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.base_rolls_per_turn, 4);
        assert_eq!(config.hand_size, 6);
        assert_eq!(config.player_max_health, CombatConfig::DEFAULT_PLAYER_MAX_HEALTH);
    }

    #[test]
    fn zero_zone_cap_is_rejected() {
        let file = toml_file("max_dice_per_zone = 0\n");
        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_dice_per_zone"));
    }

    #[test]
    fn malformed_relics_name_the_file() {
        let file = toml_file("wild_one = \"sometimes\"\n");
        let err = RelicLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse relic TOML"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file"));
    }
}
