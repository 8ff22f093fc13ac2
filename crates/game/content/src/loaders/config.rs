//! Combat configuration loader.

use std::path::Path;

use ironwood_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their built-in defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            player_i_frames_ms = 600

            [phase]
            percent = 80

            [weapons]
            ammo_item = "shell"
            "#,
        )
        .unwrap();

        assert_eq!(config.player_i_frames_ms, 600);
        assert_eq!(config.player_attack_anim_ms, 180);
        assert_eq!(config.phase.percent, 80);
        assert_eq!(config.phase.min_cooldown_ms, 650);
        assert_eq!(config.weapons.ammo_item, "shell");
        assert_eq!(config.weapons.firearms.len(), 2);
        assert_eq!(config.ground_drop_boss, "quarry_overseer");
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CombatConfig::default());
    }
}
