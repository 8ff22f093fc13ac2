//! Archetype catalog loader.
//!
//! Archetypes are authored with an `on_death` hook of up to three optional
//! fields. The loader turns each hook into the ordered command list the core
//! dispatches.
//!
//! `drops` and `ai` are read leniently: a malformed value is logged and
//! replaced by no drops or the melee defaults, so one bad field never costs
//! the rest of the catalog.

use std::path::Path;

use ironwood_core::{
    ActorKind, AiDescriptor, Archetype, ArchetypeTable, DeathCommand, DropEntry, ProjectileSpec,
};
use ron::value::RawValue;
use serde::{Deserialize, Deserializer, Serialize};

use crate::loaders::{LoadResult, read_file};

/// On-death hook as it appears in `archetypes.ron`.
///
/// `complete_objective` may be written as `"quest.objective"` to name the
/// quest explicitly without completing all of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathHook {
    pub set_flag: Option<String>,
    pub complete_quest: Option<String>,
    pub complete_objective: Option<String>,
}

impl DeathHook {
    pub fn into_commands(self) -> Vec<DeathCommand> {
        let mut commands =
            DeathCommand::from_hook(self.set_flag, self.complete_quest.clone(), None);

        if let Some(objective) = self.complete_objective {
            let (quest, objective) = match (self.complete_quest, objective.split_once('.')) {
                (Some(quest), _) => (Some(quest), objective),
                (None, Some((quest, objective))) => {
                    (Some(quest.to_string()), objective.to_string())
                }
                (None, None) => (None, objective),
            };
            commands.push(DeathCommand::CompleteObjective { quest, objective });
        }
        commands
    }
}

/// One archetype entry in `archetypes.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArchetypeRon {
    id: String,
    name: String,
    #[serde(default)]
    kind: ActorKind,
    hp_max: u32,
    contact_damage: u32,
    move_interval_ms: u32,
    aggro_range_tiles: u32,
    attack_range_tiles: u32,
    telegraph_ms: u32,
    attack_cooldown_ms: u32,
    #[serde(default)]
    phase2_at_hp: Option<u32>,
    #[serde(default)]
    projectile: Option<ProjectileSpec>,
    #[serde(default, deserialize_with = "lenient_drops")]
    drops: Vec<DropEntry>,
    #[serde(default, deserialize_with = "lenient_ai")]
    ai: AiDescriptor,
    #[serde(default)]
    on_death: DeathHook,
}

impl ArchetypeRon {
    fn into_archetype(self) -> Archetype {
        let mut builder = Archetype::builder(self.id)
            .name(self.name)
            .kind(self.kind)
            .hp(self.hp_max)
            .contact_damage(self.contact_damage)
            .move_interval(self.move_interval_ms)
            .aggro(self.aggro_range_tiles)
            .attack_range(self.attack_range_tiles)
            .telegraph(self.telegraph_ms)
            .cooldown(self.attack_cooldown_ms)
            .ai(self.ai);

        if let Some(threshold) = self.phase2_at_hp {
            builder = builder.phase2_at(threshold);
        }
        if let Some(projectile) = self.projectile {
            builder = builder.projectile(projectile);
        }
        for entry in self.drops {
            builder = builder.drop(entry);
        }
        for command in self.on_death.into_commands() {
            builder = builder.on_death(command);
        }
        builder.build()
    }
}

/// Reads a drop list entry by entry, skipping entries that do not parse or
/// whose chance lies outside `[0, 1]`.
fn lenient_drops<'de, D>(deserializer: D) -> Result<Vec<DropEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    let entries = match raw.into_rust::<Vec<Box<RawValue>>>() {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(drops = raw.get_ron().trim(), "ignoring malformed drop list: {}", e);
            return Ok(Vec::new());
        }
    };

    let drops = entries
        .iter()
        .filter_map(|entry| match entry.into_rust::<DropEntry>() {
            Ok(drop) if (0.0..=1.0).contains(&drop.chance) => Some(drop),
            Ok(drop) => {
                tracing::warn!(
                    item = drop.item.as_str(),
                    chance = drop.chance,
                    "ignoring drop with chance outside [0, 1]"
                );
                None
            }
            Err(e) => {
                tracing::warn!(drop = entry.get_ron().trim(), "ignoring malformed drop: {}", e);
                None
            }
        })
        .collect();
    Ok(drops)
}

/// Falls back to the melee defaults when the descriptor does not parse.
fn lenient_ai<'de, D>(deserializer: D) -> Result<AiDescriptor, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    Ok(raw.into_rust::<AiDescriptor>().unwrap_or_else(|e| {
        tracing::warn!(ai = raw.get_ron().trim(), "using melee defaults for malformed ai: {}", e);
        AiDescriptor::default()
    }))
}

/// Loader for the archetype catalog from RON files.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// Load archetypes from a RON list.
    ///
    /// Duplicate ids are rejected. Bad `drops` and `ai` values are not.
    pub fn load(path: &Path) -> LoadResult<ArchetypeTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load archetypes from {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ArchetypeTable> {
        let entries: Vec<ArchetypeRon> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype catalog RON: {}", e))?;

        let mut table = ArchetypeTable::new();
        for entry in entries {
            let id = entry.id.clone();
            if table.insert(entry.into_archetype()).is_some() {
                anyhow::bail!("duplicate archetype id '{}'", id);
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwood_core::{AiMode, ArchetypeOracle};

    const CATALOG: &str = r#"
#![enable(implicit_some)]
[
    (
        id: "bandit_marksman",
        name: "Marksman",
        kind: human,
        hp_max: 3,
        contact_damage: 2,
        move_interval_ms: 360,
        aggro_range_tiles: 8,
        attack_range_tiles: 6,
        telegraph_ms: 520,
        attack_cooldown_ms: 1400,
        projectile: (speed: 6.0, max_range: 7.0, damage: 3, hitstun_ms: 120),
        drops: [(item: "ammo_scrap", chance: 0.35, min: 1, max: 2)],
        ai: (mode: ranged, keep_distance_tiles: 3, roam_radius_tiles: 2, leash_range_tiles: 12),
    ),
    (
        id: "quarry_overseer",
        name: "Quarry Overseer",
        kind: boss,
        hp_max: 8,
        contact_damage: 4,
        move_interval_ms: 340,
        aggro_range_tiles: 7,
        attack_range_tiles: 1,
        telegraph_ms: 360,
        attack_cooldown_ms: 1200,
        phase2_at_hp: 4,
        on_death: (set_flag: "quarryCleared", complete_objective: "clear_quarry"),
    ),
]
"#;

    #[test]
    fn parses_authored_catalog() {
        let table = ArchetypeLoader::parse(CATALOG).unwrap();
        assert_eq!(table.len(), 2);

        let marksman = table.archetype("bandit_marksman").unwrap();
        assert_eq!(marksman.ai.mode, AiMode::Ranged);
        assert_eq!(marksman.ai.keep_distance_tiles, 3);
        assert_eq!(marksman.projectile, Some(ProjectileSpec::ENEMY_DEFAULT));
        assert!(marksman.on_death.is_empty());

        let overseer = table.archetype("quarry_overseer").unwrap();
        assert!(overseer.is_boss());
        assert_eq!(overseer.phase2_at_hp, Some(4));
        assert!(overseer.drops.is_empty());
        assert_eq!(
            overseer.on_death,
            vec![
                DeathCommand::SetFlag("quarryCleared".into()),
                DeathCommand::CompleteObjective {
                    quest: None,
                    objective: "clear_quarry".into(),
                },
            ]
        );
    }

    #[test]
    fn dotted_objective_names_its_quest() {
        let hook = DeathHook {
            complete_objective: Some("q1_quarry_rescue.clear_quarry".into()),
            ..DeathHook::default()
        };
        assert_eq!(
            hook.into_commands(),
            vec![DeathCommand::CompleteObjective {
                quest: Some("q1_quarry_rescue".into()),
                objective: "clear_quarry".into(),
            }]
        );
    }

    #[test]
    fn explicit_quest_wins_over_dotted_objective() {
        let hook = DeathHook {
            set_flag: Some("boss_down".into()),
            complete_quest: Some("q2".into()),
            complete_objective: Some("obj".into()),
        };
        assert_eq!(
            hook.into_commands(),
            vec![
                DeathCommand::SetFlag("boss_down".into()),
                DeathCommand::CompleteQuest("q2".into()),
                DeathCommand::CompleteObjective {
                    quest: Some("q2".into()),
                    objective: "obj".into(),
                },
            ]
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let duplicate = r#"[
            (id: "wolf", name: "A", hp_max: 3, contact_damage: 2, move_interval_ms: 260,
             aggro_range_tiles: 5, attack_range_tiles: 1, telegraph_ms: 180, attack_cooldown_ms: 900),
            (id: "wolf", name: "B", hp_max: 3, contact_damage: 2, move_interval_ms: 260,
             aggro_range_tiles: 5, attack_range_tiles: 1, telegraph_ms: 180, attack_cooldown_ms: 900),
        ]"#;
        assert!(ArchetypeLoader::parse(duplicate).is_err());
    }

    #[test]
    fn malformed_drops_and_ai_fall_back_to_defaults() {
        let catalog = r#"[
            (id: "wolf", name: "Coyote", hp_max: 3, contact_damage: 2, move_interval_ms: 260,
             aggro_range_tiles: 5, attack_range_tiles: 1, telegraph_ms: 180, attack_cooldown_ms: 900,
             drops: [
                (item: "hide_scrap", chance: 1.5, min: 1, max: 1),
                (item: "small_coin", chance: 0.5, min: 1, max: 2),
                (item: "bone"),
             ]),
            (id: "marksman", name: "Marksman", hp_max: 3, contact_damage: 2, move_interval_ms: 360,
             aggro_range_tiles: 8, attack_range_tiles: 6, telegraph_ms: 520, attack_cooldown_ms: 1400,
             ai: (mode: "sniper", keep_distance_tiles: 3),
             drops: "none"),
        ]"#;

        let table = ArchetypeLoader::parse(catalog).unwrap();
        assert_eq!(table.len(), 2);

        let wolf = table.archetype("wolf").unwrap();
        assert_eq!(wolf.drops, vec![DropEntry::new("small_coin", 0.5, 1, 2)]);

        let marksman = table.archetype("marksman").unwrap();
        assert_eq!(marksman.ai, AiDescriptor::default());
        assert_eq!(marksman.ai.mode, AiMode::Melee);
        assert!(marksman.drops.is_empty());
    }

    #[test]
    fn drop_quantities_default_to_one_but_allow_zero() {
        let catalog = r#"[
            (id: "crate", name: "Crate", hp_max: 1, contact_damage: 0, move_interval_ms: 1000,
             aggro_range_tiles: 0, attack_range_tiles: 0, telegraph_ms: 0, attack_cooldown_ms: 0,
             drops: [
                (item: "small_coin", chance: 1.0),
                (item: "ammo_scrap", chance: 1.0, min: 0, max: 2),
             ]),
        ]"#;

        let table = ArchetypeLoader::parse(catalog).unwrap();
        let drops = &table.archetype("crate").unwrap().drops;
        assert_eq!(drops[0].quantity_bounds(), (1, 1));
        assert_eq!(drops[1].quantity_bounds(), (0, 2));
    }
}
