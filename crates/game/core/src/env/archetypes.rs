//! Archetype catalog definitions and oracle interface.
//!
//! Archetypes are immutable stat and behavior templates shared by every actor
//! spawned from them. The catalog is authored externally (see the content crate)
//! and consumed read-only: the engine never mutates an archetype.
use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumString};

use crate::death::DeathCommand;

/// Broad category of a hostile actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActorKind {
    #[default]
    Animal,
    Human,
    Boss,
}

/// Attack resolution style consumed by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AiMode {
    #[default]
    Melee,
    Ranged,
}

/// Behavior descriptor attached to an archetype.
///
/// `roam_radius_tiles` and `leash_range_tiles` are carried for authoring tools;
/// patrol and chase do not consult them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiDescriptor {
    pub mode: AiMode,
    pub roam_radius_tiles: u32,
    pub leash_range_tiles: u32,
    /// Ranged actors retreat when the player is closer than this.
    pub keep_distance_tiles: u32,
    pub boss: bool,
}

impl AiDescriptor {
    pub const fn melee() -> Self {
        Self {
            mode: AiMode::Melee,
            roam_radius_tiles: 0,
            leash_range_tiles: 0,
            keep_distance_tiles: 0,
            boss: false,
        }
    }

    pub const fn ranged(keep_distance_tiles: u32) -> Self {
        Self {
            mode: AiMode::Ranged,
            keep_distance_tiles,
            ..Self::melee()
        }
    }

    pub const fn is_ranged(&self) -> bool {
        matches!(self.mode, AiMode::Ranged)
    }
}

/// Flight parameters for a projectile. Speed is tiles per second and range is
/// in tiles.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileSpec {
    pub speed: f32,
    pub max_range: f32,
    pub damage: u32,
    pub hitstun_ms: u32,
}

impl ProjectileSpec {
    /// Used by ranged archetypes that do not author a projectile.
    pub const ENEMY_DEFAULT: Self = Self::new(6.0, 7.0, 3, 120);

    pub const fn new(speed: f32, max_range: f32, damage: u32, hitstun_ms: u32) -> Self {
        Self {
            speed,
            max_range,
            damage,
            hitstun_ms,
        }
    }
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self::ENEMY_DEFAULT
    }
}

/// One row of an inclusive drop table. Every row is rolled on its own.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropEntry {
    pub item: String,
    /// Probability in `0.0..=1.0`.
    pub chance: f32,
    /// Defaults to one when omitted. Zero is a valid authored minimum.
    #[cfg_attr(feature = "serde", serde(default = "DropEntry::default_quantity"))]
    pub min: u32,
    #[cfg_attr(feature = "serde", serde(default = "DropEntry::default_quantity"))]
    pub max: u32,
}

impl DropEntry {
    pub fn new(item: impl Into<String>, chance: f32, min: u32, max: u32) -> Self {
        Self {
            item: item.into(),
            chance,
            min,
            max,
        }
    }

    /// A drop that always yields exactly one item.
    pub fn guaranteed(item: impl Into<String>) -> Self {
        Self::new(item, 1.0, 1, 1)
    }

    #[cfg(feature = "serde")]
    fn default_quantity() -> u32 {
        1
    }

    /// Quantity bounds with `max` raised to `min` when authored backwards.
    pub fn quantity_bounds(&self) -> (u32, u32) {
        (self.min, self.max.max(self.min))
    }
}

/// Immutable actor template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Archetype {
    pub id: String,
    pub name: String,
    pub kind: ActorKind,
    pub hp_max: u32,
    pub contact_damage: u32,
    pub move_interval_ms: u32,
    pub aggro_range_tiles: u32,
    pub attack_range_tiles: u32,
    pub telegraph_ms: u32,
    pub attack_cooldown_ms: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase2_at_hp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub projectile: Option<ProjectileSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drops: Vec<DropEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: AiDescriptor,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_death: Vec<DeathCommand>,
}

impl Archetype {
    /// Create a builder seeded with the given id and a placeholder stat line.
    pub fn builder(id: impl Into<String>) -> ArchetypeBuilder {
        ArchetypeBuilder::new(id)
    }

    pub fn is_boss(&self) -> bool {
        self.ai.boss || matches!(self.kind, ActorKind::Boss)
    }

    /// Returns true when `hp` is at or below the second-phase threshold.
    pub fn in_second_phase(&self, hp: u32) -> bool {
        self.phase2_at_hp.is_some_and(|threshold| hp <= threshold)
    }
}

/// Builder for constructing archetypes in code.
#[derive(Clone, Debug)]
pub struct ArchetypeBuilder {
    archetype: Archetype,
}

impl ArchetypeBuilder {
    fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            archetype: Archetype {
                name: id.clone(),
                id,
                kind: ActorKind::Animal,
                hp_max: 3,
                contact_damage: 1,
                move_interval_ms: 300,
                aggro_range_tiles: 5,
                attack_range_tiles: 1,
                telegraph_ms: 200,
                attack_cooldown_ms: 1000,
                phase2_at_hp: None,
                projectile: None,
                drops: Vec::new(),
                ai: AiDescriptor::melee(),
                on_death: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.archetype.name = name.into();
        self
    }

    pub fn kind(mut self, kind: ActorKind) -> Self {
        self.archetype.kind = kind;
        self
    }

    pub fn hp(mut self, hp_max: u32) -> Self {
        self.archetype.hp_max = hp_max;
        self
    }

    pub fn contact_damage(mut self, damage: u32) -> Self {
        self.archetype.contact_damage = damage;
        self
    }

    pub fn move_interval(mut self, ms: u32) -> Self {
        self.archetype.move_interval_ms = ms;
        self
    }

    pub fn aggro(mut self, tiles: u32) -> Self {
        self.archetype.aggro_range_tiles = tiles;
        self
    }

    pub fn attack_range(mut self, tiles: u32) -> Self {
        self.archetype.attack_range_tiles = tiles;
        self
    }

    pub fn telegraph(mut self, ms: u32) -> Self {
        self.archetype.telegraph_ms = ms;
        self
    }

    pub fn cooldown(mut self, ms: u32) -> Self {
        self.archetype.attack_cooldown_ms = ms;
        self
    }

    pub fn phase2_at(mut self, hp: u32) -> Self {
        self.archetype.phase2_at_hp = Some(hp);
        self
    }

    pub fn projectile(mut self, spec: ProjectileSpec) -> Self {
        self.archetype.projectile = Some(spec);
        self
    }

    pub fn drop(mut self, entry: DropEntry) -> Self {
        self.archetype.drops.push(entry);
        self
    }

    pub fn ai(mut self, ai: AiDescriptor) -> Self {
        self.archetype.ai = ai;
        self
    }

    pub fn on_death(mut self, command: DeathCommand) -> Self {
        self.archetype.on_death.push(command);
        self
    }

    pub fn build(self) -> Archetype {
        self.archetype
    }
}

/// Oracle providing archetype templates by id.
pub trait ArchetypeOracle: Send + Sync {
    fn archetype(&self, id: &str) -> Option<&Archetype>;

    fn contains(&self, id: &str) -> bool {
        self.archetype(id).is_some()
    }
}

/// In-memory archetype catalog keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchetypeTable {
    entries: BTreeMap<String, Archetype>,
}

impl ArchetypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an archetype, returning the previous entry with the same id.
    pub fn insert(&mut self, archetype: Archetype) -> Option<Archetype> {
        self.entries.insert(archetype.id.clone(), archetype)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.entries.values()
    }
}

impl FromIterator<Archetype> for ArchetypeTable {
    fn from_iter<I: IntoIterator<Item = Archetype>>(iter: I) -> Self {
        let mut table = Self::new();
        for archetype in iter {
            table.insert(archetype);
        }
        table
    }
}

impl ArchetypeOracle for ArchetypeTable {
    fn archetype(&self, id: &str) -> Option<&Archetype> {
        self.entries.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_kind_parses_case_insensitively() {
        assert_eq!("BOSS".parse::<ActorKind>().unwrap(), ActorKind::Boss);
        assert_eq!(AiMode::Ranged.as_ref(), "ranged");
    }

    #[test]
    fn quantity_bounds_never_invert() {
        assert_eq!(DropEntry::new("coin", 1.0, 3, 1).quantity_bounds(), (3, 3));
        assert_eq!(DropEntry::new("coin", 1.0, 0, 0).quantity_bounds(), (0, 0));
        assert_eq!(DropEntry::new("coin", 1.0, 0, 2).quantity_bounds(), (0, 2));
        assert_eq!(DropEntry::new("coin", 1.0, 1, 2).quantity_bounds(), (1, 2));
    }

    #[test]
    fn zero_minimum_can_roll_nothing() {
        use crate::env::{CombatRng, PcgRng};

        let entry = DropEntry::new("coin", 1.0, 0, 2);
        let (min, max) = entry.quantity_bounds();
        let mut rng = PcgRng::new(17);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let quantity = rng.range_inclusive(min, max);
            assert!(quantity <= 2);
            seen[quantity as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn phase_threshold_is_inclusive() {
        let boss = Archetype::builder("overseer").hp(8).phase2_at(4).build();
        assert!(!boss.in_second_phase(5));
        assert!(boss.in_second_phase(4));
        assert!(boss.in_second_phase(0));

        let wolf = Archetype::builder("wolf").build();
        assert!(!wolf.in_second_phase(0));
    }

    #[test]
    fn table_lookup_by_id() {
        let table: ArchetypeTable = [
            Archetype::builder("wolf").build(),
            Archetype::builder("bandit").build(),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 2);
        assert!(table.contains("wolf"));
        assert!(table.archetype("ghost").is_none());
    }
}
