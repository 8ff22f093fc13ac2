//! World flags and quest progress written by death hooks.
//!
//! Flags gate conditional spawns; quest progress tracks journal state. Both
//! outlive any single map session and are owned by the runtime.
use std::collections::{BTreeMap, BTreeSet};

use crate::env::QuestDefinition;

/// Per-quest journal entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestProgress {
    pub started: bool,
    pub completed: bool,
    pub objectives_done: BTreeSet<String>,
}

impl QuestProgress {
    pub fn is_objective_done(&self, objective: &str) -> bool {
        self.objectives_done.contains(objective)
    }

    fn all_done(&self, quest: &QuestDefinition) -> bool {
        quest
            .objectives
            .iter()
            .all(|objective| self.objectives_done.contains(objective))
    }
}

/// Flags raised so far plus quest progress, keyed by quest id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldProgress {
    flags: BTreeSet<String>,
    quests: BTreeMap<String, QuestProgress>,
    /// Quest currently pinned in the journal, cleared when it completes.
    pub active_quest: Option<String>,
}

impl WorldProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Raises a flag. Returns true if it was not already set.
    pub fn set_flag(&mut self, flag: impl Into<String>) -> bool {
        self.flags.insert(flag.into())
    }

    pub fn clear_flag(&mut self, flag: &str) -> bool {
        self.flags.remove(flag)
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    /// All of `required` raised and none of `forbidden`.
    pub fn satisfies(&self, required: &[String], forbidden: &[String]) -> bool {
        required.iter().all(|flag| self.has_flag(flag))
            && !forbidden.iter().any(|flag| self.has_flag(flag))
    }

    pub fn quest(&self, id: &str) -> Option<&QuestProgress> {
        self.quests.get(id)
    }

    pub fn is_quest_completed(&self, id: &str) -> bool {
        self.quest(id).is_some_and(|progress| progress.completed)
    }

    pub fn start_quest(&mut self, quest: &QuestDefinition) {
        self.entry(quest).started = true;
        if self.active_quest.is_none() {
            self.active_quest = Some(quest.id.clone());
        }
    }

    /// Marks one objective finished and starts the quest if needed.
    ///
    /// Returns true when this call finished the last open objective. The
    /// caller is then expected to run [`complete_quest`](Self::complete_quest)
    /// and grant the reward items.
    pub fn set_objective_done(&mut self, quest: &QuestDefinition, objective: &str) -> bool {
        let progress = self.entry(quest);
        progress.started = true;
        progress.objectives_done.insert(objective.to_string());
        !progress.completed && progress.all_done(quest)
    }

    /// Marks the quest completed and raises its reward flags. Reward items are
    /// returned for the caller to grant; flags are idempotent.
    pub fn complete_quest<'q>(&mut self, quest: &'q QuestDefinition) -> &'q [String] {
        let progress = self.entry(quest);
        progress.started = true;
        progress.completed = true;

        for flag in &quest.rewards.flags {
            self.flags.insert(flag.clone());
        }
        if self.active_quest.as_deref() == Some(quest.id.as_str()) {
            self.active_quest = None;
        }
        &quest.rewards.items
    }

    fn entry(&mut self, quest: &QuestDefinition) -> &mut QuestProgress {
        self.quests.entry(quest.id.clone()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rescue_quest() -> QuestDefinition {
        QuestDefinition::new("rescue", "Rescue")
            .with_objective("reach")
            .with_objective("clear")
            .with_reward_flag("rescued")
            .with_reward_item("pickaxe")
    }

    #[test]
    fn flag_gating_checks_both_lists() {
        let mut progress = WorldProgress::new();
        let required = vec!["gate".to_string()];
        let forbidden = vec!["done".to_string()];

        assert!(!progress.satisfies(&required, &forbidden));
        progress.set_flag("gate");
        assert!(progress.satisfies(&required, &forbidden));
        progress.set_flag("done");
        assert!(!progress.satisfies(&required, &forbidden));
        assert!(progress.satisfies(&[], &[]));
    }

    #[test]
    fn last_objective_signals_completion_once() {
        let quest = rescue_quest();
        let mut progress = WorldProgress::new();

        assert!(!progress.set_objective_done(&quest, "reach"));
        assert!(progress.quest("rescue").unwrap().started);
        assert!(progress.set_objective_done(&quest, "clear"));

        let items = progress.complete_quest(&quest);
        assert_eq!(items, ["pickaxe".to_string()]);
        assert!(progress.has_flag("rescued"));
        assert!(progress.is_quest_completed("rescue"));

        assert!(!progress.set_objective_done(&quest, "clear"));
    }

    #[test]
    fn completing_the_active_quest_unpins_it() {
        let quest = rescue_quest();
        let mut progress = WorldProgress::new();
        progress.start_quest(&quest);
        assert_eq!(progress.active_quest.as_deref(), Some("rescue"));
        progress.complete_quest(&quest);
        assert!(progress.active_quest.is_none());
    }
}
