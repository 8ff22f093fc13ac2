use crate::engine::CombatContext;
use crate::env::QuestDefinition;
use crate::event::CombatEvent;

/// One step of an archetype's on-death hook.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeathCommand {
    /// Raise a world flag.
    SetFlag(String),
    /// Mark every objective of a quest done, completing it.
    CompleteQuest(String),
    /// Mark one objective done. Without a quest id the first quest in the
    /// catalog that lists the objective is used.
    CompleteObjective {
        quest: Option<String>,
        objective: String,
    },
}

impl DeathCommand {
    /// Builds the command list for a hook authored as three optional fields.
    ///
    /// Commands come out in the fixed order set-flag, complete-quest,
    /// complete-objective. When both a quest and an objective are given the
    /// objective is resolved against that quest.
    pub fn from_hook(
        set_flag: Option<String>,
        complete_quest: Option<String>,
        complete_objective: Option<String>,
    ) -> Vec<DeathCommand> {
        let mut commands = Vec::new();
        if let Some(flag) = set_flag {
            commands.push(DeathCommand::SetFlag(flag));
        }
        if let Some(quest) = complete_quest.clone() {
            commands.push(DeathCommand::CompleteQuest(quest));
        }
        if let Some(objective) = complete_objective {
            commands.push(DeathCommand::CompleteObjective {
                quest: complete_quest,
                objective,
            });
        }
        commands
    }
}

/// Interprets hook commands in order. Unresolvable quests and objectives are
/// skipped.
pub fn dispatch(ctx: &mut CombatContext<'_>, commands: &[DeathCommand]) {
    let quests = ctx.env.quests();

    for command in commands {
        match command {
            DeathCommand::SetFlag(flag) => raise_flag(ctx, flag),
            DeathCommand::CompleteQuest(id) => {
                if let Some(quest) = quests.quest(id) {
                    for objective in &quest.objectives {
                        mark_objective(ctx, quest, objective);
                    }
                }
            }
            DeathCommand::CompleteObjective { quest, objective } => {
                let target = match quest {
                    Some(id) => quests.quest(id),
                    None => quests.quest_with_objective(objective),
                };
                if let Some(quest) = target {
                    mark_objective(ctx, quest, objective);
                }
            }
        }
    }
}

fn raise_flag(ctx: &mut CombatContext<'_>, flag: &str) {
    if ctx.progress.set_flag(flag) {
        ctx.report.push(CombatEvent::FlagRaised {
            flag: flag.to_string(),
        });
    }
}

fn mark_objective(ctx: &mut CombatContext<'_>, quest: &QuestDefinition, objective: &str) {
    let finished = ctx.progress.set_objective_done(quest, objective);
    ctx.report.push(CombatEvent::ObjectiveCompleted {
        quest: quest.id.clone(),
        objective: objective.to_string(),
    });
    if finished {
        finish_quest(ctx, quest);
    }
}

/// Completes a quest: reward flags are raised and reward items granted once.
fn finish_quest(ctx: &mut CombatContext<'_>, quest: &QuestDefinition) {
    let fresh: Vec<&String> = quest
        .rewards
        .flags
        .iter()
        .filter(|flag| !ctx.progress.has_flag(flag))
        .collect();

    let items = ctx.progress.complete_quest(quest);
    ctx.report.push(CombatEvent::QuestCompleted {
        quest: quest.id.clone(),
    });
    for flag in fresh {
        ctx.report.push(CombatEvent::FlagRaised { flag: flag.clone() });
    }
    for item in items {
        if ctx.inventory.grant_once(item) {
            ctx.report.push(CombatEvent::ItemGranted {
                item: item.clone(),
                quantity: 1,
            });
        }
    }
}
