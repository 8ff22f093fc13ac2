//! Quest definitions consulted by death hooks.

/// Flags raised and items granted when a quest completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestRewards {
    pub flags: Vec<String>,
    pub items: Vec<String>,
}

/// Read-only quest template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestDefinition {
    pub id: String,
    pub title: String,
    /// Objective ids in journal order.
    pub objectives: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewards: QuestRewards,
}

impl QuestDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            objectives: Vec::new(),
            rewards: QuestRewards::default(),
        }
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objectives.push(objective.into());
        self
    }

    pub fn with_reward_flag(mut self, flag: impl Into<String>) -> Self {
        self.rewards.flags.push(flag.into());
        self
    }

    pub fn with_reward_item(mut self, item: impl Into<String>) -> Self {
        self.rewards.items.push(item.into());
        self
    }

    pub fn has_objective(&self, objective: &str) -> bool {
        self.objectives.iter().any(|id| id == objective)
    }
}

/// Oracle providing quest definitions.
pub trait QuestOracle: Send + Sync {
    fn quest(&self, id: &str) -> Option<&QuestDefinition>;

    /// First quest, in catalog order, that lists `objective`.
    fn quest_with_objective(&self, objective: &str) -> Option<&QuestDefinition>;
}

/// Quest catalog preserving authoring order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestTable {
    quests: Vec<QuestDefinition>,
}

impl QuestTable {
    pub fn new(quests: Vec<QuestDefinition>) -> Self {
        Self { quests }
    }

    pub fn push(&mut self, quest: QuestDefinition) {
        self.quests.push(quest);
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestDefinition> {
        self.quests.iter()
    }
}

impl QuestOracle for QuestTable {
    fn quest(&self, id: &str) -> Option<&QuestDefinition> {
        self.quests.iter().find(|quest| quest.id == id)
    }

    fn quest_with_objective(&self, objective: &str) -> Option<&QuestDefinition> {
        self.quests.iter().find(|quest| quest.has_objective(objective))
    }
}
