//! Definition types and registry-backed building.

use serde::{Deserialize, Serialize};

use crate::conditions::{ConditionRegistry, ConditionSpec};
use crate::core::{QuestError, QuestId, QuestLineId, StepId};
use crate::progress::{Quest, QuestLine, Step};
use crate::rewards::{RewardRegistry, RewardSpec};

/// Serializable description of a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// The step's stable id.
    pub id: StepId,

    /// Human-readable name. Defaults to the id when empty.
    #[serde(default)]
    pub display_name: String,

    /// Author-provided description.
    #[serde(default)]
    pub description: String,

    /// Steps that must be Completed before this one may start.
    #[serde(default)]
    pub requirements: Vec<StepId>,

    /// Conditions checked on start and completion, in order.
    #[serde(default)]
    pub conditions: Vec<ConditionSpec>,

    /// Rewards granted when the step completes, in order.
    #[serde(default)]
    pub rewards: Vec<RewardSpec>,
}

impl StepDefinition {
    /// Create a bare step definition.
    pub fn new(id: impl Into<StepId>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            description: String::new(),
            requirements: Vec::new(),
            conditions: Vec::new(),
            rewards: Vec::new(),
        }
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a requirement step id (builder pattern).
    #[must_use]
    pub fn with_requirement(mut self, id: impl Into<StepId>) -> Self {
        self.requirements.push(id.into());
        self
    }

    /// Add a condition spec (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, spec: ConditionSpec) -> Self {
        self.conditions.push(spec);
        self
    }

    /// Add a reward spec (builder pattern).
    #[must_use]
    pub fn with_reward(mut self, spec: RewardSpec) -> Self {
        self.rewards.push(spec);
        self
    }

    /// Resolve the specs through the registries into a live step.
    pub fn build(
        &self,
        conditions: &ConditionRegistry,
        rewards: &RewardRegistry,
    ) -> Result<Step, QuestError> {
        let mut step = Step::new(self.id.clone()).with_description(self.description.clone());
        if !self.display_name.is_empty() {
            step = step.with_display_name(self.display_name.clone());
        }
        for requirement in &self.requirements {
            step = step.with_requirement(requirement.clone());
        }
        for spec in &self.conditions {
            step = step.with_condition(conditions.build(spec)?);
        }
        for spec in &self.rewards {
            step = step.with_reward(rewards.build(spec)?);
        }
        Ok(step)
    }
}

/// Serializable description of a quest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestDefinition {
    /// The quest's stable id.
    pub id: QuestId,

    /// Human-readable name. Defaults to the id when empty.
    #[serde(default)]
    pub display_name: String,

    /// Author-provided description.
    #[serde(default)]
    pub description: String,

    /// The ordered steps; index 0 starts the quest, the last index
    /// completes it.
    #[serde(default)]
    pub steps: Vec<StepDefinition>,

    /// Rewards granted when the quest completes.
    #[serde(default)]
    pub rewards: Vec<RewardSpec>,
}

impl QuestDefinition {
    /// Create a bare quest definition.
    pub fn new(id: impl Into<QuestId>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            description: String::new(),
            steps: Vec::new(),
            rewards: Vec::new(),
        }
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a step definition (builder pattern).
    #[must_use]
    pub fn with_step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    /// Add a reward spec (builder pattern).
    #[must_use]
    pub fn with_reward(mut self, spec: RewardSpec) -> Self {
        self.rewards.push(spec);
        self
    }

    /// Resolve into a live quest.
    pub fn build(
        &self,
        conditions: &ConditionRegistry,
        rewards: &RewardRegistry,
    ) -> Result<Quest, QuestError> {
        let steps = self
            .steps
            .iter()
            .map(|s| s.build(conditions, rewards))
            .collect::<Result<Vec<_>, _>>()?;

        let mut quest =
            Quest::new(self.id.clone(), steps).with_description(self.description.clone());
        if !self.display_name.is_empty() {
            quest = quest.with_display_name(self.display_name.clone());
        }
        for spec in &self.rewards {
            quest = quest.with_reward(rewards.build(spec)?);
        }
        Ok(quest)
    }
}

/// Serializable description of a quest line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestLineDefinition {
    /// The quest line's stable id.
    pub id: QuestLineId,

    /// Human-readable name. Defaults to the id when empty.
    #[serde(default)]
    pub display_name: String,

    /// The ordered quests.
    #[serde(default)]
    pub quests: Vec<QuestDefinition>,

    /// Rewards granted when the line completes.
    #[serde(default)]
    pub rewards: Vec<RewardSpec>,
}

impl QuestLineDefinition {
    /// Create a bare quest line definition.
    pub fn new(id: impl Into<QuestLineId>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            quests: Vec::new(),
            rewards: Vec::new(),
        }
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Append a quest definition (builder pattern).
    #[must_use]
    pub fn with_quest(mut self, quest: QuestDefinition) -> Self {
        self.quests.push(quest);
        self
    }

    /// Add a reward spec (builder pattern).
    #[must_use]
    pub fn with_reward(mut self, spec: RewardSpec) -> Self {
        self.rewards.push(spec);
        self
    }

    /// Resolve into a live quest line.
    pub fn build(
        &self,
        conditions: &ConditionRegistry,
        rewards: &RewardRegistry,
    ) -> Result<QuestLine, QuestError> {
        let quests = self
            .quests
            .iter()
            .map(|q| q.build(conditions, rewards))
            .collect::<Result<Vec<_>, _>>()?;

        let mut line = QuestLine::new(self.id.clone(), quests);
        if !self.display_name.is_empty() {
            line = line.with_display_name(self.display_name.clone());
        }
        for spec in &self.rewards {
            line = line.with_reward(rewards.build(spec)?);
        }
        Ok(line)
    }
}
