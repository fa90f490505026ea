//! Event payload types.

use serde::{Deserialize, Serialize};

use crate::core::{QuestId, QuestLineId, StepId};

/// Which gate refused a transition, for the failure-path events.
/// `None` on success-path events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateKind {
    /// Not a gate failure.
    #[default]
    None,
    /// Requirement steps were not all Completed.
    StepRequirements,
    /// One or more conditions refused `can_start`.
    StepStartConditions,
    /// One or more conditions refused `can_complete`.
    StepCompleteConditions,
}

/// Immutable payload handed to external listeners for every transition.
///
/// Carries the full step → quest → quest line context so UI and save
/// code never have to walk the hierarchy themselves, plus derived
/// start flags: `is_quest_start` means the step sits at index 0 of its
/// quest, `is_quest_line_start` additionally that the quest sits at
/// index 0 of its line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestEventInfo {
    /// The quest line containing the step.
    pub quest_line: QuestLineId,

    /// The quest containing the step.
    pub quest: QuestId,

    /// The step the transition was attempted on.
    pub step: StepId,

    /// Whether the step is the first step of its quest.
    pub is_quest_start: bool,

    /// Whether the step is the first step of the first quest of its line.
    pub is_quest_line_start: bool,

    /// Which gate refused the transition, for failure events.
    pub gate: GateKind,

    /// The unmet requirement subset, for `MissingRequirements` events.
    pub requirements: Vec<StepId>,

    /// The failing condition kinds, for the conditions-not-met events.
    pub conditions: Vec<String>,
}

impl QuestEventInfo {
    /// Assemble a success-path payload.
    pub fn new(
        quest_line: QuestLineId,
        quest: QuestId,
        step: StepId,
        is_quest_start: bool,
        is_quest_line_start: bool,
    ) -> Self {
        Self {
            quest_line,
            quest,
            step,
            is_quest_start,
            is_quest_line_start,
            gate: GateKind::None,
            requirements: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Attach an unmet requirement subset (builder pattern).
    #[must_use]
    pub fn with_requirements(mut self, requirements: Vec<StepId>) -> Self {
        self.gate = GateKind::StepRequirements;
        self.requirements = requirements;
        self
    }

    /// Attach the failing condition kinds (builder pattern).
    #[must_use]
    pub fn with_conditions(mut self, gate: GateKind, conditions: Vec<String>) -> Self {
        self.gate = gate;
        self.conditions = conditions;
        self
    }
}

/// The channels of the manager's public event surface. Listener
/// registration on the [`EventHub`](super::EventHub) is keyed by these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestChannel {
    /// A step transitioned to Started.
    StepStart,
    /// A step completed without completing its quest.
    StepComplete,
    /// A step completed its quest without completing the quest line.
    QuestComplete,
    /// A step completed its quest and the quest line with it.
    QuestLineComplete,
    /// A start attempt was refused on unmet requirement steps.
    MissingRequirements,
    /// A start attempt was refused on failing start conditions.
    StartConditionsNotMet,
    /// A completion attempt was refused on failing complete conditions.
    CompleteConditionsNotMet,
}

/// A tagged message for one transition, delivered exactly once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum QuestEvent {
    /// A step transitioned to Started.
    StepStarted(QuestEventInfo),
    /// A step completed; its quest is not yet complete.
    StepCompleted(QuestEventInfo),
    /// A step completed, completing its quest; the line is not yet
    /// complete.
    QuestCompleted(QuestEventInfo),
    /// A step completed, completing its quest and quest line.
    QuestLineCompleted(QuestEventInfo),
    /// Start refused: the payload carries the unmet requirement steps.
    MissingRequirements(QuestEventInfo),
    /// Start refused: the payload carries the failing condition kinds.
    StartConditionsNotMet(QuestEventInfo),
    /// Completion refused: the payload carries the failing condition
    /// kinds.
    CompleteConditionsNotMet(QuestEventInfo),
}

impl QuestEvent {
    /// The channel this event belongs to.
    #[must_use]
    pub fn channel(&self) -> QuestChannel {
        match self {
            Self::StepStarted(_) => QuestChannel::StepStart,
            Self::StepCompleted(_) => QuestChannel::StepComplete,
            Self::QuestCompleted(_) => QuestChannel::QuestComplete,
            Self::QuestLineCompleted(_) => QuestChannel::QuestLineComplete,
            Self::MissingRequirements(_) => QuestChannel::MissingRequirements,
            Self::StartConditionsNotMet(_) => QuestChannel::StartConditionsNotMet,
            Self::CompleteConditionsNotMet(_) => QuestChannel::CompleteConditionsNotMet,
        }
    }

    /// The payload, regardless of variant.
    #[must_use]
    pub fn info(&self) -> &QuestEventInfo {
        match self {
            Self::StepStarted(info)
            | Self::StepCompleted(info)
            | Self::QuestCompleted(info)
            | Self::QuestLineCompleted(info)
            | Self::MissingRequirements(info)
            | Self::StartConditionsNotMet(info)
            | Self::CompleteConditionsNotMet(info) => info,
        }
    }
}
