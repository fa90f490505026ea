//! The atomic progression unit.

use smallvec::SmallVec;

use crate::conditions::QuestCondition;
use crate::core::{StepId, StepState};
use crate::rewards::QuestReward;

/// Signal produced by a step transition attempt.
///
/// Failure variants carry the complete unmet subset - every failing
/// condition or requirement, not just the first one hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepSignal {
    /// The step transitioned to Started.
    Started,
    /// The step transitioned to Completed.
    Completed,
    /// Start was refused: these requirement steps are not Completed.
    MissingRequirements(Vec<StepId>),
    /// Start was refused: these condition kinds returned false from
    /// `can_start`.
    StartConditionsNotMet(Vec<String>),
    /// Completion was refused: these condition kinds returned false
    /// from `can_complete`.
    CompleteConditionsNotMet(Vec<String>),
}

/// A single step of a quest, from its starting point to its goal.
///
/// Starting a quest always corresponds to step 0, so a quest giver
/// holds step 0 of a quest and validates it to start the quest.
///
/// The step owns its own state machine: NotStarted → Started →
/// Completed, forward-only except for the restore path
/// ([`init_as`](Self::init_as)). Transitions are gated twice over:
/// conditions are re-checked at each transition, and starting
/// additionally demands every requirement step be Completed. Failed
/// gates leave the state untouched.
#[derive(Debug)]
pub struct Step {
    id: StepId,
    display_name: String,
    description: String,
    state: StepState,
    requirements: SmallVec<[StepId; 4]>,
    conditions: Vec<Box<dyn QuestCondition>>,
    rewards: Vec<Box<dyn QuestReward>>,
}

impl Step {
    /// Create a step in the NotStarted state with no gates or rewards.
    pub fn new(id: impl Into<StepId>) -> Self {
        let id = id.into();
        Self {
            display_name: id.as_str().to_owned(),
            id,
            description: String::new(),
            state: StepState::NotStarted,
            requirements: SmallVec::new(),
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

    /// Add a requirement step that must be Completed before this step
    /// may start (builder pattern).
    #[must_use]
    pub fn with_requirement(mut self, id: impl Into<StepId>) -> Self {
        self.requirements.push(id.into());
        self
    }

    /// Add a condition checked on both start and completion
    /// (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Box<dyn QuestCondition>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a reward granted when this step completes (builder pattern).
    #[must_use]
    pub fn with_reward(mut self, reward: Box<dyn QuestReward>) -> Self {
        self.rewards.push(reward);
        self
    }

    /// The step's stable id.
    #[must_use]
    pub fn id(&self) -> &StepId {
        &self.id
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Author-provided description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> StepState {
        self.state
    }

    /// Whether the step is Started.
    #[must_use]
    pub fn started(&self) -> bool {
        self.state == StepState::Started
    }

    /// Whether the step is Completed.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.state == StepState::Completed
    }

    /// Steps that must be Completed before this one may start.
    #[must_use]
    pub fn requirements(&self) -> &[StepId] {
        &self.requirements
    }

    /// The step's reward list.
    #[must_use]
    pub fn rewards(&self) -> &[Box<dyn QuestReward>] {
        &self.rewards
    }

    /// Kinds of every condition whose `can_start` currently fails.
    /// All conditions are evaluated; the full failing subset is returned.
    #[must_use]
    pub fn failing_start_conditions(&self) -> Vec<String> {
        self.conditions
            .iter()
            .filter(|c| !c.can_start())
            .map(|c| c.kind().to_owned())
            .collect()
    }

    /// Kinds of every condition whose `can_complete` currently fails.
    #[must_use]
    pub fn failing_complete_conditions(&self) -> Vec<String> {
        self.conditions
            .iter()
            .filter(|c| !c.can_complete())
            .map(|c| c.kind().to_owned())
            .collect()
    }

    /// Whether every condition's `can_start` passes right now. Does not
    /// look at requirements - those need the whole forest and are
    /// checked by the manager.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.conditions.iter().all(|c| c.can_start())
    }

    /// Attempt the NotStarted → Started transition.
    ///
    /// `unmet_requirements` is the subset of [`requirements`](Self::requirements)
    /// not currently Completed, computed by the caller against the full
    /// hierarchy. Conditions gate first, then requirements; either
    /// failure leaves the state untouched and reports the full subset.
    pub fn start(&mut self, unmet_requirements: Vec<StepId>) -> StepSignal {
        let failing = self.failing_start_conditions();
        if !failing.is_empty() {
            return StepSignal::StartConditionsNotMet(failing);
        }

        if !unmet_requirements.is_empty() {
            return StepSignal::MissingRequirements(unmet_requirements);
        }

        self.state = StepState::Started;
        StepSignal::Started
    }

    /// Attempt the transition to Completed.
    ///
    /// Completing a step that the caller hasn't started (or has already
    /// completed) is the caller's to prevent; the step only enforces
    /// its complete conditions.
    pub fn complete(&mut self) -> StepSignal {
        let failing = self.failing_complete_conditions();
        if !failing.is_empty() {
            return StepSignal::CompleteConditionsNotMet(failing);
        }

        self.state = StepState::Completed;
        StepSignal::Completed
    }

    /// Set the state directly without firing a signal or evaluating any
    /// gate. Restore-only path: used when loading save data so that
    /// historical transitions are not replayed.
    pub fn init_as(&mut self, state: StepState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{Always, Never};

    #[test]
    fn test_start_with_no_gates() {
        let mut step = Step::new("QL0_Q0_S0");
        assert_eq!(step.state(), StepState::NotStarted);

        let signal = step.start(Vec::new());
        assert_eq!(signal, StepSignal::Started);
        assert!(step.started());
    }

    #[test]
    fn test_start_blocked_by_conditions_reports_all() {
        let mut step = Step::new("QL0_Q0_S0")
            .with_condition(Box::new(Never))
            .with_condition(Box::new(Always))
            .with_condition(Box::new(Never));

        let signal = step.start(Vec::new());
        assert_eq!(
            signal,
            StepSignal::StartConditionsNotMet(vec!["never".into(), "never".into()])
        );
        assert_eq!(step.state(), StepState::NotStarted);
    }

    #[test]
    fn test_start_blocked_by_requirements() {
        let mut step = Step::new("QL0_Q0_S1").with_requirement("QL0_Q0_S0");

        let signal = step.start(vec![StepId::from("QL0_Q0_S0")]);
        assert_eq!(
            signal,
            StepSignal::MissingRequirements(vec![StepId::from("QL0_Q0_S0")])
        );
        assert_eq!(step.state(), StepState::NotStarted);
    }

    #[test]
    fn test_conditions_gate_before_requirements() {
        let mut step = Step::new("QL0_Q0_S1")
            .with_requirement("QL0_Q0_S0")
            .with_condition(Box::new(Never));

        let signal = step.start(vec![StepId::from("QL0_Q0_S0")]);
        assert!(matches!(signal, StepSignal::StartConditionsNotMet(_)));
    }

    #[test]
    fn test_complete() {
        let mut step = Step::new("QL0_Q0_S0");
        step.start(Vec::new());

        assert_eq!(step.complete(), StepSignal::Completed);
        assert!(step.completed());
    }

    #[test]
    fn test_complete_blocked_by_conditions() {
        let mut step = Step::new("QL0_Q0_S0").with_condition(Box::new(Never));
        step.init_as(StepState::Started);

        let signal = step.complete();
        assert_eq!(
            signal,
            StepSignal::CompleteConditionsNotMet(vec!["never".into()])
        );
        assert_eq!(step.state(), StepState::Started);
    }

    #[test]
    fn test_init_as_bypasses_gates() {
        let mut step = Step::new("QL0_Q0_S0").with_condition(Box::new(Never));
        step.init_as(StepState::Completed);
        assert!(step.completed());

        step.init_as(StepState::NotStarted);
        assert_eq!(step.state(), StepState::NotStarted);
    }
}
