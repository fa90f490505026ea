//! Quest: ordered steps with one-shot completion fan-in.

use crate::core::{QuestId, StepId};
use crate::rewards::QuestReward;

use super::roster::SignalRoster;
use super::step::Step;

/// Signal produced when a quest consumes a step-completed delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestSignal {
    /// A step completed but other steps remain.
    Progress,
    /// The completing step was the last incomplete one - the quest is
    /// now complete.
    Completed,
}

/// An ordered collection of steps under a quest line.
///
/// Step order is semantically significant: index 0 is the quest-start
/// step, the last index the quest-completion step. Completion is
/// derived - a quest is complete iff every step is Completed - and is
/// recomputed on every query rather than cached, so it can never drift
/// from the step states after a restore or reconfiguration.
#[derive(Debug)]
pub struct Quest {
    id: QuestId,
    display_name: String,
    description: String,
    steps: Vec<Step>,
    rewards: Vec<Box<dyn QuestReward>>,
    roster: SignalRoster<StepId>,
}

impl Quest {
    /// Create a quest over the given ordered steps.
    pub fn new(id: impl Into<QuestId>, steps: Vec<Step>) -> Self {
        let id = id.into();
        Self {
            display_name: id.as_str().to_owned(),
            id,
            description: String::new(),
            steps,
            rewards: Vec::new(),
            roster: SignalRoster::new(),
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

    /// Add a quest-level reward (builder pattern).
    #[must_use]
    pub fn with_reward(mut self, reward: Box<dyn QuestReward>) -> Self {
        self.rewards.push(reward);
        self
    }

    /// The quest's stable id.
    #[must_use]
    pub fn id(&self) -> &QuestId {
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

    /// The ordered step list.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Mutable access to the ordered step list.
    pub fn steps_mut(&mut self) -> &mut [Step] {
        &mut self.steps
    }

    /// The quest's reward list.
    #[must_use]
    pub fn rewards(&self) -> &[Box<dyn QuestReward>] {
        &self.rewards
    }

    /// Whether every step is Completed. Always recomputed, never cached.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.steps.iter().all(Step::completed)
    }

    /// Arm the one-shot completion roster for every incomplete step,
    /// discarding any prior registrations so re-initialization (after a
    /// restore) reproduces the steady-state subscriptions a live
    /// playthrough would reach. Leaves nothing armed when the quest is
    /// already complete.
    pub fn initialize(&mut self) {
        self.roster.disarm_all();

        if self.completed() {
            return;
        }

        for step in &self.steps {
            if !step.completed() {
                self.roster.arm(step.id().clone());
            }
        }
    }

    /// Consume the one-shot registration for a completed step and
    /// recompute quest completion.
    ///
    /// Returns `None` when the registration was not armed (already
    /// consumed, or the step is not one the quest is listening to) -
    /// that delivery must produce no quest-level signal.
    pub fn handle_step_completed(&mut self, step: &StepId) -> Option<QuestSignal> {
        if !self.roster.consume(step) {
            return None;
        }

        if self.completed() {
            Some(QuestSignal::Completed)
        } else {
            Some(QuestSignal::Progress)
        }
    }

    /// Replace the step list, disarming every live registration first
    /// so old subscriptions can't fire against the new content, then
    /// re-initialize.
    pub fn set_steps(&mut self, steps: Vec<Step>) {
        self.roster.disarm_all();
        self.steps = steps;
        self.initialize();
    }

    /// Index of a step within the quest, or `None` if it isn't here.
    #[must_use]
    pub fn step_index(&self, step: &StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id() == step)
    }

    /// Look up a step by id.
    #[must_use]
    pub fn get_step(&self, step: &StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id() == step)
    }

    /// Mutable step lookup by id.
    pub fn get_step_mut(&mut self, step: &StepId) -> Option<&mut Step> {
        self.steps.iter_mut().find(|s| s.id() == step)
    }

    /// The quest-start step (index 0).
    #[must_use]
    pub fn first_step(&self) -> Option<&Step> {
        self.steps.first()
    }

    /// The quest-completion step (last index).
    #[must_use]
    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Whether every step at a lower index than the given step is
    /// Completed. Index 0 is trivially true; an unknown step is false.
    /// Used by external gating UI.
    #[must_use]
    pub fn all_previous_steps_completed(&self, step: &StepId) -> bool {
        match self.step_index(step) {
            None => false,
            Some(idx) => self.steps[..idx].iter().all(Step::completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepState;

    fn quest(step_ids: &[&str]) -> Quest {
        let steps = step_ids.iter().map(|id| Step::new(*id)).collect();
        let mut quest = Quest::new("QL0_Q0", steps);
        quest.initialize();
        quest
    }

    #[test]
    fn test_completed_is_recomputed() {
        let mut quest = quest(&["S0", "S1"]);
        assert!(!quest.completed());

        quest.get_step_mut(&"S0".into()).unwrap().complete();
        assert!(!quest.completed());

        quest.get_step_mut(&"S1".into()).unwrap().complete();
        assert!(quest.completed());
    }

    #[test]
    fn test_fan_in_progress_then_completed() {
        let mut quest = quest(&["S0", "S1"]);

        quest.get_step_mut(&"S0".into()).unwrap().complete();
        assert_eq!(
            quest.handle_step_completed(&"S0".into()),
            Some(QuestSignal::Progress)
        );

        quest.get_step_mut(&"S1".into()).unwrap().complete();
        assert_eq!(
            quest.handle_step_completed(&"S1".into()),
            Some(QuestSignal::Completed)
        );
    }

    #[test]
    fn test_second_delivery_is_consumed_silently() {
        let mut quest = quest(&["S0", "S1"]);

        quest.get_step_mut(&"S0".into()).unwrap().complete();
        assert!(quest.handle_step_completed(&"S0".into()).is_some());
        assert!(quest.handle_step_completed(&"S0".into()).is_none());
    }

    #[test]
    fn test_out_of_order_completion() {
        let mut quest = quest(&["S0", "S1", "S2"]);

        quest.get_step_mut(&"S2".into()).unwrap().complete();
        assert_eq!(
            quest.handle_step_completed(&"S2".into()),
            Some(QuestSignal::Progress)
        );

        quest.get_step_mut(&"S0".into()).unwrap().complete();
        assert_eq!(
            quest.handle_step_completed(&"S0".into()),
            Some(QuestSignal::Progress)
        );

        quest.get_step_mut(&"S1".into()).unwrap().complete();
        assert_eq!(
            quest.handle_step_completed(&"S1".into()),
            Some(QuestSignal::Completed)
        );
    }

    #[test]
    fn test_initialize_skips_completed_steps() {
        let mut steps = vec![Step::new("S0"), Step::new("S1")];
        steps[0].init_as(StepState::Completed);

        let mut quest = Quest::new("QL0_Q0", steps);
        quest.initialize();

        // Not listening to S0: its historical completion must not count again.
        assert!(quest.handle_step_completed(&"S0".into()).is_none());

        quest.get_step_mut(&"S1".into()).unwrap().complete();
        assert_eq!(
            quest.handle_step_completed(&"S1".into()),
            Some(QuestSignal::Completed)
        );
    }

    #[test]
    fn test_initialize_on_completed_quest_is_noop() {
        let mut steps = vec![Step::new("S0")];
        steps[0].init_as(StepState::Completed);

        let mut quest = Quest::new("QL0_Q0", steps);
        quest.initialize();
        assert!(quest.handle_step_completed(&"S0".into()).is_none());
    }

    #[test]
    fn test_set_steps_rewires_without_leaking() {
        let mut quest = quest(&["S0"]);

        quest.set_steps(vec![Step::new("T0"), Step::new("T1")]);

        // Old registration must be gone.
        assert!(quest.handle_step_completed(&"S0".into()).is_none());

        quest.get_step_mut(&"T0".into()).unwrap().complete();
        assert_eq!(
            quest.handle_step_completed(&"T0".into()),
            Some(QuestSignal::Progress)
        );
    }

    #[test]
    fn test_all_previous_steps_completed() {
        let mut quest = quest(&["S0", "S1", "S2"]);

        assert!(quest.all_previous_steps_completed(&"S0".into()));
        assert!(!quest.all_previous_steps_completed(&"S2".into()));
        assert!(!quest.all_previous_steps_completed(&"SX".into()));

        quest.get_step_mut(&"S0".into()).unwrap().complete();
        assert!(quest.all_previous_steps_completed(&"S1".into()));
        assert!(!quest.all_previous_steps_completed(&"S2".into()));
    }
}
