//! Quest line: ordered quests with one-shot completion fan-in.

use crate::core::{QuestId, QuestLineId, StepId};
use crate::rewards::QuestReward;

use super::quest::Quest;
use super::roster::SignalRoster;

/// Signal produced when a quest line consumes a quest-completed delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestLineSignal {
    /// A quest completed but other quests remain.
    Progress,
    /// The completing quest was the last incomplete one - the line is
    /// now complete.
    Completed,
}

/// A series of quests meant to be done in succession.
///
/// Mirrors [`Quest`]'s fan-in one level up: the line listens once to
/// each incomplete quest and recomputes its own completion - always
/// derived from the quests, never cached - when a delivery is consumed.
#[derive(Debug)]
pub struct QuestLine {
    id: QuestLineId,
    display_name: String,
    quests: Vec<Quest>,
    rewards: Vec<Box<dyn QuestReward>>,
    roster: SignalRoster<QuestId>,
}

impl QuestLine {
    /// Create a quest line over the given ordered quests.
    pub fn new(id: impl Into<QuestLineId>, quests: Vec<Quest>) -> Self {
        let id = id.into();
        Self {
            display_name: id.as_str().to_owned(),
            id,
            quests,
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

    /// Add a questline-level reward (builder pattern).
    #[must_use]
    pub fn with_reward(mut self, reward: Box<dyn QuestReward>) -> Self {
        self.rewards.push(reward);
        self
    }

    /// The quest line's stable id.
    #[must_use]
    pub fn id(&self) -> &QuestLineId {
        &self.id
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The ordered quest list.
    #[must_use]
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Mutable access to the ordered quest list.
    pub fn quests_mut(&mut self) -> &mut [Quest] {
        &mut self.quests
    }

    /// The quest line's reward list.
    #[must_use]
    pub fn rewards(&self) -> &[Box<dyn QuestReward>] {
        &self.rewards
    }

    /// Whether every quest is Completed. Always recomputed, never cached.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.quests.iter().all(Quest::completed)
    }

    /// Total step count across all quests.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.quests.iter().map(|q| q.steps().len()).sum()
    }

    /// Arm the one-shot completion roster for every incomplete quest
    /// and cascade [`Quest::initialize`] so the whole subtree reaches
    /// the same steady-state subscriptions a live playthrough would.
    /// Prior registrations are discarded first, making
    /// re-initialization after a restore safe. Leaves nothing armed
    /// when the line is already complete.
    pub fn initialize(&mut self) {
        self.roster.disarm_all();

        // Cascade to every quest: completed ones still need their stale
        // registrations discarded.
        for quest in &mut self.quests {
            quest.initialize();
        }

        if self.completed() {
            return;
        }

        let pending: Vec<QuestId> = self
            .quests
            .iter()
            .filter(|q| !q.completed())
            .map(|q| q.id().clone())
            .collect();

        for id in pending {
            self.roster.arm(id);
        }
    }

    /// Consume the one-shot registration for a completed quest and
    /// recompute line completion.
    ///
    /// Returns `None` when the registration was not armed - that
    /// delivery must produce no line-level signal.
    pub fn handle_quest_completed(&mut self, quest: &QuestId) -> Option<QuestLineSignal> {
        if !self.roster.consume(quest) {
            return None;
        }

        if self.completed() {
            Some(QuestLineSignal::Completed)
        } else {
            Some(QuestLineSignal::Progress)
        }
    }

    /// Replace the quest list, disarming every live registration first
    /// so a runtime re-configuration can't leak subscriptions or
    /// double-fire, then re-initialize.
    pub fn set_quests(&mut self, quests: Vec<Quest>) {
        self.roster.disarm_all();
        self.quests = quests;
        self.initialize();
    }

    /// Index of a quest within the line, or `None` if it isn't here.
    #[must_use]
    pub fn quest_index(&self, quest: &QuestId) -> Option<usize> {
        self.quests.iter().position(|q| q.id() == quest)
    }

    /// Look up a quest by id.
    #[must_use]
    pub fn get_quest(&self, quest: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id() == quest)
    }

    /// Mutable quest lookup by id.
    pub fn get_quest_mut(&mut self, quest: &QuestId) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| q.id() == quest)
    }

    /// The quest owning a step, if any quest here contains it.
    #[must_use]
    pub fn quest_containing(&self, step: &StepId) -> Option<&Quest> {
        self.quests.iter().find(|q| q.get_step(step).is_some())
    }

    /// Mutable lookup of the quest owning a step.
    pub fn quest_containing_mut(&mut self, step: &StepId) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| q.get_step(step).is_some())
    }
}
