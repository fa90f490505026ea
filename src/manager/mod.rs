//! The orchestrator: transition driving, event assembly, reward
//! cascade, persistence reconciliation, and hierarchy queries.
//!
//! A [`QuestManager`] owns the full quest-line forest and is the only
//! component external code talks to. It is an explicitly constructed
//! context object - create one at session start, pass it where it's
//! needed, drop it at session end. There is no global instance.
//!
//! ## Transitions
//!
//! [`start_step`](QuestManager::start_step) and
//! [`complete_step`](QuestManager::complete_step) drive a step's state
//! machine and cascade the resulting signal upward through the quest
//! and quest-line fan-in rosters, fully within the call. Each returns a
//! [`TransitionReport`]: whether the transition was accepted, plus the
//! ordered events produced - exactly one external event per transition.
//!
//! ## Reward cascade
//!
//! Lower-level completion events are suppressed when a higher level
//! completes in the same transition, so rewards are granted explicitly
//! at the terminal level *plus* all suppressed lower levels: step
//! rewards on `StepCompleted`, step + quest on `QuestCompleted`, step +
//! quest + line on `QuestLineCompleted`. Each reward is granted exactly
//! once.
//!
//! ## Restore
//!
//! [`initialize`](QuestManager::initialize) resets every step silently,
//! re-applies saved states by id (unknown ids are skipped, since saves
//! may reference content that no longer exists), then rewires the
//! subscription rosters - reproducing the steady state of a live
//! playthrough without replaying any historical signal.

mod config;

pub use config::ManagerConfig;

use tracing::{debug, info};

use crate::core::{QuestError, QuestId, QuestLineId, StepId, StepState};
use crate::events::{GateKind, QuestEvent, QuestEventInfo};
use crate::progress::{
    Quest, QuestLine, QuestLineSignal, QuestSignal, SignalRoster, Step, StepSignal,
};
use crate::save::{ReturnFormat, SaveData, SaveMode, SaveOutput, SaveProvider, StepRecord};

/// Outcome of a transition attempt.
///
/// `accepted` is `false` when a gate refused the transition; state is
/// unchanged and the refusal event carries the unmet subset. The events are in cascade order and must
/// be delivered exactly once; hand them to
/// [`EventHub::dispatch_all`](crate::events::EventHub::dispatch_all).
#[derive(Clone, Debug, PartialEq)]
#[must_use = "the events must be delivered to listeners"]
pub struct TransitionReport {
    /// Whether the step's state changed.
    pub accepted: bool,

    /// The external events produced by this transition, in order.
    pub events: Vec<QuestEvent>,
}

impl TransitionReport {
    fn refused(event: QuestEvent) -> Self {
        Self {
            accepted: false,
            events: vec![event],
        }
    }

    fn accepted(events: Vec<QuestEvent>) -> Self {
        Self {
            accepted: true,
            events,
        }
    }
}

/// Owner of the quest-line forest and single entry point for external
/// interaction code.
#[derive(Debug)]
pub struct QuestManager {
    quest_lines: Vec<QuestLine>,
    config: ManagerConfig,
    /// One-shot roster for the step-start surface: each step announces
    /// its start at most once per subscription cycle.
    start_roster: SignalRoster<StepId>,
}

impl QuestManager {
    /// Create a manager over the given forest and wire the subscription
    /// rosters for live play.
    pub fn new(quest_lines: Vec<QuestLine>, config: ManagerConfig) -> Self {
        let mut manager = Self {
            quest_lines,
            config,
            start_roster: SignalRoster::new(),
        };
        manager.rewire();
        manager
    }

    /// Build the forest from content definitions, resolving condition
    /// and reward specs through the registries, then wire for live play.
    pub fn from_definitions(
        definitions: &[crate::content::QuestLineDefinition],
        conditions: &crate::conditions::ConditionRegistry,
        rewards: &crate::rewards::RewardRegistry,
        config: ManagerConfig,
    ) -> Result<Self, QuestError> {
        let quest_lines = definitions
            .iter()
            .map(|d| d.build(conditions, rewards))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(quest_lines, config))
    }

    /// The manager's configuration.
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Enable or disable automatic reward granting.
    pub fn set_grant_rewards(&mut self, grant: bool) -> &mut Self {
        self.config.grant_rewards = grant;
        self
    }

    /// The owned quest lines, in order.
    #[must_use]
    pub fn quest_lines(&self) -> &[QuestLine] {
        &self.quest_lines
    }

    // === Transitions ===

    /// Attempt to start a step.
    ///
    /// Conditions gate first, then requirements (every requirement step
    /// must be Completed; a requirement id not present anywhere in the
    /// forest counts as unmet). Refusals leave state untouched and
    /// produce the matching failure event with the full unmet subset.
    ///
    /// Errors only when the step id is not in the forest.
    pub fn start_step(&mut self, step: &StepId) -> Result<TransitionReport, QuestError> {
        let info = self.event_info(step)?;
        let unmet = self.unmet_requirements(step)?;

        let signal = self
            .find_step_mut(step)
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))?
            .start(unmet);

        match signal {
            StepSignal::Started => {
                debug!(step = %step, "step started");
                // One announcement per step per subscription cycle.
                if self.start_roster.consume(step) {
                    Ok(TransitionReport::accepted(vec![QuestEvent::StepStarted(
                        info,
                    )]))
                } else {
                    Ok(TransitionReport::accepted(Vec::new()))
                }
            }
            StepSignal::MissingRequirements(missing) => {
                debug!(step = %step, ?missing, "step start refused: missing requirements");
                Ok(TransitionReport::refused(QuestEvent::MissingRequirements(
                    info.with_requirements(missing),
                )))
            }
            StepSignal::StartConditionsNotMet(failing) => {
                debug!(step = %step, ?failing, "step start refused: conditions not met");
                Ok(TransitionReport::refused(
                    QuestEvent::StartConditionsNotMet(
                        info.with_conditions(GateKind::StepStartConditions, failing),
                    ),
                ))
            }
            // `Step::start` never produces completion signals.
            StepSignal::Completed | StepSignal::CompleteConditionsNotMet(_) => {
                unreachable!("start transition produced a completion signal")
            }
        }
    }

    /// Attempt to complete a step and cascade the completion upward.
    ///
    /// The cascade resolves fully within this call: the owning quest
    /// consumes the step's one-shot signal, recomputes its completion,
    /// and the owning quest line does the same one level up. Exactly
    /// one external event is produced - `StepCompleted`,
    /// `QuestCompleted`, or `QuestLineCompleted`, whichever is the
    /// terminal aggregation level - and rewards are granted for that
    /// level plus all suppressed lower levels.
    ///
    /// Completing a step whose signal was already consumed mutates
    /// state idempotently and produces no events; checking
    /// `Started`/`Completed` beforehand is the caller's responsibility.
    ///
    /// Errors only when the step id is not in the forest.
    pub fn complete_step(&mut self, step: &StepId) -> Result<TransitionReport, QuestError> {
        let info = self.event_info(step)?;
        let line_idx = self
            .quest_lines
            .iter()
            .position(|ql| ql.quest_containing(step).is_some())
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))?;

        let line = &mut self.quest_lines[line_idx];
        let quest = line
            .quest_containing_mut(step)
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))?;
        let quest_id = quest.id().clone();

        let signal = quest
            .get_step_mut(step)
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))?
            .complete();

        match signal {
            StepSignal::CompleteConditionsNotMet(failing) => {
                debug!(step = %step, ?failing, "step completion refused: conditions not met");
                Ok(TransitionReport::refused(
                    QuestEvent::CompleteConditionsNotMet(
                        info.with_conditions(GateKind::StepCompleteConditions, failing),
                    ),
                ))
            }
            StepSignal::Completed => {
                debug!(step = %step, "step completed");
                let quest_signal = quest.handle_step_completed(step);
                let line_signal = match quest_signal {
                    Some(QuestSignal::Completed) => line.handle_quest_completed(&quest_id),
                    _ => None,
                };
                Ok(self.finish_completion(info, quest_signal, line_signal))
            }
            // `Step::complete` never produces start signals.
            StepSignal::Started
            | StepSignal::MissingRequirements(_)
            | StepSignal::StartConditionsNotMet(_) => {
                unreachable!("complete transition produced a start signal")
            }
        }
    }

    /// Translate the fan-in signals into the terminal event and grant
    /// the reward cascade.
    fn finish_completion(
        &self,
        info: QuestEventInfo,
        quest_signal: Option<QuestSignal>,
        line_signal: Option<QuestLineSignal>,
    ) -> TransitionReport {
        match (quest_signal, line_signal) {
            // Signal already consumed: re-completion, nothing to announce.
            (None, _) => TransitionReport::accepted(Vec::new()),

            (Some(QuestSignal::Progress), _) => {
                self.grant_step_rewards(&info.step);
                TransitionReport::accepted(vec![QuestEvent::StepCompleted(info)])
            }

            // Quest completed, but its one-shot toward the line was
            // already consumed: nothing further to announce.
            (Some(QuestSignal::Completed), None) => {
                self.grant_step_rewards(&info.step);
                TransitionReport::accepted(Vec::new())
            }

            (Some(QuestSignal::Completed), Some(QuestLineSignal::Progress)) => {
                // The step's own completion event is suppressed by the
                // quest-level event, so its rewards are granted here.
                self.grant_step_rewards(&info.step);
                self.grant_quest_rewards(&info.quest);
                TransitionReport::accepted(vec![QuestEvent::QuestCompleted(info)])
            }

            (Some(QuestSignal::Completed), Some(QuestLineSignal::Completed)) => {
                self.grant_step_rewards(&info.step);
                self.grant_quest_rewards(&info.quest);
                self.grant_quest_line_rewards(&info.quest_line);
                TransitionReport::accepted(vec![QuestEvent::QuestLineCompleted(info)])
            }
        }
    }

    // === Rewards ===

    fn grant_step_rewards(&self, step: &StepId) {
        if !self.config.grant_rewards {
            return;
        }
        if let Some(step) = self.find_step(step) {
            for reward in step.rewards() {
                debug!(step = %step.id(), kind = reward.kind(), "granting step reward");
                reward.grant();
            }
        }
    }

    fn grant_quest_rewards(&self, quest: &QuestId) {
        if !self.config.grant_rewards {
            return;
        }
        if let Some(quest) = self.find_quest(quest) {
            for reward in quest.rewards() {
                debug!(quest = %quest.id(), kind = reward.kind(), "granting quest reward");
                reward.grant();
            }
        }
    }

    fn grant_quest_line_rewards(&self, line: &QuestLineId) {
        if !self.config.grant_rewards {
            return;
        }
        if let Some(line) = self.quest_lines.iter().find(|ql| ql.id() == line) {
            for reward in line.rewards() {
                debug!(quest_line = %line.id(), kind = reward.kind(), "granting quest line reward");
                reward.grant();
            }
        }
    }

    // === Queries ===

    /// The quest containing a step. Errors when no quest anywhere in
    /// the forest contains it - a direct query cannot proceed without
    /// a parent context.
    pub fn quest_from_step(&self, step: &StepId) -> Result<&Quest, QuestError> {
        self.quest_lines
            .iter()
            .find_map(|ql| ql.quest_containing(step))
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))
    }

    /// The quest line containing a quest, or `None` on a miss.
    #[must_use]
    pub fn quest_line_from_quest(&self, quest: &QuestId) -> Option<&QuestLine> {
        self.quest_lines
            .iter()
            .find(|ql| ql.get_quest(quest).is_some())
    }

    /// The quest line containing a step, or `None` on a miss.
    #[must_use]
    pub fn quest_line_from_step(&self, step: &StepId) -> Option<&QuestLine> {
        self.quest_lines
            .iter()
            .find(|ql| ql.quest_containing(step).is_some())
    }

    /// A step's current state. Callers use this to detect
    /// already-started / already-completed before invoking transitions.
    pub fn step_state(&self, step: &StepId) -> Result<StepState, QuestError> {
        self.find_step(step)
            .map(Step::state)
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))
    }

    /// Whether a step could start right now: all start conditions pass
    /// and every requirement is Completed. Pure query - no events.
    pub fn can_start_step(&self, step: &StepId) -> Result<bool, QuestError> {
        let found = self
            .find_step(step)
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))?;
        Ok(found.can_start() && self.unmet_requirements(step)?.is_empty())
    }

    /// Whether every step before the given one in its quest is
    /// Completed. Unknown steps are `false`.
    #[must_use]
    pub fn all_previous_steps_completed(&self, step: &StepId) -> bool {
        self.quest_from_step(step)
            .map(|quest| quest.all_previous_steps_completed(step))
            .unwrap_or(false)
    }

    /// Assemble the event payload for a step: its quest and quest line
    /// plus the derived start flags.
    pub fn event_info(&self, step: &StepId) -> Result<QuestEventInfo, QuestError> {
        let line = self
            .quest_line_from_step(step)
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))?;
        let quest = line
            .quest_containing(step)
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))?;

        let is_quest_start = quest.step_index(step) == Some(0);
        let is_quest_line_start = line.quest_index(quest.id()) == Some(0) && is_quest_start;

        Ok(QuestEventInfo::new(
            line.id().clone(),
            quest.id().clone(),
            step.clone(),
            is_quest_start,
            is_quest_line_start,
        ))
    }

    fn find_step(&self, step: &StepId) -> Option<&Step> {
        self.quest_lines
            .iter()
            .find_map(|ql| ql.quest_containing(step))
            .and_then(|q| q.get_step(step))
    }

    fn find_step_mut(&mut self, step: &StepId) -> Option<&mut Step> {
        self.quest_lines
            .iter_mut()
            .find_map(|ql| ql.quest_containing_mut(step))
            .and_then(|q| q.get_step_mut(step))
    }

    fn find_quest(&self, quest: &QuestId) -> Option<&Quest> {
        self.quest_lines
            .iter()
            .find_map(|ql| ql.get_quest(quest))
    }

    /// The subset of a step's requirements not currently Completed. A
    /// requirement id absent from the forest counts as unmet.
    fn unmet_requirements(&self, step: &StepId) -> Result<Vec<StepId>, QuestError> {
        let found = self
            .find_step(step)
            .ok_or_else(|| QuestError::StepNotFound(step.clone()))?;

        Ok(found
            .requirements()
            .iter()
            .filter(|req| !self.find_step(req).is_some_and(Step::completed))
            .cloned()
            .collect())
    }

    // === Setup and restore ===

    /// Restore from saved records: reset every step silently, re-apply
    /// the saved states by id, then rewire the subscription rosters.
    /// Post-restore runtime behaves as if the saved history had
    /// occurred live, but no historical signal fires.
    ///
    /// Records whose id is not found anywhere are skipped - saves may
    /// reference content that no longer exists.
    pub fn initialize(&mut self, records: &[StepRecord]) {
        self.reset_states();

        let mut applied = 0usize;
        for record in records {
            match self.find_step_mut(&record.step) {
                Some(step) => {
                    step.init_as(record.state);
                    applied += 1;
                }
                None => {
                    debug!(step = %record.step, "skipping saved step not present in any quest line");
                }
            }
        }

        self.rewire();
        info!(
            applied,
            skipped = records.len() - applied,
            "quest manager initialized from save data"
        );
    }

    /// Restore from a JSON save blob in the portable wire format.
    pub fn initialize_from_json(&mut self, blob: &str) -> Result<(), QuestError> {
        let data = SaveData::from_json(blob)?;
        self.initialize(&data.steps);
        Ok(())
    }

    /// Reset every step to NotStarted and rewire for a fresh
    /// playthrough.
    pub fn reset_all(&mut self) {
        self.reset_states();
        self.rewire();
        info!("quest manager reset, all steps marked not started");
    }

    fn reset_states(&mut self) {
        for line in &mut self.quest_lines {
            for quest in line.quests_mut() {
                for step in quest.steps_mut() {
                    step.init_as(StepState::NotStarted);
                }
            }
        }
    }

    /// Rebuild every subscription roster from current step states.
    fn rewire(&mut self) {
        self.start_roster.disarm_all();

        for line in &mut self.quest_lines {
            line.initialize();
        }

        for line in &self.quest_lines {
            for quest in line.quests() {
                for step in quest.steps() {
                    if step.state() == StepState::NotStarted {
                        self.start_roster.arm(step.id().clone());
                    }
                }
            }
        }
    }

    // === Persistence ===

    /// Walk the hierarchy and emit one record per step, in hierarchy
    /// order.
    #[must_use]
    pub fn create_save_data(&self) -> SaveData {
        let mut data = SaveData::new();
        for line in &self.quest_lines {
            for quest in line.quests() {
                for step in quest.steps() {
                    data.steps.push(StepRecord::new(step.id().clone(), step.state()));
                }
            }
        }
        data
    }

    /// Save data in the configured return format.
    pub fn save_output(&self) -> Result<SaveOutput, QuestError> {
        let data = self.create_save_data();
        match self.config.return_format {
            ReturnFormat::Json => Ok(SaveOutput::Json(data.to_json()?)),
            ReturnFormat::StepList => Ok(SaveOutput::Steps(data.steps)),
        }
    }

    /// Produce the save output, writing the blob through the provider
    /// when the save mode is `Internal`. In `Custom` mode the data is
    /// only handed back - storage is the caller's.
    pub fn persist(&self, provider: &mut dyn SaveProvider) -> Result<SaveOutput, QuestError> {
        let output = self.save_output()?;

        if self.config.save_mode == SaveMode::Internal {
            let blob = match &output {
                SaveOutput::Json(json) => json.clone(),
                SaveOutput::Steps(_) => self.create_save_data().to_json()?,
            };
            provider.save(&self.config.save_file_name, &blob)?;
            info!(file = %self.config.save_file_name, "quest save data written");
        }

        Ok(output)
    }

    /// Load from the provider. A missing blob resets to defaults (a
    /// fresh playthrough); returns whether a blob existed.
    pub fn load_from(&mut self, provider: &mut dyn SaveProvider) -> Result<bool, QuestError> {
        match provider.load(&self.config.save_file_name)? {
            Some(blob) => {
                self.initialize_from_json(&blob)?;
                Ok(true)
            }
            None => {
                info!(
                    file = %self.config.save_file_name,
                    "no quest save data found, starting fresh"
                );
                self.reset_all();
                Ok(false)
            }
        }
    }
}
