//! # quest-engine
//!
//! A progression engine for three-level quest hierarchies: steps,
//! grouped into quests, grouped into quest lines.
//!
//! ## Design Principles
//!
//! 1. **Derived completion**: a quest is complete iff every step is
//!    complete, a quest line iff every quest is. These are always
//!    recomputed from children, never cached, so they can't drift
//!    after a restore.
//!
//! 2. **One-shot fan-in**: completion propagates upward through
//!    explicit subscription rosters that consume each registration on
//!    first delivery. Every transition is announced exactly once, even
//!    under re-entrant dispatch.
//!
//! 3. **Gates are events, not errors**: missing requirements and unmet
//!    conditions leave state untouched and report the full unmet
//!    subset through dedicated event channels.
//!
//! 4. **Explicit context**: the [`QuestManager`] is a constructed
//!    object passed to collaborators, not a global.
//!
//! ## Architecture
//!
//! An external interaction point (quest giver, trigger volume) calls
//! [`QuestManager::start_step`] / [`QuestManager::complete_step`]. The
//! step evaluates its gates and flips its own state; the owning quest
//! consumes the step's one-shot completion signal and recomputes its
//! completion; the owning quest line does the same one level up. The
//! manager translates the terminal aggregation level into exactly one
//! [`QuestEvent`], grants the reward cascade, and hands the events
//! back for [`EventHub`] fan-out - all synchronously, within the call.
//!
//! ## Modules
//!
//! - `core`: ids, step state, errors
//! - `conditions`: pluggable start/complete gate predicates
//! - `rewards`: side-effecting grants at all three levels
//! - `progress`: the Step/Quest/QuestLine state machine and fan-in
//! - `events`: event payloads and the listener hub
//! - `manager`: the orchestrator and persistence reconciliation
//! - `save`: save records, blob wire format, provider boundary
//! - `content`: serializable authoring definitions
//!
//! ## Example
//!
//! ```
//! use quest_engine::{ManagerConfig, Quest, QuestEvent, QuestLine, QuestManager, Step};
//!
//! let quest = Quest::new(
//!     "QL0_Q0",
//!     vec![
//!         Step::new("QL0_Q0_S0"),
//!         Step::new("QL0_Q0_S1").with_requirement("QL0_Q0_S0"),
//!     ],
//! );
//! let line = QuestLine::new("QL0", vec![quest]);
//! let mut manager = QuestManager::new(vec![line], ManagerConfig::default());
//!
//! let report = manager.start_step(&"QL0_Q0_S0".into()).unwrap();
//! assert!(report.accepted);
//!
//! let report = manager.complete_step(&"QL0_Q0_S0".into()).unwrap();
//! assert!(matches!(report.events[0], QuestEvent::StepCompleted(_)));
//! ```

pub mod conditions;
pub mod content;
pub mod core;
pub mod events;
pub mod manager;
pub mod progress;
pub mod rewards;
pub mod save;

// Re-export commonly used types
pub use crate::core::{ListenerId, QuestError, QuestId, QuestLineId, StepId, StepState};

pub use crate::conditions::{ConditionRegistry, ConditionSpec, QuestCondition};

pub use crate::rewards::{QuestReward, RewardRegistry, RewardSpec};

pub use crate::progress::{
    Quest, QuestLine, QuestLineSignal, QuestSignal, SignalRoster, Step, StepSignal,
};

pub use crate::events::{EventHub, GateKind, QuestChannel, QuestEvent, QuestEventInfo};

pub use crate::manager::{ManagerConfig, QuestManager, TransitionReport};

pub use crate::save::{
    MemorySaveProvider, ReturnFormat, SaveData, SaveMode, SaveOutput, SaveProvider, StepRecord,
};

pub use crate::content::{QuestDefinition, QuestLineDefinition, StepDefinition};
