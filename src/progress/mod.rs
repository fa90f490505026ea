//! The three-level progression state machine.
//!
//! A [`Step`] is the atomic unit: it owns its state, its requirement
//! list, and its condition/reward lists. A [`Quest`] is an ordered
//! sequence of steps, a [`QuestLine`] an ordered sequence of quests.
//! Completion aggregates upward through one-shot signals: a completing
//! step signals its quest, which consumes the registration (so the same
//! step can never be counted twice), recomputes its own completion over
//! all steps, and signals the quest line the same way.
//!
//! ## One-shot fan-in
//!
//! Each parent holds a [`SignalRoster`] of the children it's listening
//! to. Delivery always consumes the registration *before* the parent
//! reacts, so re-entrant transitions triggered from inside a handler
//! (a reward completing another step, say) can't double count.
//!
//! Completion flags are never stored: `Quest::completed` and
//! `QuestLine::completed` recompute over their children every call, so
//! restore and reconfiguration can't leave a stale bit behind.

mod quest;
mod questline;
mod roster;
mod step;

pub use quest::{Quest, QuestSignal};
pub use questline::{QuestLine, QuestLineSignal};
pub use roster::SignalRoster;
pub use step::{Step, StepSignal};
