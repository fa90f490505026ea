//! Event payloads and the external notification surface.
//!
//! The manager is the only component external listeners see. Every
//! transition it accepts (or refuses at a gate) produces exactly one
//! [`QuestEvent`] - a tagged message carrying a [`QuestEventInfo`]
//! payload with the step, its owning quest and quest line, contextual
//! start flags, and the unmet subset for gate failures.
//!
//! Completion events are mutually exclusive per transition: a step that
//! completes its quest raises `QuestCompleted` only, and a step that
//! completes its quest line raises `QuestLineCompleted` only. Listeners
//! wanting the lower levels read them off the payload.
//!
//! [`EventHub`] is the fan-out side: presentation code registers
//! per-channel listeners and the game loop pumps the events returned by
//! manager transitions through it.

mod hub;
mod info;

pub use hub::EventHub;
pub use info::{GateKind, QuestChannel, QuestEvent, QuestEventInfo};
