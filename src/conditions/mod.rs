//! Pluggable gate predicates for step transitions.
//!
//! A condition is checked twice in a step's life: `can_start` when the
//! step is about to transition to Started, and `can_complete` when it
//! is about to transition to Completed. Conditions are independent of
//! the requirement graph - requirements gate on *other steps* being
//! Completed, conditions gate on anything the game cares about
//! (inventory, time of day, a dialogue flag).
//!
//! Conditions are author-configured per step, so they're described in
//! content by a stable type tag plus parameters ([`ConditionSpec`]) and
//! resolved into live objects through a [`ConditionRegistry`].
//!
//! A failing gate is never an error: the step reports the full failing
//! subset through a not-met event and leaves its state untouched.

mod condition;
mod registry;

pub use condition::{Always, Never, QuestCondition};
pub use registry::{ConditionFactory, ConditionRegistry, ConditionSpec};
