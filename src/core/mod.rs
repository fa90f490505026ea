//! Core identifiers, step state, and the error taxonomy.
//!
//! Everything else in the crate is keyed by the id newtypes defined
//! here. Ids are stable string names chosen by content authors
//! (conventionally `QL0`, `QL0_Q0`, `QL0_Q0_S0`), not indices - save
//! data is id-addressed so content can be reordered between releases
//! without invalidating old saves.

mod error;
mod id;
mod state;

pub use error::QuestError;
pub use id::{ListenerId, QuestId, QuestLineId, StepId};
pub use state::StepState;
