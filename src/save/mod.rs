//! Save records, the blob wire format, and the persistence boundary.
//!
//! The engine only produces and consumes the *logical* save content: an
//! ordered sequence of (step id, state) pairs. The wire format of the
//! blob is part of the portable contract:
//!
//! ```json
//! { "Steps": [ { "Step": "QL0_Q0_S0", "State": 2 } ] }
//! ```
//!
//! with state codes 0 = NotStarted, 1 = Started, 2 = Completed.
//!
//! Durable storage lives behind the [`SaveProvider`] trait; the engine
//! never touches the filesystem itself.

mod data;
mod provider;

pub use data::{ReturnFormat, SaveData, SaveMode, SaveOutput, StepRecord};
pub use provider::{MemorySaveProvider, SaveProvider};
