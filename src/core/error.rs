//! Error taxonomy.
//!
//! Errors cover lookups that cannot proceed without a parent context,
//! malformed content/saves, and persistence-provider failures. Gate
//! failures (missing requirements, unmet conditions) are NOT errors -
//! they're expected outcomes reported through [`QuestEvent`] payloads
//! carrying the precise unmet subset.
//!
//! [`QuestEvent`]: crate::events::QuestEvent

use thiserror::Error;

use super::{QuestId, QuestLineId, StepId};

/// Errors produced by quest lookups, content building, and persistence.
#[derive(Debug, Error)]
pub enum QuestError {
    /// No quest in any quest line contains the step.
    #[error("step `{0}` not found in any quest line")]
    StepNotFound(StepId),

    /// No quest line contains the quest.
    #[error("quest `{0}` not found in any quest line")]
    QuestNotFound(QuestId),

    /// The quest line is not held by the manager.
    #[error("quest line `{0}` not found")]
    QuestLineNotFound(QuestLineId),

    /// A condition spec referenced a kind no factory was registered for.
    #[error("no condition factory registered for kind `{0}`")]
    UnknownConditionKind(String),

    /// A reward spec referenced a kind no factory was registered for.
    #[error("no reward factory registered for kind `{0}`")]
    UnknownRewardKind(String),

    /// A condition/reward factory rejected its parameters.
    #[error("invalid params for `{kind}`: {message}")]
    InvalidParams {
        /// The spec kind whose params were rejected.
        kind: String,
        /// Factory-provided detail.
        message: String,
    },

    /// The save blob could not be decoded.
    #[error("malformed save data: {0}")]
    MalformedSave(String),

    /// The persistence provider failed to load or store a blob.
    #[error("save provider error: {0}")]
    Provider(String),
}

impl From<serde_json::Error> for QuestError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedSave(err.to_string())
    }
}
