//! Manager configuration.

use serde::{Deserialize, Serialize};

use crate::save::{ReturnFormat, SaveMode};

/// Configuration consumed at manager construction.
///
/// ## Example
///
/// ```
/// use quest_engine::manager::ManagerConfig;
/// use quest_engine::save::{ReturnFormat, SaveMode};
///
/// let config = ManagerConfig::new()
///     .with_save_mode(SaveMode::Custom)
///     .with_return_format(ReturnFormat::StepList)
///     .with_grant_rewards(false);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Whether the engine or the caller owns blob storage.
    pub save_mode: SaveMode,

    /// The shape of the data handed back by a save.
    pub return_format: ReturnFormat,

    /// Name the blob is stored under in `Internal` mode.
    pub save_file_name: String,

    /// Whether the manager grants rewards automatically on completion.
    /// When disabled, rewards are still reachable on the entities for
    /// callers that grant manually.
    pub grant_rewards: bool,
}

impl ManagerConfig {
    /// Create the default configuration: internal saves to
    /// `quests.savegame`, JSON output, rewards granted automatically.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the save mode (builder pattern).
    #[must_use]
    pub fn with_save_mode(mut self, mode: SaveMode) -> Self {
        self.save_mode = mode;
        self
    }

    /// Set the return format (builder pattern).
    #[must_use]
    pub fn with_return_format(mut self, format: ReturnFormat) -> Self {
        self.return_format = format;
        self
    }

    /// Set the save file name (builder pattern).
    #[must_use]
    pub fn with_save_file_name(mut self, name: impl Into<String>) -> Self {
        self.save_file_name = name.into();
        self
    }

    /// Enable or disable automatic reward granting (builder pattern).
    #[must_use]
    pub fn with_grant_rewards(mut self, grant: bool) -> Self {
        self.grant_rewards = grant;
        self
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            save_mode: SaveMode::Internal,
            return_format: ReturnFormat::Json,
            save_file_name: "quests.savegame".to_owned(),
            grant_rewards: true,
        }
    }
}
