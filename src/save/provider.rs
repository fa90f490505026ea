//! The persistence boundary.

use rustc_hash::FxHashMap;

use crate::core::QuestError;

/// Durable storage for save blobs. Implemented per platform by the
/// host game (files, player prefs, cloud saves); the engine only moves
/// blobs across this boundary.
pub trait SaveProvider {
    /// Load a blob by name. `Ok(None)` when no blob exists under the
    /// name - a fresh playthrough, not an error.
    fn load(&mut self, name: &str) -> Result<Option<String>, QuestError>;

    /// Store a blob under a name, replacing any previous content.
    fn save(&mut self, name: &str, blob: &str) -> Result<(), QuestError>;
}

/// In-memory provider. Default for tests and for hosts that manage
/// durability themselves around a session.
#[derive(Clone, Debug, Default)]
pub struct MemorySaveProvider {
    blobs: FxHashMap<String, String>,
}

impl MemorySaveProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a blob exists under the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }
}

impl SaveProvider for MemorySaveProvider {
    fn load(&mut self, name: &str) -> Result<Option<String>, QuestError> {
        Ok(self.blobs.get(name).cloned())
    }

    fn save(&mut self, name: &str, blob: &str) -> Result<(), QuestError> {
        self.blobs.insert(name.to_owned(), blob.to_owned());
        Ok(())
    }
}
