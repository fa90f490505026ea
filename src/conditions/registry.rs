//! Condition specs and the factory registry.
//!
//! Content describes conditions as data (`kind` + JSON params) so they
//! can live alongside step definitions in authored files and saves.
//! The registry maps each kind to a factory that turns the params into
//! a live [`QuestCondition`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::QuestError;

use super::condition::{Always, Never, QuestCondition};

/// A serialized condition: stable type tag plus parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    /// The registered condition kind.
    pub kind: String,

    /// Kind-specific parameters, interpreted by the factory.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ConditionSpec {
    /// Create a spec with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: serde_json::Value::Null,
        }
    }

    /// Attach parameters (builder pattern).
    #[must_use]
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }
}

/// Factory turning spec params into a live condition.
pub type ConditionFactory =
    Box<dyn Fn(&serde_json::Value) -> Result<Box<dyn QuestCondition>, QuestError>>;

/// Registry of condition factories, keyed by kind.
///
/// The built-in `always` and `never` kinds are pre-registered.
///
/// ## Example
///
/// ```
/// use quest_engine::conditions::{ConditionRegistry, ConditionSpec};
///
/// let registry = ConditionRegistry::new();
/// let condition = registry.build(&ConditionSpec::new("always")).unwrap();
/// assert!(condition.can_start());
/// ```
pub struct ConditionRegistry {
    factories: FxHashMap<String, ConditionFactory>,
}

impl ConditionRegistry {
    /// Create a registry with the built-in kinds registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            factories: FxHashMap::default(),
        };
        registry.register("always", |_| Ok(Box::new(Always)));
        registry.register("never", |_| Ok(Box::new(Never)));
        registry
    }

    /// Register a factory for a condition kind. Replaces any previous
    /// factory registered under the same kind.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&serde_json::Value) -> Result<Box<dyn QuestCondition>, QuestError> + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    /// Check if a kind is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Build a live condition from a spec.
    pub fn build(&self, spec: &ConditionSpec) -> Result<Box<dyn QuestCondition>, QuestError> {
        let factory = self
            .factories
            .get(&spec.kind)
            .ok_or_else(|| QuestError::UnknownConditionKind(spec.kind.clone()))?;
        factory(&spec.params)
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
