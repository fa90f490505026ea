//! Reward specs and the factory registry.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::QuestError;

use super::reward::QuestReward;

/// A serialized reward: stable type tag plus parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardSpec {
    /// The registered reward kind.
    pub kind: String,

    /// Kind-specific parameters, interpreted by the factory.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl RewardSpec {
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

/// Factory turning spec params into a live reward.
pub type RewardFactory =
    Box<dyn Fn(&serde_json::Value) -> Result<Box<dyn QuestReward>, QuestError>>;

/// Registry of reward factories, keyed by kind.
#[derive(Default)]
pub struct RewardRegistry {
    factories: FxHashMap<String, RewardFactory>,
}

impl RewardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a reward kind. Replaces any previous
    /// factory registered under the same kind.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&serde_json::Value) -> Result<Box<dyn QuestReward>, QuestError> + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    /// Check if a kind is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Build a live reward from a spec.
    pub fn build(&self, spec: &RewardSpec) -> Result<Box<dyn QuestReward>, QuestError> {
        let factory = self
            .factories
            .get(&spec.kind)
            .ok_or_else(|| QuestError::UnknownRewardKind(spec.kind.clone()))?;
        factory(&spec.params)
    }
}

impl std::fmt::Debug for RewardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Counter(Rc<Cell<u32>>);

    impl QuestReward for Counter {
        fn kind(&self) -> &str {
            "counter"
        }
        fn grant(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_registered_factory_builds_and_grants() {
        let hits = Rc::new(Cell::new(0));
        let hits_in_factory = Rc::clone(&hits);

        let mut registry = RewardRegistry::new();
        registry.register("counter", move |_| {
            Ok(Box::new(Counter(Rc::clone(&hits_in_factory))))
        });

        let reward = registry.build(&RewardSpec::new("counter")).unwrap();
        reward.grant();
        reward.grant();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let registry = RewardRegistry::new();
        assert!(matches!(
            registry.build(&RewardSpec::new("gold")),
            Err(QuestError::UnknownRewardKind(k)) if k == "gold"
        ));
    }
}
