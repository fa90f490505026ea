//! Author-side content definitions.
//!
//! Definitions are the serializable description of a quest hierarchy:
//! plain data with ids, names, requirement lists, and condition/reward
//! specs (type tag + params). They're what content files contain and
//! what authoring tools edit. Building resolves the specs through the
//! condition and reward registries into the live progression entities.
//!
//! ```
//! use quest_engine::conditions::ConditionRegistry;
//! use quest_engine::content::{QuestDefinition, QuestLineDefinition, StepDefinition};
//! use quest_engine::rewards::RewardRegistry;
//!
//! let line = QuestLineDefinition::new("QL0").with_quest(
//!     QuestDefinition::new("QL0_Q0")
//!         .with_step(StepDefinition::new("QL0_Q0_S0"))
//!         .with_step(StepDefinition::new("QL0_Q0_S1").with_requirement("QL0_Q0_S0")),
//! );
//!
//! let conditions = ConditionRegistry::new();
//! let rewards = RewardRegistry::new();
//! let live = line.build(&conditions, &rewards).unwrap();
//! assert_eq!(live.total_steps(), 2);
//! ```

mod definition;

pub use definition::{QuestDefinition, QuestLineDefinition, StepDefinition};
