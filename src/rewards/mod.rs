//! Reward capability and registry.
//!
//! Rewards are side-effecting grants attached at any of the three
//! levels. The manager grants them on completion: step rewards when a
//! step completes, plus quest rewards when that completion finishes the
//! quest, plus quest-line rewards when it finishes the line. Granting
//! is assumed to always succeed - there is no failure path.
//!
//! Like conditions, rewards are described in content by a stable type
//! tag plus parameters and resolved through a registry.

mod registry;
mod reward;

pub use registry::{RewardFactory, RewardRegistry, RewardSpec};
pub use reward::QuestReward;
