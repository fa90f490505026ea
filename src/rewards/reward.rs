//! The reward capability.

/// A side-effecting grant attached to a step, quest, or quest line.
///
/// `grant` takes `&self` because rewards are owned by the progression
/// tree while the manager is mid-cascade; implementations that mutate
/// game state hold their own handles (channels, `Rc<RefCell<..>>`,
/// command queues) to do so.
pub trait QuestReward: std::fmt::Debug {
    /// The stable type tag for this reward.
    fn kind(&self) -> &str;

    /// Apply the reward's side effect. Always succeeds.
    fn grant(&self);
}
