//! The condition capability and built-in predicates.

/// A pluggable predicate gating a step's transitions.
///
/// Games implement this per mechanic. If only a start gate is needed,
/// return `true` from [`can_complete`](Self::can_complete), and vice
/// versa.
///
/// `kind` is the stable type tag the condition was registered under;
/// it's what not-met events carry to identify the failing conditions.
pub trait QuestCondition: std::fmt::Debug {
    /// The stable type tag for this condition.
    fn kind(&self) -> &str;

    /// Whether the owning step may transition to Started.
    fn can_start(&self) -> bool;

    /// Whether the owning step may transition to Completed.
    fn can_complete(&self) -> bool;
}

/// A condition that always passes. Useful as a placeholder in content
/// that reserves a condition slot for later.
#[derive(Clone, Copy, Debug, Default)]
pub struct Always;

impl QuestCondition for Always {
    fn kind(&self) -> &str {
        "always"
    }

    fn can_start(&self) -> bool {
        true
    }

    fn can_complete(&self) -> bool {
        true
    }
}

/// A condition that never passes. Locks a step until content replaces it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Never;

impl QuestCondition for Never {
    fn kind(&self) -> &str {
        "never"
    }

    fn can_start(&self) -> bool {
        false
    }

    fn can_complete(&self) -> bool {
        false
    }
}
