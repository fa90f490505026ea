//! One-shot signal subscription table.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// An explicit one-shot subscription table.
///
/// Parents arm an entry per child they want to hear from once;
/// [`consume`](Self::consume) removes the entry and reports whether it
/// was live. Consuming before reacting is what makes delivery
/// exactly-once even under re-entrant dispatch.
///
/// ## Example
///
/// ```
/// use quest_engine::progress::SignalRoster;
/// use quest_engine::core::StepId;
///
/// let mut roster = SignalRoster::new();
/// roster.arm(StepId::from("QL0_Q0_S0"));
///
/// assert!(roster.consume(&StepId::from("QL0_Q0_S0")));
/// // Second delivery of the same signal is ignored.
/// assert!(!roster.consume(&StepId::from("QL0_Q0_S0")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SignalRoster<I: Eq + Hash> {
    armed: FxHashSet<I>,
}

impl<I: Eq + Hash> SignalRoster<I> {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            armed: FxHashSet::default(),
        }
    }

    /// Register for exactly one delivery from the given child.
    /// Re-arming an already-armed entry is a no-op.
    pub fn arm(&mut self, id: I) {
        self.armed.insert(id);
    }

    /// Consume the registration for the given child.
    ///
    /// Returns `true` only if the entry was armed; the entry is removed
    /// either way, so a second delivery returns `false`.
    pub fn consume(&mut self, id: &I) -> bool {
        self.armed.remove(id)
    }

    /// Check whether a registration is live without consuming it.
    #[must_use]
    pub fn is_armed(&self, id: &I) -> bool {
        self.armed.contains(id)
    }

    /// Drop every registration. Used when a parent's child list is
    /// replaced so stale subscriptions can't fire against new content.
    pub fn disarm_all(&mut self) {
        self.armed.clear();
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    /// Check if no registrations are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepId;

    #[test]
    fn test_consume_is_one_shot() {
        let mut roster = SignalRoster::new();
        roster.arm(StepId::from("S0"));

        assert!(roster.is_armed(&StepId::from("S0")));
        assert!(roster.consume(&StepId::from("S0")));
        assert!(!roster.consume(&StepId::from("S0")));
        assert!(!roster.is_armed(&StepId::from("S0")));
    }

    #[test]
    fn test_consume_unarmed_is_false() {
        let mut roster: SignalRoster<StepId> = SignalRoster::new();
        assert!(!roster.consume(&StepId::from("S0")));
    }

    #[test]
    fn test_disarm_all() {
        let mut roster = SignalRoster::new();
        roster.arm(StepId::from("S0"));
        roster.arm(StepId::from("S1"));
        assert_eq!(roster.len(), 2);

        roster.disarm_all();
        assert!(roster.is_empty());
        assert!(!roster.consume(&StepId::from("S1")));
    }

    #[test]
    fn test_rearm_is_idempotent() {
        let mut roster = SignalRoster::new();
        roster.arm(StepId::from("S0"));
        roster.arm(StepId::from("S0"));
        assert_eq!(roster.len(), 1);
    }
}
