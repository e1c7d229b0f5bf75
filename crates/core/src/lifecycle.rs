//! Status-lifecycle contract for panel records.
//!
//! Every domain record in the system carries a status enum with a fixed
//! transition table. Terminal states are sinks: they list no outgoing
//! transitions and therefore reject every further status change.

use crate::error::{DomainError, DomainResult};

/// Fixed transition table over a status enum.
///
/// This is intentionally small so record modules can express their lifecycle
/// as one `match` returning static slices, keeping the table readable next to
/// the enum it governs.
pub trait Lifecycle: Copy + Eq + core::fmt::Debug + core::fmt::Display + Sized + 'static {
    /// States directly reachable from `self`. Empty for terminal states.
    fn transitions(self) -> &'static [Self];

    /// A terminal state accepts no further transitions.
    fn is_terminal(self) -> bool {
        self.transitions().is_empty()
    }

    fn can_transition(self, next: Self) -> bool {
        self.transitions().contains(&next)
    }

    /// Check a requested transition against the table.
    fn check_transition(self, next: Self) -> DomainResult<()> {
        if self.can_transition(next) {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(self, next))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Light {
        On,
        Off,
        Broken,
    }

    impl core::fmt::Display for Light {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            match self {
                Light::On => f.write_str("on"),
                Light::Off => f.write_str("off"),
                Light::Broken => f.write_str("broken"),
            }
        }
    }

    impl Lifecycle for Light {
        fn transitions(self) -> &'static [Self] {
            match self {
                Light::On => &[Light::Off, Light::Broken],
                Light::Off => &[Light::On, Light::Broken],
                Light::Broken => &[],
            }
        }
    }

    #[test]
    fn terminal_state_rejects_everything() {
        assert!(Light::Broken.is_terminal());
        assert_eq!(
            Light::Broken.check_transition(Light::On),
            Err(DomainError::invalid_transition("broken", "on"))
        );
    }

    #[test]
    fn table_permits_listed_edges_only() {
        assert!(Light::On.check_transition(Light::Off).is_ok());
        assert!(Light::On.check_transition(Light::On).is_err());
    }
}
