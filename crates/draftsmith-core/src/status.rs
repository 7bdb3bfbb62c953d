//! Lifecycle status for asynchronous editor operations.

use serde::{Deserialize, Serialize};

/// Tracks one asynchronous operation from request to settlement.
///
/// There is no separate boolean loading flag and error slot. A single status
/// value makes the contradictory combination (loading while failed)
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "data")]
pub enum OpStatus {
    /// No operation has been requested, or the last one was cleared.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request completed successfully.
    Fulfilled,
    /// The last request failed with a user-facing message.
    Failed(String),
}

impl OpStatus {
    /// Check if a request is currently in flight
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check if the last request failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure message, if the last request failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(OpStatus::default(), OpStatus::Idle);
    }

    #[test]
    fn test_predicates() {
        assert!(OpStatus::Pending.is_pending());
        assert!(!OpStatus::Pending.is_failed());

        let failed = OpStatus::Failed("boom".to_string());
        assert!(failed.is_failed());
        assert_eq!(failed.failure(), Some("boom"));
        assert_eq!(OpStatus::Fulfilled.failure(), None);
    }
}
