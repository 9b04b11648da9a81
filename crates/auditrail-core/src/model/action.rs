//! Lifecycle action classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of lifecycle event an entry records
///
/// Fixed at entry creation and never changed afterwards. The integer codes
/// are part of the storage schema and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    /// Stable integer code used by the persistence layer
    pub fn code(self) -> i64 {
        match self {
            Action::Create => 0,
            Action::Update => 1,
            Action::Delete => 2,
        }
    }

    /// Decode a stored integer code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Action::Create),
            1 => Some(Action::Update),
            2 => Some(Action::Delete),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert_eq!(Action::from_code(action.code()), Some(action));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(Action::from_code(3), None);
        assert_eq!(Action::from_code(-1), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Action::Create).unwrap();
        assert_eq!(json, "\"create\"");
    }
}
