//! Relationship edges (favorite, follow, upvote)

use serde::{Deserialize, Serialize};

/// Resulting state of an edge after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    /// Whether the edge exists after the operation
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Added)
    }

    pub const fn from_active(active: bool) -> Self {
        if active {
            Self::Added
        } else {
            Self::Removed
        }
    }
}

/// What a request asks to do with an edge.
///
/// Forms send the verb of the button that was pressed, so `follow` and
/// `favorite` both mean [`EdgeAction::Add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeAction {
    /// Make sure the edge exists (no-op when it already does)
    #[serde(alias = "follow", alias = "favorite")]
    Add,
    /// Make sure the edge is gone (no-op when it already is)
    #[serde(alias = "unfollow", alias = "unfavorite")]
    Remove,
    /// Flip the current state
    Toggle,
}

impl EdgeAction {
    /// The desired end state, or `None` for a toggle
    pub const fn desired_state(self) -> Option<bool> {
        match self {
            Self::Add => Some(true),
            Self::Remove => Some(false),
            Self::Toggle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        assert!(ToggleOutcome::Added.is_active());
        assert!(!ToggleOutcome::Removed.is_active());
        assert_eq!(ToggleOutcome::from_active(true), ToggleOutcome::Added);
    }

    #[test]
    fn test_desired_state() {
        assert_eq!(EdgeAction::Add.desired_state(), Some(true));
        assert_eq!(EdgeAction::Remove.desired_state(), Some(false));
        assert_eq!(EdgeAction::Toggle.desired_state(), None);
    }

    #[test]
    fn test_action_verbs() {
        let parse = |s: &str| serde_json::from_str::<EdgeAction>(&format!("\"{s}\"")).unwrap();
        assert_eq!(parse("follow"), EdgeAction::Add);
        assert_eq!(parse("unfavorite"), EdgeAction::Remove);
        assert_eq!(parse("toggle"), EdgeAction::Toggle);
        assert!(serde_json::from_str::<EdgeAction>("\"boost\"").is_err());
    }
}
