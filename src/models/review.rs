//! Moderation state shared by materials and blogs.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Moderation state of a submission.
///
/// The server owns the transition rules; the client mirrors only what the
/// moderation surface needs before issuing a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Approved and rejected submissions stay where they are.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Whether a submission in this state may move to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        self == Self::Pending && next.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Request body for a moderation decision.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewRequest {
    /// Build an approval request.
    pub fn approve() -> Self {
        Self {
            status: ReviewStatus::Approved,
            comment: None,
        }
    }

    /// Build a rejection request.
    ///
    /// A rejection is refused here, before any call is issued, unless the
    /// comment is non-empty.
    pub fn reject(comment: impl Into<String>) -> Result<Self> {
        let comment = comment.into();
        if comment.trim().is_empty() {
            return Err(AppError::validation(
                "a rejection requires a non-empty comment",
            ));
        }
        Ok(Self {
            status: ReviewStatus::Rejected,
            comment: Some(comment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_reach_terminal_states() {
        assert!(ReviewStatus::Pending.can_transition_to(ReviewStatus::Approved));
        assert!(ReviewStatus::Pending.can_transition_to(ReviewStatus::Rejected));
    }

    #[test]
    fn terminal_states_are_immutable() {
        assert!(!ReviewStatus::Approved.can_transition_to(ReviewStatus::Rejected));
        assert!(!ReviewStatus::Rejected.can_transition_to(ReviewStatus::Approved));
        assert!(!ReviewStatus::Pending.can_transition_to(ReviewStatus::Pending));
    }

    #[test]
    fn reject_requires_comment() {
        assert!(ReviewRequest::reject("   ").is_err());
        let req = ReviewRequest::reject("missing course reference").unwrap();
        assert_eq!(req.status, ReviewStatus::Rejected);
        assert_eq!(req.comment.as_deref(), Some("missing course reference"));
    }

    #[test]
    fn wire_casing_is_lowercase() {
        let json = serde_json::to_string(&ReviewStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let parsed: ReviewStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, ReviewStatus::Pending);
    }
}
