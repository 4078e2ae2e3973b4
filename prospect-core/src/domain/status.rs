//! Search task status taxonomy
//!
//! The remote service reports one overall status token per search task and
//! one per provider sub-task. Both sets are modelled as explicit enums so
//! every token is classified exhaustively at compile time.

use serde::{Deserialize, Serialize};

/// Search phase: two structurally identical but separately tracked stages
/// of the same task lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchPhase {
    Initial,
    Validation,
}

/// Overall status of a search task as reported by the remote service.
///
/// Wire tokens are the exact `SCREAMING_SNAKE_CASE` strings the service
/// emits. `EMPTY_INTERSECTION` is reported by both phases but dispatches to
/// the initial phase: the provider-list selection rule is keyed on the
/// `VALIDATION_*` tokens only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchTaskStatus {
    Created,
    Submitted,
    Completed,
    Failed,
    EmptyIntersection,
    ValidationCreated,
    ValidationSubmitted,
    ValidationCompleted,
    ValidationFailed,
}

impl SearchTaskStatus {
    /// The phase this status belongs to for provider-list selection.
    pub fn phase(&self) -> SearchPhase {
        match self {
            Self::Created
            | Self::Submitted
            | Self::Completed
            | Self::Failed
            | Self::EmptyIntersection => SearchPhase::Initial,
            Self::ValidationCreated
            | Self::ValidationSubmitted
            | Self::ValidationCompleted
            | Self::ValidationFailed => SearchPhase::Validation,
        }
    }

    /// True for statuses that end a poll sequence successfully.
    pub fn is_success_terminal(&self) -> bool {
        match self {
            Self::Completed | Self::ValidationCompleted => true,
            Self::Created
            | Self::Submitted
            | Self::Failed
            | Self::EmptyIntersection
            | Self::ValidationCreated
            | Self::ValidationSubmitted
            | Self::ValidationFailed => false,
        }
    }

    /// True for statuses that end a poll sequence with a hard failure.
    pub fn is_failure_terminal(&self) -> bool {
        match self {
            Self::Failed | Self::ValidationFailed | Self::EmptyIntersection => true,
            Self::Created
            | Self::Submitted
            | Self::Completed
            | Self::ValidationCreated
            | Self::ValidationSubmitted
            | Self::ValidationCompleted => false,
        }
    }

    /// True while the task is accepted but providers may not be assigned yet.
    pub fn is_submitted(&self) -> bool {
        match self {
            Self::Submitted | Self::ValidationSubmitted => true,
            Self::Created
            | Self::Completed
            | Self::Failed
            | Self::EmptyIntersection
            | Self::ValidationCreated
            | Self::ValidationCompleted
            | Self::ValidationFailed => false,
        }
    }
}

/// Status of a single provider sub-task within a search task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderTaskStatus {
    Created,
    Submitted,
    Running,
    Completed,
    Failed,
    TimedOut,
    EmptyIntersection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_dispatch() {
        assert_eq!(SearchTaskStatus::Created.phase(), SearchPhase::Initial);
        assert_eq!(SearchTaskStatus::Submitted.phase(), SearchPhase::Initial);
        assert_eq!(SearchTaskStatus::Completed.phase(), SearchPhase::Initial);
        assert_eq!(SearchTaskStatus::Failed.phase(), SearchPhase::Initial);
        assert_eq!(
            SearchTaskStatus::EmptyIntersection.phase(),
            SearchPhase::Initial
        );
        assert_eq!(
            SearchTaskStatus::ValidationCreated.phase(),
            SearchPhase::Validation
        );
        assert_eq!(
            SearchTaskStatus::ValidationSubmitted.phase(),
            SearchPhase::Validation
        );
        assert_eq!(
            SearchTaskStatus::ValidationCompleted.phase(),
            SearchPhase::Validation
        );
        assert_eq!(
            SearchTaskStatus::ValidationFailed.phase(),
            SearchPhase::Validation
        );
    }

    #[test]
    fn test_terminal_classification() {
        assert!(SearchTaskStatus::Completed.is_success_terminal());
        assert!(SearchTaskStatus::ValidationCompleted.is_success_terminal());
        assert!(!SearchTaskStatus::Submitted.is_success_terminal());

        assert!(SearchTaskStatus::Failed.is_failure_terminal());
        assert!(SearchTaskStatus::ValidationFailed.is_failure_terminal());
        assert!(SearchTaskStatus::EmptyIntersection.is_failure_terminal());
        assert!(!SearchTaskStatus::Completed.is_failure_terminal());

        assert!(SearchTaskStatus::Submitted.is_submitted());
        assert!(SearchTaskStatus::ValidationSubmitted.is_submitted());
        assert!(!SearchTaskStatus::Created.is_submitted());
    }

    #[test]
    fn test_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&SearchTaskStatus::EmptyIntersection).unwrap(),
            "\"EMPTY_INTERSECTION\""
        );
        assert_eq!(
            serde_json::to_string(&SearchTaskStatus::ValidationSubmitted).unwrap(),
            "\"VALIDATION_SUBMITTED\""
        );
        let status: SearchTaskStatus = serde_json::from_str("\"VALIDATION_COMPLETED\"").unwrap();
        assert_eq!(status, SearchTaskStatus::ValidationCompleted);

        assert_eq!(
            serde_json::to_string(&ProviderTaskStatus::TimedOut).unwrap(),
            "\"TIMED_OUT\""
        );
        assert_eq!(
            serde_json::to_string(&SearchPhase::Initial).unwrap(),
            "\"INITIAL\""
        );
    }
}
