//! Provider outcome aggregation
//!
//! A search task completes with partial success when at least one provider
//! completes. This module selects the phase-appropriate provider list from a
//! snapshot, classifies the overall outcome, and renders the aggregated
//! failure when nobody succeeded.

use prospect_core::domain::snapshot::{ProviderTaskSummary, StatusSnapshot};
use prospect_core::domain::status::{ProviderTaskStatus, SearchPhase};

use crate::error::SearchError;

/// Fixed message for providers that ran out of time.
const SEARCH_TIMED_OUT: &str = "Search request timed out";

/// Fixed message for providers that failed without any detail. Ends with the
/// internal-error suffix so a lone anonymous failure is suppressed by
/// [`aggregated_failure`].
const SEARCH_OTHER_ERROR: &str = "Internal error";

/// Suffix marking an anonymous internal failure not worth surfacing.
const INTERNAL_ERROR_SUFFIX: &str = "Internal error";

/// Classification of a snapshot's provider outcomes.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// True iff at least one provider completed.
    pub any_succeeded: bool,
    /// One message per non-completed provider, in summary order.
    pub error_messages: Vec<String>,
}

/// Returns the provider list appropriate for the snapshot's overall status.
///
/// The dispatch is keyed on the overall status alone, never on which list
/// happens to be non-empty: validation-phase statuses select the validation
/// list, everything else the initial list.
pub fn select_summaries(snapshot: &StatusSnapshot) -> &[ProviderTaskSummary] {
    match snapshot.status.phase() {
        SearchPhase::Validation => &snapshot.validation_providers,
        SearchPhase::Initial => &snapshot.initial_providers,
    }
}

/// Classifies the outcome of the given provider summaries.
pub fn classify(summaries: &[ProviderTaskSummary]) -> Outcome {
    let any_succeeded = summaries
        .iter()
        .any(|s| s.status == ProviderTaskStatus::Completed);
    let error_messages = summaries
        .iter()
        .filter(|s| s.status != ProviderTaskStatus::Completed)
        .map(error_message)
        .collect();
    Outcome {
        any_succeeded,
        error_messages,
    }
}

/// Builds the error for a task that finished with zero completed providers.
///
/// A single message that is empty or ends with the internal-error suffix is
/// suppressed; anything else is surfaced verbatim, comma-joined.
pub fn aggregated_failure(messages: Vec<String>) -> SearchError {
    if messages.len() == 1
        && (messages[0].is_empty() || messages[0].ends_with(INTERNAL_ERROR_SUFFIX))
    {
        SearchError::AllProvidersFailed
    } else {
        SearchError::AllProvidersFailedWithDetails { messages }
    }
}

fn error_message(summary: &ProviderTaskSummary) -> String {
    if let Some(message) = summary
        .error_message
        .as_ref()
        .filter(|m| !m.is_empty())
    {
        return message.clone();
    }
    match summary.status {
        ProviderTaskStatus::TimedOut => SEARCH_TIMED_OUT.to_string(),
        ProviderTaskStatus::EmptyIntersection => "Empty intersection".to_string(),
        _ => SEARCH_OTHER_ERROR.to_string(),
    }
}
