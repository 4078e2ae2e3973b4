//! Error types for the tracking subsystem

use thiserror::Error;

use prospect_core::domain::status::{SearchPhase, SearchTaskStatus};
use prospect_core::domain::table::TableError;

use crate::api::ApiError;
use crate::block::BlockError;

/// Result type alias for subsystem operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised while tracking a search task and assembling its results.
///
/// Each variant carries machine-readable context; the rendered message is
/// presentation only.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The service reported an explicit failure-terminal status.
    #[error("search task failed with status {status:?}")]
    RemoteTaskFailed { status: SearchTaskStatus },

    /// The task stayed submitted with no providers assigned for a full
    /// retry interval.
    #[error("no provider responded to the search task")]
    NoProviderResponded,

    /// The task finished but no provider completed, and the single failure
    /// carried no detail worth surfacing.
    #[error("all providers failed to complete the search task")]
    AllProvidersFailed,

    /// The task finished but no provider completed; per-provider messages
    /// are surfaced verbatim.
    #[error("all providers failed to complete the search task: {}", .messages.join(","))]
    AllProvidersFailedWithDetails { messages: Vec<String> },

    /// A phase-specific provider list was queried before a successful poll,
    /// or the list was empty.
    #[error("{phase:?} search has not started or no provider was assigned")]
    NotStarted { phase: SearchPhase },

    /// Provider metadata was populated but holds no entries, so an
    /// aggregate over it is undefined.
    #[error("provider metadata holds no entries")]
    EmptyProviderMetadata,

    /// An external cancellation signal was observed mid-poll.
    #[error("search task polling was interrupted")]
    Interrupted,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Block(#[from] BlockError),
}
