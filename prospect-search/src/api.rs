//! Remote search service interface
//!
//! Handles communication with the remote feature-search service for
//! task-related operations:
//! - Fetching status snapshots
//! - Cancelling tasks
//! - Fetching per-provider metadata
//! - Listing and downloading feature artifact blocks
//!
//! The interface is trait-based to enable testing and mocking. The HTTP
//! transport (retries, auth headers, wire encoding) lives behind this seam
//! and is not part of this crate.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use prospect_core::domain::metadata::ProviderMetadata;
use prospect_core::domain::snapshot::StatusSnapshot;
use prospect_core::dto::block::FeatureBlockRef;
use prospect_core::dto::layout::FileLayout;

/// Errors surfaced by a [`SearchApi`] implementation.
///
/// The tracking subsystem never wraps or reinterprets these; they propagate
/// unchanged to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// The service returned an error status code
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// Failed to parse a response
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

/// Interface to the remote feature-search service.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetches the current status snapshot of a search task.
    ///
    /// Returns the overall task status together with the per-provider
    /// sub-task summaries for both phases.
    async fn fetch_status(
        &self,
        trace_id: Uuid,
        task_id: Uuid,
    ) -> Result<StatusSnapshot, ApiError>;

    /// Requests cancellation of a running search task.
    ///
    /// # Arguments
    /// * `task_id` - The task to cancel
    async fn cancel_task(&self, trace_id: Uuid, task_id: Uuid) -> Result<(), ApiError>;

    /// Fetches the metadata a completed provider sub-task reported.
    ///
    /// # Arguments
    /// * `provider_task_id` - The provider sub-task whose metadata to fetch
    async fn fetch_provider_metadata(
        &self,
        trace_id: Uuid,
        provider_task_id: Uuid,
    ) -> Result<ProviderMetadata, ApiError>;

    /// Lists the feature artifact blocks available for a search task.
    async fn fetch_block_manifest(
        &self,
        trace_id: Uuid,
        task_id: Uuid,
        metrics_mode: bool,
    ) -> Result<Vec<FeatureBlockRef>, ApiError>;

    /// Downloads one feature block's compressed columnar payload.
    async fn download_feature_block(
        &self,
        trace_id: Uuid,
        block_id: Uuid,
        metrics_mode: bool,
    ) -> Result<Vec<u8>, ApiError>;

    /// Fetches the schema description of the file the task was created from.
    async fn fetch_file_layout(
        &self,
        trace_id: Uuid,
        task_id: Uuid,
    ) -> Result<FileLayout, ApiError>;
}
