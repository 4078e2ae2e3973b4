//! Status snapshot types
//!
//! A snapshot is the service's view of a search task at one fetch. Snapshots
//! are immutable once constructed; the poller replaces the previous snapshot
//! wholesale on every fetch, it never patches one in place.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::{ProviderTaskStatus, SearchTaskStatus};

/// One observation of a search task's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub status: SearchTaskStatus,
    pub initial_providers: Vec<ProviderTaskSummary>,
    pub validation_providers: Vec<ProviderTaskSummary>,
    /// When this snapshot was fetched. Snapshots observed by a single poll
    /// sequence are totally ordered by this field.
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

impl StatusSnapshot {
    /// Creates a snapshot stamped with the current time.
    pub fn new(
        status: SearchTaskStatus,
        initial_providers: Vec<ProviderTaskSummary>,
        validation_providers: Vec<ProviderTaskSummary>,
    ) -> Self {
        Self {
            status,
            initial_providers,
            validation_providers,
            fetched_at: chrono::Utc::now(),
        }
    }
}

/// Summary of one provider sub-task inside a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderTaskSummary {
    pub provider_task_id: Uuid,
    pub status: ProviderTaskStatus,
    pub error_message: Option<String>,
}
