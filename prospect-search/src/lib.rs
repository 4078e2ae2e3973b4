//! Prospect Search
//!
//! Tracking and result assembly for search tasks submitted to a remote
//! feature-search service. A submitted task is worked by several independent
//! providers; this crate follows the task to completion, reconciles partial
//! provider failures, and retrieves and merges the resulting feature
//! artifacts.
//!
//! The remote service itself is reached through the [`api::SearchApi`]
//! trait; the HTTP transport behind it is out of scope here.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use prospect_search::{ArtifactCache, CancelToken, PollerConfig, SearchTask, StatusPoller};
//! use prospect_search::api::SearchApi;
//! use uuid::Uuid;
//!
//! async fn run(api: Arc<dyn SearchApi>, task_id: Uuid) -> anyhow::Result<()> {
//!     let trace_id = Uuid::new_v4();
//!     let mut task = SearchTask::initial(task_id);
//!
//!     let poller = StatusPoller::new(api.clone(), PollerConfig::default());
//!     poller.poll(trace_id, &mut task, false, &CancelToken::new()).await?;
//!
//!     if let Some(features) = ArtifactCache::global()
//!         .initial_raw_features(api.as_ref(), &task, trace_id, false)
//!         .await?
//!     {
//!         println!("assembled {} feature rows", features.row_count());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
mod block;
pub mod cache;
pub mod cancel;
pub mod config;
pub mod error;
pub mod outcome;
pub mod poller;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use block::BlockError;
pub use cache::ArtifactCache;
pub use cancel::CancelToken;
pub use config::PollerConfig;
pub use error::{Result, SearchError};
pub use poller::StatusPoller;
pub use task::SearchTask;
