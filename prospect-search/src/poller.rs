//! Status poller
//!
//! Drives a submitted search task to a terminal state. The loop alternates
//! fixed waits with status fetches: the service reports intermediate states
//! slowly and may transiently list zero providers before assignment
//! completes, so emptiness while submitted is retried for exactly one more
//! interval before it is treated as a hard failure.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{error, info, warn};
use uuid::Uuid;

use prospect_core::domain::snapshot::StatusSnapshot;
use prospect_core::domain::status::{ProviderTaskStatus, SearchPhase};

use crate::api::SearchApi;
use crate::cancel::CancelToken;
use crate::config::PollerConfig;
use crate::error::SearchError;
use crate::outcome::{aggregated_failure, classify, select_summaries};
use crate::task::SearchTask;

/// Polls the remote service until a search task reaches a terminal state.
pub struct StatusPoller {
    api: Arc<dyn SearchApi>,
    config: PollerConfig,
}

impl StatusPoller {
    /// Creates a new status poller
    pub fn new(api: Arc<dyn SearchApi>, config: PollerConfig) -> Self {
        Self { api, config }
    }

    /// Tracks `task` to completion, mutating its snapshot on every fetch and
    /// populating its provider metadata on success.
    ///
    /// With `fit_check` set, any validation-phase status is also accepted as
    /// a stopping condition and a fully failed provider set is tolerated;
    /// used when the caller only needs to confirm the validation stage has
    /// started.
    ///
    /// Cancelling `cancel` during a wait requests best-effort remote
    /// cancellation (skipped in `fit_check`) and returns
    /// [`SearchError::Interrupted`].
    pub async fn poll(
        &self,
        trace_id: Uuid,
        task: &mut SearchTask,
        fit_check: bool,
        cancel: &CancelToken,
    ) -> Result<(), SearchError> {
        let poll_id = task.poll_id();
        info!(%poll_id, fit_check, "polling search task");

        self.wait(self.config.warm_up, trace_id, poll_id, fit_check, cancel)
            .await?;
        let mut snapshot = self.api.fetch_status(trace_id, poll_id).await?;
        task.snapshot = Some(snapshot.clone());

        while !stop_reached(&snapshot, fit_check) {
            self.wait(
                self.config.poll_interval,
                trace_id,
                poll_id,
                fit_check,
                cancel,
            )
            .await?;
            snapshot = self.api.fetch_status(trace_id, poll_id).await?;
            task.snapshot = Some(snapshot.clone());

            if snapshot.status.is_failure_terminal() {
                error!(%poll_id, status = ?snapshot.status, "search task failed");
                return Err(SearchError::RemoteTaskFailed {
                    status: snapshot.status,
                });
            }
            if snapshot.status.is_submitted() && select_summaries(&snapshot).is_empty() {
                error!(%poll_id, "no provider summaries for search task");
                return Err(SearchError::NoProviderResponded);
            }

            self.wait(
                self.config.poll_interval,
                trace_id,
                poll_id,
                fit_check,
                cancel,
            )
            .await?;
        }

        let outcome = classify(select_summaries(&snapshot));
        if !outcome.any_succeeded && !fit_check {
            error!(%poll_id, ?outcome.error_messages, "all providers failed");
            return Err(aggregated_failure(outcome.error_messages));
        }

        if snapshot.status.is_success_terminal()
            || (fit_check && snapshot.status.phase() == SearchPhase::Validation)
        {
            let mut metadata = Vec::new();
            for summary in select_summaries(&snapshot) {
                if summary.status == ProviderTaskStatus::Completed {
                    metadata.push(
                        self.api
                            .fetch_provider_metadata(trace_id, summary.provider_task_id)
                            .await?,
                    );
                }
            }
            task.provider_metadata = Some(metadata);
        }

        info!(%poll_id, status = ?snapshot.status, "search task finished");
        Ok(())
    }

    /// Sleeps for `duration` unless the cancel token fires first. On
    /// interruption, requests remote cancellation best-effort (its own
    /// failure never masks the interruption) and reports `Interrupted`.
    async fn wait(
        &self,
        duration: Duration,
        trace_id: Uuid,
        poll_id: Uuid,
        fit_check: bool,
        cancel: &CancelToken,
    ) -> Result<(), SearchError> {
        tokio::select! {
            _ = time::sleep(duration) => Ok(()),
            _ = cancel.cancelled() => {
                warn!(%poll_id, "search task polling interrupted");
                if !fit_check {
                    if let Err(err) = self.api.cancel_task(trace_id, poll_id).await {
                        warn!(%poll_id, %err, "failed to cancel remote search task");
                    }
                }
                Err(SearchError::Interrupted)
            }
        }
    }
}

fn stop_reached(snapshot: &StatusSnapshot, fit_check: bool) -> bool {
    snapshot.status.is_success_terminal()
        || (fit_check && snapshot.status.phase() == SearchPhase::Validation)
}
