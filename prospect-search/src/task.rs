//! Search task handle
//!
//! A [`SearchTask`] follows one submitted search task through its lifetime.
//! The poller is the only writer of `snapshot` and `provider_metadata`; the
//! aggregation views below are read-only and become available once the task
//! reaches a success state.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;
use uuid::Uuid;

use prospect_core::domain::metadata::{FeatureDescriptor, ProviderMetadata};
use prospect_core::domain::snapshot::{ProviderTaskSummary, StatusSnapshot};
use prospect_core::domain::status::SearchPhase;
use prospect_core::dto::layout::FileLayout;

use crate::api::{ApiError, SearchApi};
use crate::error::SearchError;

/// Handle to a remote search task.
#[derive(Debug, Clone)]
pub struct SearchTask {
    /// The task's own identifier.
    pub id: Uuid,
    /// For validation tasks, the originating initial task. Polling always
    /// tracks through this identifier when present.
    pub initial_task_id: Option<Uuid>,
    /// Which phase this task represents.
    pub kind: SearchPhase,
    /// Latest observed snapshot, replaced wholesale on every fetch.
    pub snapshot: Option<StatusSnapshot>,
    /// Populated exactly once, after the task reaches a success state; one
    /// entry per completed provider, in summary order.
    pub provider_metadata: Option<Vec<ProviderMetadata>>,
}

impl SearchTask {
    /// Creates a handle for an initial search task.
    pub fn initial(id: Uuid) -> Self {
        Self {
            id,
            initial_task_id: None,
            kind: SearchPhase::Initial,
            snapshot: None,
            provider_metadata: None,
        }
    }

    /// Creates a handle for a validation task tracked through its
    /// originating initial task.
    pub fn validation(id: Uuid, initial_task_id: Uuid) -> Self {
        Self {
            id,
            initial_task_id: Some(initial_task_id),
            kind: SearchPhase::Validation,
            snapshot: None,
            provider_metadata: None,
        }
    }

    /// The identifier the poller tracks: the originating initial task when
    /// present, else the task itself.
    pub fn poll_id(&self) -> Uuid {
        self.initial_task_id.unwrap_or(self.id)
    }

    /// Initial-phase provider list, or `NotStarted` if the task has not been
    /// polled to a state where one exists.
    pub fn checked_initial_providers(&self) -> Result<&[ProviderTaskSummary], SearchError> {
        self.checked_providers(SearchPhase::Initial)
    }

    /// Validation-phase provider list, or `NotStarted`.
    pub fn checked_validation_providers(&self) -> Result<&[ProviderTaskSummary], SearchError> {
        self.checked_providers(SearchPhase::Validation)
    }

    fn checked_providers(&self, phase: SearchPhase) -> Result<&[ProviderTaskSummary], SearchError> {
        let summaries = self
            .snapshot
            .as_ref()
            .map(|snapshot| match phase {
                SearchPhase::Initial => snapshot.initial_providers.as_slice(),
                SearchPhase::Validation => snapshot.validation_providers.as_slice(),
            })
            .unwrap_or_default();
        if summaries.is_empty() {
            return Err(SearchError::NotStarted { phase });
        }
        Ok(summaries)
    }

    /// Schema description of the file the task was created from, passed
    /// through from the service untouched.
    pub async fn file_layout(
        &self,
        api: &dyn SearchApi,
        trace_id: Uuid,
    ) -> Result<FileLayout, ApiError> {
        api.fetch_file_layout(trace_id, self.id).await
    }

    // =========================================================================
    // Aggregation views over provider metadata
    //
    // Every view yields None until the poller has populated
    // `provider_metadata`.
    // =========================================================================

    /// Every provider's feature descriptors, concatenated in provider order.
    pub fn all_features(&self) -> Option<Vec<FeatureDescriptor>> {
        let metadata = self.provider_metadata.as_ref()?;
        Some(
            metadata
                .iter()
                .flat_map(|meta| meta.features.iter().cloned())
                .collect(),
        )
    }

    /// Search keys no provider matched anything with, sorted.
    pub fn zero_hit_rate_search_keys(&self) -> Option<Vec<String>> {
        let metadata = self.provider_metadata.as_ref()?;
        let keys: BTreeSet<String> = metadata
            .iter()
            .filter_map(|meta| meta.zero_hit_rate_search_keys.as_ref())
            .flatten()
            .cloned()
            .collect();
        Some(keys.into_iter().collect())
    }

    /// Feature names used as embedding inputs by any provider, sorted.
    pub fn features_for_transform(&self) -> Option<Vec<String>> {
        let metadata = self.provider_metadata.as_ref()?;
        let names: BTreeSet<String> = metadata
            .iter()
            .filter_map(|meta| meta.features_used_for_embeddings.as_ref())
            .flatten()
            .cloned()
            .collect();
        Some(names.into_iter().collect())
    }

    /// First shuffle-fold flag reported by any provider, in provider order.
    ///
    /// Providers are not expected to disagree; when they do, the first flag
    /// wins and the conflict is reported.
    pub fn shuffle_kfold(&self) -> Option<bool> {
        let metadata = self.provider_metadata.as_ref()?;
        let mut chosen: Option<bool> = None;
        for flag in metadata.iter().filter_map(|meta| meta.shuffle_kfold) {
            match chosen {
                None => chosen = Some(flag),
                Some(first) if first != flag => {
                    warn!(
                        task_id = %self.id,
                        "providers disagree on shuffle_kfold, keeping {first}"
                    );
                }
                Some(_) => {}
            }
        }
        chosen
    }

    /// Maximum overall hit-rate percentage across providers.
    ///
    /// `Ok(None)` while metadata is unpopulated; populated-but-empty metadata
    /// is a reportable error since the maximum is undefined.
    pub fn max_initial_hit_rate(&self) -> Result<Option<f64>, SearchError> {
        let Some(metadata) = self.provider_metadata.as_ref() else {
            return Ok(None);
        };
        if metadata.is_empty() {
            return Err(SearchError::EmptyProviderMetadata);
        }
        let max = metadata
            .iter()
            .map(|meta| meta.hit_rate_metrics.hit_rate_percent)
            .fold(f64::MIN, f64::max);
        Ok(Some(max))
    }

    /// Per-ordinal maxima of evaluation-set hit-rate percentages.
    ///
    /// Ordinals no provider mentions are absent from the result.
    pub fn max_eval_set_hit_rates(&self) -> Option<BTreeMap<u32, f64>> {
        let metadata = self.provider_metadata.as_ref()?;
        let mut maxima = BTreeMap::new();
        for eval in metadata.iter().flat_map(|meta| &meta.eval_set_metrics) {
            let rate = eval.hit_rate_metrics.hit_rate_percent;
            maxima
                .entry(eval.eval_set_index)
                .and_modify(|current: &mut f64| *current = current.max(rate))
                .or_insert(rate);
        }
        Some(maxima)
    }
}
