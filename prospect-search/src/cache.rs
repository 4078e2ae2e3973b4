//! Artifact cache
//!
//! Raw feature tables are split across remote blocks and expensive to fetch,
//! so assembled results are memoized for the life of the process, keyed by
//! (trace, task, phase, metrics mode). Population is single-flight per key:
//! concurrent requests for the same key share one download instead of
//! racing. Entries are never invalidated or evicted; a failed population
//! leaves its key empty so a later call can retry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use tokio::sync::OnceCell;
use tokio::time;
use tracing::{debug, info};
use uuid::Uuid;

use prospect_core::domain::status::SearchPhase;
use prospect_core::domain::table::{ETALON_PREFIX, FeatureTable, SYSTEM_RECORD_ID};

use crate::api::SearchApi;
use crate::block::decode_feature_block;
use crate::error::SearchError;
use crate::task::SearchTask;

/// Pause before each artifact request, to stay clear of the service's
/// request rate limits.
const RATE_LIMIT_PAUSE: time::Duration = time::Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    trace_id: Uuid,
    task_id: Uuid,
    phase: SearchPhase,
    metrics_mode: bool,
}

type CacheSlot = Arc<OnceCell<Option<FeatureTable>>>;

/// Memoized, merge-on-fetch retrieval of raw feature tables.
#[derive(Default)]
pub struct ArtifactCache {
    entries: Mutex<HashMap<CacheKey, CacheSlot>>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache instance.
    pub fn global() -> &'static ArtifactCache {
        static CACHE: OnceLock<ArtifactCache> = OnceLock::new();
        CACHE.get_or_init(ArtifactCache::new)
    }

    /// Assembled initial-phase features for `task`, or `None` when the
    /// manifest lists no initial blocks.
    ///
    /// Requires the task to have reached a state with a non-empty initial
    /// provider list.
    pub async fn initial_raw_features(
        &self,
        api: &dyn SearchApi,
        task: &SearchTask,
        trace_id: Uuid,
        metrics_mode: bool,
    ) -> Result<Option<FeatureTable>, SearchError> {
        task.checked_initial_providers()?;
        self.raw_features(api, trace_id, task.id, SearchPhase::Initial, metrics_mode)
            .await
    }

    /// Assembled validation-phase features for `task`, or `None` when the
    /// manifest lists no validation blocks.
    pub async fn validation_raw_features(
        &self,
        api: &dyn SearchApi,
        task: &SearchTask,
        trace_id: Uuid,
        metrics_mode: bool,
    ) -> Result<Option<FeatureTable>, SearchError> {
        task.checked_validation_providers()?;
        self.raw_features(api, trace_id, task.id, SearchPhase::Validation, metrics_mode)
            .await
    }

    async fn raw_features(
        &self,
        api: &dyn SearchApi,
        trace_id: Uuid,
        task_id: Uuid,
        phase: SearchPhase,
        metrics_mode: bool,
    ) -> Result<Option<FeatureTable>, SearchError> {
        let key = CacheKey {
            trace_id,
            task_id,
            phase,
            metrics_mode,
        };
        let slot = {
            let mut entries = self.entries.lock().expect("cache mutex poisoned");
            entries.entry(key).or_default().clone()
        };

        let table = slot
            .get_or_try_init(|| fetch_and_merge(api, trace_id, task_id, phase, metrics_mode))
            .await?;
        Ok(table.clone())
    }
}

/// Downloads every phase-matching block and combines the tables with a full
/// outer join on the system record id.
async fn fetch_and_merge(
    api: &dyn SearchApi,
    trace_id: Uuid,
    task_id: Uuid,
    phase: SearchPhase,
    metrics_mode: bool,
) -> Result<Option<FeatureTable>, SearchError> {
    time::sleep(RATE_LIMIT_PAUSE).await;
    let manifest = api
        .fetch_block_manifest(trace_id, task_id, metrics_mode)
        .await?;

    let mut merged: Option<FeatureTable> = None;
    for block in manifest.iter().filter(|b| b.search_type == phase) {
        debug!(%task_id, block_id = %block.block_id, "downloading feature block");
        time::sleep(RATE_LIMIT_PAUSE).await;
        let payload = api
            .download_feature_block(trace_id, block.block_id, metrics_mode)
            .await?;
        let table = decode_feature_block(&payload)?;
        merged = Some(match merged {
            None => table,
            Some(acc) => acc.outer_join(&table, SYSTEM_RECORD_ID)?,
        });
    }

    // The service namespaces caller-provided columns in the initial phase
    // only; restore the caller-facing names after merging.
    if phase == SearchPhase::Initial {
        if let Some(table) = merged.as_mut() {
            table.strip_column_prefix(ETALON_PREFIX);
        }
    }

    match &merged {
        Some(table) => info!(
            %task_id,
            ?phase,
            rows = table.row_count(),
            columns = table.columns.len(),
            "assembled raw features"
        ),
        None => info!(%task_id, ?phase, "no feature blocks for phase"),
    }
    Ok(merged)
}
