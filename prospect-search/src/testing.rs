//! Test fixtures
//!
//! A scripted [`SearchApi`] mock plus small constructors for snapshots,
//! metadata, and feature tables. Call counters let tests assert how many
//! remote fetches an operation issued.

use std::collections::{HashMap, VecDeque};
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use prospect_core::domain::metadata::{
    EvalSetMetrics, FeatureDescriptor, HitRateMetrics, ProviderMetadata,
};
use prospect_core::domain::snapshot::{ProviderTaskSummary, StatusSnapshot};
use prospect_core::domain::status::{ProviderTaskStatus, SearchPhase, SearchTaskStatus};
use prospect_core::domain::table::{Column, FeatureTable};
use prospect_core::dto::block::FeatureBlockRef;
use prospect_core::dto::layout::FileLayout;

use crate::api::{ApiError, SearchApi};

pub(crate) fn provider(
    status: ProviderTaskStatus,
    error_message: Option<&str>,
) -> ProviderTaskSummary {
    ProviderTaskSummary {
        provider_task_id: Uuid::new_v4(),
        status,
        error_message: error_message.map(str::to_string),
    }
}

pub(crate) fn snapshot(
    status: SearchTaskStatus,
    initial: Vec<ProviderTaskSummary>,
    validation: Vec<ProviderTaskSummary>,
) -> StatusSnapshot {
    StatusSnapshot::new(status, initial, validation)
}

pub(crate) fn feature(name: &str) -> FeatureDescriptor {
    FeatureDescriptor {
        name: name.to_string(),
        data_type: None,
        source: None,
        hit_rate: None,
        importance: None,
    }
}

pub(crate) fn hit_rate(percent: f64) -> HitRateMetrics {
    HitRateMetrics {
        etalon_row_count: None,
        max_hit_count: None,
        hit_rate: Some(percent / 100.0),
        hit_rate_percent: percent,
    }
}

pub(crate) fn eval_metrics(eval_set_index: u32, percent: f64) -> EvalSetMetrics {
    EvalSetMetrics {
        eval_set_index,
        hit_rate_metrics: hit_rate(percent),
    }
}

pub(crate) fn provider_metadata(
    features: Vec<FeatureDescriptor>,
    hit_rate_percent: f64,
) -> ProviderMetadata {
    ProviderMetadata {
        features,
        hit_rate_metrics: hit_rate(hit_rate_percent),
        eval_set_metrics: vec![],
        zero_hit_rate_search_keys: None,
        features_used_for_embeddings: None,
        shuffle_kfold: None,
    }
}

pub(crate) fn block_ref(search_type: SearchPhase) -> FeatureBlockRef {
    FeatureBlockRef {
        search_type,
        block_id: Uuid::new_v4(),
    }
}

pub(crate) fn table_of(columns: &[(&str, &[Value])]) -> FeatureTable {
    FeatureTable::new(
        columns
            .iter()
            .map(|(name, values)| Column {
                name: name.to_string(),
                values: values.to_vec(),
            })
            .collect(),
    )
    .expect("fixture columns share one length")
}

/// Encodes a table the way the service ships blocks: one JSON entry in a
/// DEFLATE-compressed archive.
pub(crate) fn encode_feature_block(table: &FeatureTable) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    writer
        .start_file("features.json", options)
        .expect("start archive entry");
    writer
        .write_all(&serde_json::to_vec(table).expect("encode table"))
        .expect("write archive entry");
    writer.finish().expect("finish archive").into_inner()
}

/// Scripted mock of the remote search service.
///
/// Status snapshots are served from a script; the final snapshot repeats
/// once the script is exhausted. Everything else is served from maps.
#[derive(Default)]
pub(crate) struct MockSearchApi {
    statuses: Mutex<VecDeque<StatusSnapshot>>,
    metadata: HashMap<Uuid, ProviderMetadata>,
    manifest: Vec<FeatureBlockRef>,
    blocks: HashMap<Uuid, Vec<u8>>,

    pub status_calls: AtomicUsize,
    pub cancel_calls: AtomicUsize,
    pub metadata_calls: AtomicUsize,
    pub manifest_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
    pub last_polled_id: Mutex<Option<Uuid>>,
}

impl MockSearchApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(self, statuses: Vec<StatusSnapshot>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_metadata(mut self, provider_task_id: Uuid, metadata: ProviderMetadata) -> Self {
        self.metadata.insert(provider_task_id, metadata);
        self
    }

    pub fn with_manifest(mut self, manifest: Vec<FeatureBlockRef>) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_block(mut self, block_id: Uuid, payload: Vec<u8>) -> Self {
        self.blocks.insert(block_id, payload);
        self
    }
}

#[async_trait]
impl SearchApi for MockSearchApi {
    async fn fetch_status(
        &self,
        _trace_id: Uuid,
        task_id: Uuid,
    ) -> Result<StatusSnapshot, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_polled_id.lock().unwrap() = Some(task_id);
        let mut statuses = self.statuses.lock().unwrap();
        match statuses.len() {
            0 => Err(ApiError::Transport("no scripted status".to_string())),
            1 => Ok(statuses.front().expect("length checked").clone()),
            _ => Ok(statuses.pop_front().expect("length checked")),
        }
    }

    async fn cancel_task(&self, _trace_id: Uuid, _task_id: Uuid) -> Result<(), ApiError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_provider_metadata(
        &self,
        _trace_id: Uuid,
        provider_task_id: Uuid,
    ) -> Result<ProviderMetadata, ApiError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .get(&provider_task_id)
            .cloned()
            .ok_or_else(|| ApiError::api_error(404, "unknown provider task"))
    }

    async fn fetch_block_manifest(
        &self,
        _trace_id: Uuid,
        _task_id: Uuid,
        _metrics_mode: bool,
    ) -> Result<Vec<FeatureBlockRef>, ApiError> {
        self.manifest_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.manifest.clone())
    }

    async fn download_feature_block(
        &self,
        _trace_id: Uuid,
        block_id: Uuid,
        _metrics_mode: bool,
    ) -> Result<Vec<u8>, ApiError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.blocks
            .get(&block_id)
            .cloned()
            .ok_or_else(|| ApiError::api_error(404, "unknown feature block"))
    }

    async fn fetch_file_layout(
        &self,
        _trace_id: Uuid,
        _task_id: Uuid,
    ) -> Result<FileLayout, ApiError> {
        Ok(FileLayout::default())
    }
}
