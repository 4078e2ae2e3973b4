//! Provider metadata
//!
//! Once a provider sub-task completes, the service exposes a metadata record
//! describing what the provider found: the feature descriptors it produced,
//! its match rates overall and per evaluation set, and a few flags consumed
//! by downstream model fitting.

use serde::{Deserialize, Serialize};

/// Metadata reported by one completed provider sub-task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Feature descriptors in the order the provider produced them.
    pub features: Vec<FeatureDescriptor>,
    /// Match rates over the whole search dataset.
    pub hit_rate_metrics: HitRateMetrics,
    /// Match rates per evaluation set, when the search carried any.
    #[serde(default)]
    pub eval_set_metrics: Vec<EvalSetMetrics>,
    /// Search keys that matched nothing at all.
    #[serde(default)]
    pub zero_hit_rate_search_keys: Option<Vec<String>>,
    /// Names of features the provider fed into embedding computation.
    #[serde(default)]
    pub features_used_for_embeddings: Option<Vec<String>>,
    /// Whether downstream cross-validation should shuffle folds.
    #[serde(default)]
    pub shuffle_kfold: Option<bool>,
}

/// One feature column a provider contributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    pub name: String,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub hit_rate: Option<f64>,
    /// Contribution weight reported by the provider's ranking.
    #[serde(default)]
    pub importance: Option<f64>,
}

/// Match-rate figures for one slice of the search dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRateMetrics {
    #[serde(default)]
    pub etalon_row_count: Option<u64>,
    #[serde(default)]
    pub max_hit_count: Option<u64>,
    #[serde(default)]
    pub hit_rate: Option<f64>,
    pub hit_rate_percent: f64,
}

/// Match-rate figures for one evaluation set, keyed by its ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSetMetrics {
    pub eval_set_index: u32,
    pub hit_rate_metrics: HitRateMetrics,
}
