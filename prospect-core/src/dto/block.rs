//! Feature block manifest DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::SearchPhase;

/// One entry of the feature-block manifest for a search task.
///
/// Each block holds a subset of computed feature columns for one phase of
/// the search; blocks of the same phase join on the system record id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureBlockRef {
    pub search_type: SearchPhase,
    pub block_id: Uuid,
}
