//! File layout DTOs
//!
//! Schema description of the uploaded search file. The tracking subsystem
//! passes this through untouched; upstream callers use it to map service
//! column names back onto their own.

use serde::{Deserialize, Serialize};

/// Column schema of the file a search task was created from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileLayout {
    pub columns: Vec<ColumnSchema>,
}

/// One column's name and role within the uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
