//! Feature block payload decoding
//!
//! A downloaded block is a DEFLATE-compressed archive holding one
//! JSON-encoded columnar table. The payload is staged through a transient
//! file before extraction; nothing is kept on disk afterwards.

use std::fs::File;
use std::io::Write;

use thiserror::Error;

use prospect_core::domain::table::FeatureTable;

/// Errors from decoding a feature block payload.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("failed to stage feature block: {0}")]
    Io(#[from] std::io::Error),

    #[error("feature block archive is invalid: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("feature block table is invalid: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("feature block archive holds no entries")]
    EmptyArchive,
}

/// Decodes one downloaded block payload into a feature table.
pub(crate) fn decode_feature_block(payload: &[u8]) -> Result<FeatureTable, BlockError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("features.zip");
    let mut staged = File::create(&path)?;
    staged.write_all(payload)?;
    staged.sync_all()?;

    let mut archive = zip::ZipArchive::new(File::open(&path)?)?;
    if archive.is_empty() {
        return Err(BlockError::EmptyArchive);
    }
    let entry = archive.by_index(0)?;
    let table = serde_json::from_reader(entry)?;
    Ok(table)
}
