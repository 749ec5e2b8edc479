//! Content store seam used by the ingestion pipeline.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("asset name `{name}` is not a single file name")]
    InvalidName { name: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Persists raw bytes under a caller-chosen name and hands back the public path.
///
/// Writes create or truncate: an existing asset with the same name is replaced.
/// Callers own name uniqueness.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, name: &str, bytes: Bytes) -> Result<String, AssetStoreError>;
}
