//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::PostRecord;
use crate::domain::posts::PostId;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Every post column except the store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostParams {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub hero_image_path: String,
    pub preview_image_path: String,
    pub author: String,
    pub author_image_path: String,
    pub publish_date: String,
    pub featured: bool,
}

/// Read access to the `post` table. Each call is a single statement.
#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Fails with [`RepoError::NotFound`] when no row carries `id`.
    async fn get_by_id(&self, id: PostId) -> Result<PostRecord, RepoError>;

    /// Order is whatever the store returns.
    async fn list_featured(&self) -> Result<Vec<PostRecord>, RepoError>;

    /// Posts with `featured = false`, in store order.
    async fn list_most_recent(&self) -> Result<Vec<PostRecord>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostId, RepoError>;
}
