use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::posts::PostId;
use crate::presentation::views::{HomePageView, PostView, to_home_page_view, to_post_view};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for FeedError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => FeedError::NotFound,
            other => FeedError::Repo(other),
        }
    }
}

/// Read side of the blog: loads posts and shapes them for rendering.
#[derive(Clone)]
pub struct FeedService {
    reader: Arc<dyn PostsRepo>,
}

impl FeedService {
    pub fn new(reader: Arc<dyn PostsRepo>) -> Self {
        Self { reader }
    }

    pub async fn home_page(&self) -> Result<HomePageView, FeedError> {
        let featured = self.reader.list_featured().await?;
        let recent = self.reader.list_most_recent().await?;
        debug!(
            target = "escape::feed",
            featured = featured.len(),
            most_recent = recent.len(),
            "loaded home page listings"
        );
        Ok(to_home_page_view(featured, recent))
    }

    pub async fn post_detail(&self, id: PostId) -> Result<PostView, FeedError> {
        let post = self.reader.get_by_id(id).await?;
        Ok(to_post_view(post))
    }
}
