//! Domain entities mirrored from persistent storage.

use crate::domain::posts::{PostId, PostListing};

/// A stored blog post. Rows are immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub hero_image_path: String,
    pub preview_image_path: String,
    pub author: String,
    pub author_image_path: String,
    /// Caller supplied and stored verbatim; never parsed.
    pub publish_date: String,
    pub featured: bool,
}

impl PostRecord {
    pub fn listing(&self) -> PostListing {
        PostListing::from_featured(self.featured)
    }
}
