//! Post ingestion: decode embedded images, store them, then record the post row.

use std::fmt;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use metrics::counter;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::assets::{AssetStore, AssetStoreError};
use crate::application::repos::{CreatePostParams, PostsWriteRepo, RepoError};
use crate::domain::posts::PostId;

const SOURCE: &str = "escape::ingest";

/// Inbound post submission. Every field is required and unknown fields are rejected.
///
/// The aliases are the field names sent by the legacy authoring page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePostRequest {
    pub title: String,
    pub subtitle: String,
    #[serde(alias = "postIMG")]
    pub post_image_base64: String,
    #[serde(alias = "postIMGName")]
    pub post_image_name: String,
    pub author_name: String,
    #[serde(alias = "authorIMG")]
    pub author_image_base64: String,
    #[serde(alias = "authorIMGName")]
    pub author_image_name: String,
    #[serde(alias = "previewIMG")]
    pub preview_image_base64: String,
    #[serde(alias = "previewIMGName")]
    pub preview_image_name: String,
    pub publish_date: String,
    pub content: String,
}

/// The three images carried by a submission, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Author,
    Hero,
    Preview,
}

impl ImageField {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageField::Author => "authorImageBase64",
            ImageField::Hero => "postImageBase64",
            ImageField::Preview => "previewImageBase64",
        }
    }
}

impl fmt::Display for ImageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("`{field}` is not valid base64")]
    Decode {
        field: ImageField,
        #[source]
        source: base64::DecodeError,
    },
    #[error("failed to store {field} image")]
    Asset {
        field: ImageField,
        #[source]
        source: AssetStoreError,
    },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl IngestError {
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Decode { .. } => "decode",
            IngestError::Asset { .. } => "io",
            IngestError::Repo(_) => "storage",
        }
    }
}

/// Drives a submission through decode, asset writes and the insert.
///
/// Steps run strictly in order and the first failure aborts the rest.
/// Assets written before a later failure are left in place: names are
/// client chosen and may be shared with earlier posts, so deleting them
/// could remove images other rows still point at.
#[derive(Clone)]
pub struct PostIngestService {
    assets: Arc<dyn AssetStore>,
    writer: Arc<dyn PostsWriteRepo>,
}

impl PostIngestService {
    pub fn new(assets: Arc<dyn AssetStore>, writer: Arc<dyn PostsWriteRepo>) -> Self {
        Self { assets, writer }
    }

    pub async fn create_post(&self, request: CreatePostRequest) -> Result<PostId, IngestError> {
        let result = self.ingest(request).await;
        match &result {
            Ok(id) => {
                counter!("escape_posts_created_total").increment(1);
                info!(target = SOURCE, post_id = %id, "post created");
            }
            Err(err) => {
                counter!("escape_ingest_failures_total", "kind" => err.kind()).increment(1);
                warn!(target = SOURCE, kind = err.kind(), error = %err, "post ingestion failed");
            }
        }
        result
    }

    async fn ingest(&self, request: CreatePostRequest) -> Result<PostId, IngestError> {
        let CreatePostRequest {
            title,
            subtitle,
            post_image_base64,
            post_image_name,
            author_name,
            author_image_base64,
            author_image_name,
            preview_image_base64,
            preview_image_name,
            publish_date,
            content,
        } = request;

        // Decode everything up front so a malformed payload never leaves assets behind.
        let author_image = decode_image(ImageField::Author, &author_image_base64)?;
        let hero_image = decode_image(ImageField::Hero, &post_image_base64)?;
        let preview_image = decode_image(ImageField::Preview, &preview_image_base64)?;

        let author_image_path = self
            .store_image(ImageField::Author, &author_image_name, author_image)
            .await?;
        let hero_image_path = self
            .store_image(ImageField::Hero, &post_image_name, hero_image)
            .await?;
        let preview_image_path = self
            .store_image(ImageField::Preview, &preview_image_name, preview_image)
            .await?;

        let params = CreatePostParams {
            title,
            subtitle,
            content,
            hero_image_path,
            preview_image_path,
            author: author_name,
            author_image_path,
            publish_date,
            featured: false,
        };

        Ok(self.writer.create_post(params).await?)
    }

    async fn store_image(
        &self,
        field: ImageField,
        name: &str,
        bytes: Bytes,
    ) -> Result<String, IngestError> {
        let size = bytes.len();
        let path = self
            .assets
            .store(name, bytes)
            .await
            .map_err(|source| IngestError::Asset { field, source })?;

        counter!("escape_assets_written_total").increment(1);
        counter!("escape_asset_bytes_written_total").increment(size as u64);
        debug!(target = SOURCE, field = %field, path = %path, size, "stored image");
        Ok(path)
    }
}

fn decode_image(field: ImageField, encoded: &str) -> Result<Bytes, IngestError> {
    STANDARD
        .decode(encoded)
        .map(Bytes::from)
        .map_err(|source| IngestError::Decode { field, source })
}
