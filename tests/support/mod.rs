#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tempfile::TempDir;

use escape::application::assets::AssetStore;
use escape::application::feed::FeedService;
use escape::application::ingest::{CreatePostRequest, PostIngestService};
use escape::application::repos::{CreatePostParams, PostsRepo, PostsWriteRepo, RepoError};
use escape::domain::entities::PostRecord;
use escape::domain::posts::PostId;
use escape::infra::content::ContentStore;
use escape::infra::http::{HealthProbe, HttpState};
use escape::presentation::views::SiteChrome;

/// Table-like store that assigns ids in insertion order.
#[derive(Default)]
pub struct InMemoryPosts {
    rows: Mutex<Vec<PostRecord>>,
    reads: AtomicUsize,
}

impl InMemoryPosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row the way an operator would curate it directly in the store.
    pub fn seed(&self, title: &str, featured: bool) -> PostId {
        let mut rows = self.rows.lock().unwrap();
        let id = PostId::new(rows.len() as i64 + 1).unwrap();
        rows.push(PostRecord {
            id,
            title: title.to_string(),
            subtitle: format!("{title} subtitle"),
            content: format!("{title} body"),
            hero_image_path: format!("/static/img/{title}-hero.png"),
            preview_image_path: format!("/static/img/{title}-preview.png"),
            author: "Biba".to_string(),
            author_image_path: "/static/img/biba.png".to_string(),
            publish_date: "2024-05-01".to_string(),
            featured,
        });
        id
    }

    pub fn rows(&self) -> Vec<PostRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn listing(&self, featured: bool) -> Vec<PostRecord> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|post| post.featured == featured)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PostsRepo for InMemoryPosts {
    async fn get_by_id(&self, id: PostId) -> Result<PostRecord, RepoError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list_featured(&self) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.listing(true))
    }

    async fn list_most_recent(&self) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.listing(false))
    }
}

#[async_trait]
impl PostsWriteRepo for InMemoryPosts {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostId, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let id = PostId::new(rows.len() as i64 + 1).unwrap();
        rows.push(PostRecord {
            id,
            title: params.title,
            subtitle: params.subtitle,
            content: params.content,
            hero_image_path: params.hero_image_path,
            preview_image_path: params.preview_image_path,
            author: params.author,
            author_image_path: params.author_image_path,
            publish_date: params.publish_date,
            featured: params.featured,
        });
        Ok(id)
    }
}

pub struct StubHealth {
    pub healthy: bool,
}

#[async_trait]
impl HealthProbe for StubHealth {
    async fn check(&self) -> Result<(), sqlx::Error> {
        if self.healthy {
            Ok(())
        } else {
            Err(sqlx::Error::PoolTimedOut)
        }
    }
}

/// Everything a test needs to drive the services against temporary storage.
pub struct Harness {
    pub dir: TempDir,
    pub posts: Arc<InMemoryPosts>,
    pub content: Arc<ContentStore>,
    pub feed: Arc<FeedService>,
    pub ingest: Arc<PostIngestService>,
}

impl Harness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let posts = Arc::new(InMemoryPosts::new());
        let content = Arc::new(
            ContentStore::new(dir.path().join("static/img"), "/static/img").expect("store"),
        );

        let reader: Arc<dyn PostsRepo> = posts.clone();
        let writer: Arc<dyn PostsWriteRepo> = posts.clone();
        let assets: Arc<dyn AssetStore> = content.clone();

        Self {
            dir,
            posts,
            content: content.clone(),
            feed: Arc::new(FeedService::new(reader)),
            ingest: Arc::new(PostIngestService::new(assets, writer)),
        }
    }

    pub fn http_state(&self, healthy: bool) -> HttpState {
        HttpState {
            feed: self.feed.clone(),
            ingest: self.ingest.clone(),
            content: self.content.clone(),
            health: Arc::new(StubHealth { healthy }),
            site: site(),
        }
    }

    pub fn image_exists(&self, name: &str) -> bool {
        self.content.root().join(name).exists()
    }
}

pub fn site() -> SiteChrome {
    SiteChrome {
        title: "Escape".to_string(),
        tagline: "Biba i Boba".to_string(),
    }
}

/// A submission whose three images decode to `author`, `hero` and `preview`.
pub fn request(title: &str) -> CreatePostRequest {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    CreatePostRequest {
        title: title.to_string(),
        subtitle: "S".to_string(),
        post_image_base64: STANDARD.encode(b"hero"),
        post_image_name: "p.png".to_string(),
        author_name: "A".to_string(),
        author_image_base64: STANDARD.encode(b"author"),
        author_image_name: "a.png".to_string(),
        preview_image_base64: STANDARD.encode(b"preview"),
        preview_image_name: "v.png".to_string(),
        publish_date: "May 1".to_string(),
        content: "body".to_string(),
    }
}
