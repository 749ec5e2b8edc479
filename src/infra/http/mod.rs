mod api;
mod middleware;
mod public;

pub use api::CreatePostResponse;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sqlx::Error as SqlxError;

use crate::{
    application::{error::ErrorReport, feed::FeedService, ingest::PostIngestService},
    infra::{content::ContentStore, db::PostgresRepositories},
    presentation::views::SiteChrome,
};

use self::middleware::{log_responses, set_request_context};

/// Liveness probe for the backing database.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self) -> Result<(), SqlxError>;
}

#[async_trait]
impl HealthProbe for PostgresRepositories {
    async fn check(&self) -> Result<(), SqlxError> {
        self.health_check().await
    }
}

#[derive(Clone)]
pub struct HttpState {
    pub feed: Arc<FeedService>,
    pub ingest: Arc<PostIngestService>,
    pub content: Arc<ContentStore>,
    pub health: Arc<dyn HealthProbe>,
    pub site: SiteChrome,
}

/// Assemble every public route. `body_limit` caps post submissions.
pub fn build_router(state: HttpState, body_limit: usize) -> Router {
    let content_route = format!("{}/{{*name}}", state.content.public_prefix());

    Router::new()
        .route("/", get(public::index))
        .route("/post/{post_id}", get(public::post_detail))
        .route(
            "/api/post",
            post(api::create_post).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(&content_route, get(public::serve_content))
        .route("/_health/db", get(public::health))
        .fallback(public::fallback)
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

fn db_health_response(result: Result<(), SqlxError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
