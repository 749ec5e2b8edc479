use std::io::ErrorKind;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{
        HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::error;

use crate::{
    application::{assets::AssetStoreError, error::HttpError, feed::FeedError},
    domain::posts::PostId,
    presentation::views::{
        IndexTemplate, LayoutContext, PostTemplate, render_not_found_response,
        render_template_response,
    },
};

use super::{HttpState, db_health_response};

pub(super) async fn index(State(state): State<HttpState>) -> Response {
    match state.feed.home_page().await {
        Ok(content) => {
            let view = LayoutContext::new(state.site.clone(), content);
            render_template_response(IndexTemplate { view }, StatusCode::OK)
        }
        Err(err) => feed_error_to_response(err, &state),
    }
}

pub(super) async fn post_detail(
    State(state): State<HttpState>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match raw_id.parse::<PostId>() {
        Ok(id) => id,
        Err(err) => return HttpError::from(err).into_response(),
    };

    match state.feed.post_detail(id).await {
        Ok(content) => {
            let view = LayoutContext::new(state.site.clone(), content);
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        Err(err) => feed_error_to_response(err, &state),
    }
}

pub(super) async fn serve_content(
    State(state): State<HttpState>,
    Path(name): Path<String>,
) -> Response {
    const SOURCE: &str = "infra::http::public::serve_content";

    match state.content.read(&name).await {
        Ok(bytes) => build_content_response(&name, bytes),
        Err(AssetStoreError::InvalidName { .. }) => content_not_found(SOURCE),
        Err(AssetStoreError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            content_not_found(SOURCE)
        }
        Err(err) => {
            error!(
                target = SOURCE,
                name = %name,
                error = %err,
                "failed to read stored image"
            );
            HttpError::from_error(
                SOURCE,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                &err,
            )
            .into_response()
        }
    }
}

pub(super) async fn health(State(state): State<HttpState>) -> Response {
    db_health_response(state.health.check().await)
}

pub(super) async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.site.clone())
}

fn feed_error_to_response(err: FeedError, state: &HttpState) -> Response {
    match err {
        FeedError::NotFound => render_not_found_response(state.site.clone()),
        other => HttpError::from(other).into_response(),
    }
}

fn content_not_found(source: &'static str) -> Response {
    HttpError::new(
        source,
        StatusCode::NOT_FOUND,
        "Image not found",
        "The requested image is not available",
    )
    .into_response()
}

fn build_content_response(name: &str, bytes: Bytes) -> Response {
    let length = bytes.len();
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&length.to_string()) {
        headers.insert(CONTENT_LENGTH, value);
    }
    // Names can be rewritten by a later submission, so cache briefly.
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=300"));

    response
}
