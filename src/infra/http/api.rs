//! JSON endpoint used by the authoring page to submit new posts.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    application::{error::HttpError, ingest::CreatePostRequest},
    domain::posts::PostId,
};

use super::HttpState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post_id: PostId,
}

pub(super) async fn create_post(
    State(state): State<HttpState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Response {
    const SOURCE: &str = "infra::http::api::create_post";

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::BAD_REQUEST,
            };
            return HttpError::from_error(SOURCE, status, "Invalid request body", &rejection)
                .into_response();
        }
    };

    match state.ingest.create_post(request).await {
        Ok(post_id) => (StatusCode::CREATED, Json(CreatePostResponse { post_id })).into_response(),
        Err(err) => HttpError::from(err).into_response(),
    }
}
