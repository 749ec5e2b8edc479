use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    application::{feed::FeedError, ingest::IngestError},
    config::LoadError,
    domain::error::DomainError,
    infra::error::InfraError,
};

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn new(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        let report = ErrorReport::from_message(source, status, detail);
        Self {
            status,
            public_message,
            report,
        }
    }

    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            public_message,
            report,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

impl From<FeedError> for HttpError {
    fn from(error: FeedError) -> Self {
        match error {
            FeedError::NotFound => HttpError::new(
                "application::error::feed_error_to_http_error",
                StatusCode::NOT_FOUND,
                "Post not found",
                "No post matches the requested id",
            ),
            FeedError::Repo(err) => HttpError::from_error(
                "application::error::feed_error_to_http_error",
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_SERVER_ERROR,
                &err,
            ),
        }
    }
}

impl From<IngestError> for HttpError {
    fn from(error: IngestError) -> Self {
        // Malformed payloads, write failures and storage failures all surface as
        // a generic server error; the report keeps the distinction for logs.
        HttpError::from_error(
            "application::error::ingest_error_to_http_error",
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR,
            &error,
        )
    }
}

impl From<DomainError> for HttpError {
    fn from(error: DomainError) -> Self {
        HttpError::from_error(
            "application::error::domain_error_to_http_error",
            StatusCode::FORBIDDEN,
            "Invalid post id",
            &error,
        )
    }
}

/// Failures that abort the process before or while serving.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::assets::AssetStoreError;
    use crate::application::ingest::ImageField;
    use crate::application::repos::RepoError;

    fn decode_error() -> IngestError {
        use base64::Engine as _;
        let source = base64::engine::general_purpose::STANDARD
            .decode("!!!")
            .expect_err("invalid");
        IngestError::Decode {
            field: ImageField::Author,
            source,
        }
    }

    #[test]
    fn not_found_is_a_client_error() {
        let err = HttpError::from(FeedError::NotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn server_side_failures_share_a_generic_status() {
        let errors = [
            HttpError::from(FeedError::Repo(RepoError::Timeout)),
            HttpError::from(decode_error()),
            HttpError::from(IngestError::Asset {
                field: ImageField::Preview,
                source: AssetStoreError::Io(std::io::Error::other("read-only")),
            }),
            HttpError::from(IngestError::Repo(RepoError::from_persistence("gone"))),
        ];
        for err in errors {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.public_message, INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn invalid_identifier_is_rejected_as_forbidden() {
        let err = HttpError::from(DomainError::validation("invalid post id `abc`"));
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn report_collects_the_error_chain() {
        let report = ErrorReport::from_error(
            "test",
            StatusCode::INTERNAL_SERVER_ERROR,
            &decode_error(),
        );
        assert_eq!(report.messages.len(), 2);
        assert!(report.messages[0].contains("authorImageBase64"));
    }
}
