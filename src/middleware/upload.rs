//! Upload validation for raw file bodies (logos etc.).
//!
//! Responsibility:
//! - Content-Type を allow-list と照合 (parameter は無視、大文字小文字は区別しない) → 415
//! - 宣言された Content-Length が上限を超えていれば 413 (body を読む前に弾く)
//! - Content-Length なし (chunked) の body は `RequestBodyLimitLayer` で上限を掛ける
//!   (超過は `UploadBody` extractor が JSON の 413 に変換する)
//!
//! Storage is not handled here; the handler receives the validated bytes.

use std::{convert::Infallible, sync::Arc};

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, FromRequest, State},
    http::{HeaderMap, Request, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_types: Arc<[String]>,
    max_bytes: usize,
}

/// Inserted into request extensions once the upload headers passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub content_type: String,
}

impl UploadPolicy {
    pub fn new<I, S>(allowed_types: I, max_bytes: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_types: allowed_types
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
            max_bytes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.upload_allowed_types.iter().cloned(),
            config.upload_max_bytes,
        )
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate upload headers. Type is checked before size.
    pub fn check(&self, headers: &HeaderMap) -> Result<ValidatedUpload, AppError> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::UnsupportedMediaType("Missing file type".into()))?;

        if !self.allowed_types.iter().any(|t| *t == content_type) {
            return Err(AppError::UnsupportedMediaType(format!(
                "File type {content_type} is not allowed"
            )));
        }

        let declared_len = headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if let Some(len) = declared_len
            && len > self.max_bytes as u64
        {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        Ok(ValidatedUpload { content_type })
    }
}

/// Put upload validation in front of a route that takes a raw file body.
pub fn guard(
    method_router: MethodRouter<AppState>,
    policy: &UploadPolicy,
) -> MethodRouter<AppState> {
    method_router
        // axum's own 2 MiB default would otherwise win over a larger configured limit
        .layer::<_, Infallible>(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(policy.max_bytes))
        .route_layer(middleware::from_fn_with_state(policy.clone(), upload_middleware))
}

async fn upload_middleware(
    State(policy): State<UploadPolicy>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let upload = policy.check(req.headers())?;
    req.extensions_mut().insert(upload);

    Ok(next.run(req).await)
}

/// Raw upload bytes. Body-limit overruns (streamed bodies without a declared
/// length) come back as `FILE_TOO_LARGE` instead of axum's plain-text 413.
#[derive(Debug)]
pub struct UploadBody(pub Bytes);

impl FromRequest<AppState> for UploadBody {
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &AppState) -> Result<Self, Self::Rejection> {
        Bytes::from_request(req, state)
            .await
            .map(UploadBody)
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(format!(
                        "File exceeds the {} byte limit",
                        state.upload.max_bytes()
                    ))
                } else {
                    tracing::debug!(reason = %rejection.body_text(), "upload body unreadable");
                    AppError::bad_request("INVALID_UPLOAD", "Failed to read the upload body")
                }
            })
    }
}
