//! JSON body extractor whose rejections use the API error envelope.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// Like [`axum::Json`], but a malformed or mistyped body is rejected with
/// an [`ApiError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
