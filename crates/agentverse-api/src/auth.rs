//! Caller identity extraction.
//!
//! The owner of every request is the `sub` claim of the bearer JWT. The
//! token signature is not verified here; the API is expected to sit behind
//! a gateway that does.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::ApiError;
use crate::state::AppState;

/// Opaque owner id of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub String);

impl CallerIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the identity from an `Authorization` header value, falling
    /// back to `default_user` when no header is present.
    pub fn resolve(header: Option<&str>, default_user: Option<&str>) -> Result<Self, ApiError> {
        match header {
            Some(value) => {
                let token = value
                    .strip_prefix("Bearer ")
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        ApiError::Unauthorized("Expected a Bearer token".to_string())
                    })?;
                Self::from_token(token)
            }
            None => default_user
                .filter(|user| !user.is_empty())
                .map(|user| Self(user.to_string()))
                .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string())),
        }
    }

    /// Read the `sub` claim of a JWT.
    pub fn from_token(token: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::Unauthorized("Invalid authentication token".to_string());

        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) => payload,
            _ => return Err(invalid()),
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|_| invalid())?;
        let claims: serde_json::Value = serde_json::from_slice(&bytes).map_err(|_| invalid())?;

        claims
            .get("sub")
            .and_then(|sub| sub.as_str())
            .filter(|sub| !sub.is_empty())
            .map(|sub| Self(sub.to_string()))
            .ok_or_else(invalid)
    }
}

impl FromRequestParts<Arc<AppState>> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                ApiError::Unauthorized("Invalid Authorization header".to_string())
            })?),
            None => None,
        };
        Self::resolve(header, state.default_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_bearer_sub() {
        let header = format!("Bearer {}", token(serde_json::json!({"sub": "user-42"})));
        let identity = CallerIdentity::resolve(Some(&header), None).unwrap();
        assert_eq!(identity.as_str(), "user-42");
    }

    #[test]
    fn test_header_wins_over_default_user() {
        let header = format!("Bearer {}", token(serde_json::json!({"sub": "alice"})));
        let identity = CallerIdentity::resolve(Some(&header), Some("dev")).unwrap();
        assert_eq!(identity.as_str(), "alice");
    }

    #[test]
    fn test_default_user() {
        let identity = CallerIdentity::resolve(None, Some("dev")).unwrap();
        assert_eq!(identity.as_str(), "dev");
    }

    #[test]
    fn test_missing_identity() {
        let err = CallerIdentity::resolve(None, None).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_token_without_sub() {
        let header = format!("Bearer {}", token(serde_json::json!({"name": "x"})));
        assert!(CallerIdentity::resolve(Some(&header), None).is_err());
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(CallerIdentity::from_token("not-a-jwt").is_err());
        assert!(CallerIdentity::from_token("a.%%%.c").is_err());
        assert!(CallerIdentity::resolve(Some("Basic abc"), Some("dev")).is_err());
    }
}
