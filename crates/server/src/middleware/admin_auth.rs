//! Admin authentication extractor.
//!
//! The `/admin` routes are guarded by a shared token carried in the
//! `x-admin-token` header and configured via `TURNERA_ADMIN_TOKEN`.
//! Per-tenant admin credentials are handled by an external admin workflow,
//! not by this server.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use serde_json::json;

use crate::state::AppState;

/// Header carrying the admin token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extractor that requires a valid admin token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     _admin: RequireAdmin,
///     State(state): State<AppState>,
/// ) -> impl IntoResponse {
///     // only reached with a valid token
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdmin;

/// Error returned when the admin token is missing or wrong.
pub struct AdminRejection;

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "missing or invalid admin token" })),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AdminRejection)?;

        let expected = state.config().admin_token.expose_secret();
        if constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            Ok(Self)
        } else {
            Err(AdminRejection)
        }
    }
}

/// Compare tokens without short-circuiting on the first mismatched byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"token", b"token"));
        assert!(!constant_time_eq(b"token", b"tokem"));
        assert!(!constant_time_eq(b"token", b"toke"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
