//! Bearer token guard for protected routes
//!
//! The guard is explicit middleware applied per-route; the verified subject
//! identifier travels to the wrapped handler through request extensions.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tracing::error;

use crate::{error::ApiError, state::AppState};

/// Extract and verify the bearer token from the Authorization header
///
/// Rejects with 401 when the token is absent, malformed, expired, or carries
/// a bad signature. On success the token's subject UUID is inserted into the
/// request extensions.
pub async fn auth_guard(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(ApiError::unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(ApiError::unauthorized)?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        error!("Token validation failed: {}", e);
        ApiError::unauthorized()
    })?;

    req.extensions_mut().insert(claims.sub);

    Ok(next.run(req).await)
}
