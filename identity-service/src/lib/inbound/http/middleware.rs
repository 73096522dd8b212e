use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that resolves the bearer token to an account and adds it to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)
        .ok_or_else(|| ApiError::Unauthorized(NOT_AUTHENTICATED.to_string()).into_response())?;

    let user = state
        .user_service
        .current_user(token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively.
fn extract_token_from_header(req: &Request) -> Option<&str> {
    let auth_str = req
        .headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let (scheme, token) = auth_str.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
