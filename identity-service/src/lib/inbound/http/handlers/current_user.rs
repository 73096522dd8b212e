use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Profile of the account the bearer token was issued for.
pub async fn current_user(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&user).into())
}
