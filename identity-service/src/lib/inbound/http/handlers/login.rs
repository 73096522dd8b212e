use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::inbound::http::router::AppState;

/// OAuth2 password grant style login.
///
/// `username` may hold either a username or an email address. The success
/// body is the bare OAuth2 token response, outside the `{status_code, data}`
/// envelope, so stock OAuth2 clients can read it.
pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<LoginForm>,
) -> Result<Json<LoginResponseData>, ApiError> {
    let command = LoginCommand {
        identifier: LoginIdentifier::parse(&body.username),
        password: body.password,
    };

    state
        .user_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|token| Json(token.into()))
}

/// Form fields of the login request. Extra OAuth2 fields such as
/// `grant_type` and `scope` are accepted and ignored.
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}

impl From<AccessToken> for LoginResponseData {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
        }
    }
}
