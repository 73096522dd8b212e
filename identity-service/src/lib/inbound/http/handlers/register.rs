use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::TelegramHandle;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;
use crate::user::errors::TelegramError;
use crate::user::errors::UsernameError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    telegram: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid telegram: {0}")]
    Telegram(#[from] TelegramError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let telegram = TelegramHandle::new(self.telegram)?;
        let password = Password::new(self.password)?;
        Ok(CreateUserCommand::new(username, email, telegram, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str, telegram: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            telegram: telegram.to_string(),
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let command = request("alice", "alice@example.com", "secret", "@alice")
            .try_into_command()
            .expect("valid request");
        assert_eq!(command.username.as_str(), "alice");
        assert_eq!(command.telegram.as_str(), "@alice");
    }

    #[test]
    fn test_each_field_is_validated() {
        assert!(matches!(
            request("al", "alice@example.com", "secret", "@alice").try_into_command(),
            Err(ParseRegisterRequestError::Username(_))
        ));
        assert!(matches!(
            request("alice", "alice", "secret", "@alice").try_into_command(),
            Err(ParseRegisterRequestError::Email(_))
        ));
        assert!(matches!(
            request("alice", "alice@example.com", "secret", "").try_into_command(),
            Err(ParseRegisterRequestError::Telegram(_))
        ));
        assert!(matches!(
            request("alice", "alice@example.com", &"p".repeat(73), "@alice").try_into_command(),
            Err(ParseRegisterRequestError::Password(_))
        ));
    }
}
