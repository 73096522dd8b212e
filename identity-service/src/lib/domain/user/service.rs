use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// PBKDF2 work runs on the blocking pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Credential hashing and token issuance
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn find_account(&self, identifier: &LoginIdentifier) -> Result<Option<User>, UserError> {
        match identifier {
            LoginIdentifier::Email(email) => self.repository.find_by_email(email).await,
            // A name that could never have been registered matches nobody.
            LoginIdentifier::Username(name) => match Username::new(name.clone()) {
                Ok(username) => self.repository.find_by_username(&username).await,
                Err(_) => Ok(None),
            },
        }
    }
}

fn blocking_task_failed(err: tokio::task::JoinError) -> UserError {
    UserError::Unknown(format!("Credential task failed: {}", err))
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(blocking_task_failed)?
                .map_err(|err| {
                    if err.is_validation() {
                        tracing::warn!(error = %err, "Password rejected");
                    } else {
                        tracing::error!(error = %err, "Credential hashing failed");
                    }
                    UserError::from(err)
                })?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            telegram: command.telegram,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError> {
        let account = self.find_account(&command.identifier).await?;
        let username = account.as_ref().map(|user| user.username.clone());

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let now = Utc::now();
        let outcome = tokio::task::spawn_blocking(move || match account {
            Some(user) => authenticator.authenticate(
                &password,
                &user.password_hash,
                user.username.as_str(),
                now,
            ),
            None => Err(authenticator.reject_unknown_account(&password)),
        })
        .await
        .map_err(blocking_task_failed)?;

        match outcome {
            Ok(result) => {
                let token = AccessToken::from(result);
                tracing::info!(
                    username = ?username,
                    expires_at = %token.expires_at,
                    "Access token issued"
                );
                Ok(token)
            }
            Err(auth::AuthenticationError::InvalidCredentials) => {
                tracing::info!(identifier = ?command.identifier, "Login refused");
                Err(UserError::InvalidCredentials)
            }
            Err(err) => {
                tracing::error!(username = ?username, error = %err, "Login failed");
                Err(UserError::from(err))
            }
        }
    }

    async fn current_user(&self, token: &str) -> Result<User, UserError> {
        let identity = self
            .authenticator
            .validate_token(token, Utc::now())
            .map_err(|rejection| {
                tracing::warn!(reason = rejection.reason(), "Access token rejected");
                UserError::from(rejection)
            })?;

        let username = Username::new(identity.subject().to_string()).map_err(|_| {
            tracing::warn!(reason = "invalid_subject", "Access token rejected");
            UserError::Unauthenticated {
                reason: "invalid_subject",
            }
        })?;

        self.repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(reason = "unknown_subject", "Access token rejected");
                UserError::Unauthenticated {
                    reason: "unknown_subject",
                }
            })
    }
}
