use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Serves debug mode and tests. State is lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        // Check and insert under one write guard.
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }
}
