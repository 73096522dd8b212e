use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, telegram and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Exchange an identifier and password for an access token.
    ///
    /// # Arguments
    /// * `command` - Email or username plus plaintext password
    ///
    /// # Returns
    /// Signed access token bound to the account's username
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or wrong password, indistinguishably
    /// * `CorruptCredential` - Stored secret could not be parsed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError>;

    /// Resolve the account an access token was issued for.
    ///
    /// # Arguments
    /// * `token` - Compact JWT taken from the bearer header
    ///
    /// # Returns
    /// User entity for the token subject
    ///
    /// # Errors
    /// * `Unauthenticated` - Token rejected or subject no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn current_user(&self, token: &str) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// Uniqueness of username and email is decided here, atomically with the
    /// insert. Of two concurrent registrations for the same name exactly one
    /// succeeds.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
