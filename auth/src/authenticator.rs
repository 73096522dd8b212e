use chrono::DateTime;
use chrono::Utc;

use crate::jwt::IdentityClaim;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenRejection;
use crate::jwt::TokenSettings;
use crate::password::CredentialSecret;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    unknown_account_secret: CredentialSecret,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Always `"bearer"`
    pub token_type: String,

    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    pub const TOKEN_TYPE: &'static str = "bearer";

    /// Create a new authenticator with default hashing and HS256 tokens.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_components(PasswordHasher::new(), JwtHandler::new(jwt_secret))
    }

    /// Assemble an authenticator from already configured parts.
    pub fn with_components(password_hasher: PasswordHasher, jwt_handler: JwtHandler) -> Self {
        Self {
            unknown_account_secret: password_hasher.placeholder_secret(),
            password_hasher,
            jwt_handler,
        }
    }

    /// Build an authenticator from operator configuration.
    ///
    /// # Arguments
    /// * `token_settings` - Signing key, algorithm and lifetime
    /// * `password_iterations` - PBKDF2 work factor for new secrets
    ///
    /// # Errors
    /// * `PasswordError` - Invalid iteration count
    /// * `JwtError` - Invalid token settings
    pub fn from_settings(
        token_settings: &TokenSettings,
        password_iterations: u32,
    ) -> Result<Self, AuthenticationError> {
        Ok(Self::with_components(
            PasswordHasher::with_iterations(password_iterations)?,
            JwtHandler::from_settings(token_settings)?,
        ))
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Credential secret string
    ///
    /// # Errors
    /// * `PasswordError` - Password too long or randomness unavailable
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate an access token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored credential secret
    /// * `subject` - Identity to bind the token to
    /// * `now` - Issue time
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored secret is malformed
    /// * `JwtError` - Token generation failed or expiry out of range
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let expires_at = self.jwt_handler.expires_at(now)?;
        let access_token = self.jwt_handler.issue(subject, now)?;

        Ok(AuthenticationResult {
            access_token,
            token_type: Self::TOKEN_TYPE.to_string(),
            expires_at,
        })
    }

    /// Spend the same derivation work as a real verification, then fail.
    ///
    /// Used when no account matches the login identifier so that response time
    /// does not reveal whether the account exists. Runs for any password
    /// length, matching [`Authenticator::authenticate`].
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let matched = self
            .password_hasher
            .verify_secret(password, &self.unknown_account_secret);
        std::hint::black_box(matched);
        AuthenticationError::InvalidCredentials
    }

    /// Generate an access token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, now)
    }

    /// Validate an access token and recover the identity it carries.
    ///
    /// # Errors
    /// * `TokenRejection` - Token failed validation
    pub fn validate_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<IdentityClaim, TokenRejection> {
        self.jwt_handler.verify(token, now)
    }
}
