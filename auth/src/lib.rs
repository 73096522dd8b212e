//! Credential and access token core
//!
//! Provides the security-sensitive pieces of the identity service:
//! - Password hashing (PBKDF2-HMAC-SHA256, self-describing stored secrets)
//! - Access token issuance and verification (HMAC-signed JWT)
//! - Authentication coordination
//!
//! All operations are synchronous and stateless. Time is passed in explicitly
//! so callers and tests control the clock.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let secret = hasher.hash("correct-password").unwrap();
//! assert!(secret.starts_with("100000$"));
//! assert!(hasher.verify("correct-password", &secret).unwrap());
//! assert!(!hasher.verify("wrong-password", &secret).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{JwtHandler, TokenSettings};
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::from_settings(&TokenSettings::new("secret_key_at_least_32_bytes_long!")).unwrap();
//! let now = Utc::now();
//! let token = handler.issue("alice", now).unwrap();
//! assert_eq!(handler.verify(&token, now).unwrap().subject(), "alice");
//! assert!(handler.verify(&token, now + Duration::minutes(31)).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "alice", Utc::now()).unwrap();
//!
//! // Validate token
//! let identity = auth.validate_token(&result.access_token, Utc::now()).unwrap();
//! assert_eq!(identity.subject(), "alice");
//! ```

pub mod authenticator;
pub mod encoding;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IdentityClaim;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenRejection;
pub use jwt::TokenSettings;
pub use password::CredentialSecret;
pub use password::PasswordError;
pub use password::PasswordHasher;
