use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for TelegramHandle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TelegramError {
    #[error("Telegram handle must not be empty")]
    Empty,

    #[error("Telegram handle too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password cannot be longer than {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid telegram: {0}")]
    InvalidTelegram(#[from] TelegramError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    // Domain-level errors
    #[error("Username already taken")]
    UsernameAlreadyExists(String),

    #[error("Email already registered")]
    EmailAlreadyExists(String),

    #[error("Incorrect email or username or password")]
    InvalidCredentials,

    /// Presented access token was refused. `reason` is for logs only.
    #[error("Could not validate credentials")]
    Unauthenticated { reason: &'static str },

    // Infrastructure errors
    #[error("Stored credential is corrupt: {0}")]
    CorruptCredential(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::TooLong { max, actual } => {
                UserError::InvalidPassword(PasswordError::TooLong { max, actual })
            }
            auth::PasswordError::MalformedSecret(msg) => UserError::CorruptCredential(msg),
            auth::PasswordError::InvalidIterations(_)
            | auth::PasswordError::RandomnessUnavailable(_) => UserError::Unknown(err.to_string()),
        }
    }
}

impl From<auth::AuthenticationError> for UserError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => UserError::from(e),
            auth::AuthenticationError::JwtError(e) => {
                UserError::Unknown(format!("Token generation failed: {}", e))
            }
        }
    }
}

impl From<auth::TokenRejection> for UserError {
    fn from(rejection: auth::TokenRejection) -> Self {
        UserError::Unauthenticated {
            reason: rejection.reason(),
        }
    }
}
