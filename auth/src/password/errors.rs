use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password cannot be longer than {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Malformed credential secret: {0}")]
    MalformedSecret(String),

    #[error("Invalid iteration count: {0}")]
    InvalidIterations(u32),

    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),
}

impl PasswordError {
    /// Whether this error was caused by bad input rather than the environment.
    ///
    /// Randomness failures are infrastructure faults; everything else is a
    /// validation failure that retrying will not fix.
    pub fn is_validation(&self) -> bool {
        !matches!(self, PasswordError::RandomnessUnavailable(_))
    }
}
