use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use super::errors::JwtError;

/// Operator-supplied token configuration.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret_key: String,
    pub algorithm: String,
    pub access_token_lifetime: Duration,
}

impl TokenSettings {
    pub const DEFAULT_ALGORITHM: &'static str = "HS256";

    pub const DEFAULT_LIFETIME_MINUTES: i64 = 30;

    /// Upper bound accepted for the access token lifetime.
    pub const MAX_LIFETIME_DAYS: i64 = 365;

    /// Settings with the default algorithm and a 30 minute lifetime.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            algorithm: Self::DEFAULT_ALGORITHM.to_string(),
            access_token_lifetime: Duration::minutes(Self::DEFAULT_LIFETIME_MINUTES),
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_token_lifetime = lifetime;
        self
    }

    /// Resolve the configured algorithm name.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Unknown name or not an HMAC algorithm
    pub fn signing_algorithm(&self) -> Result<Algorithm, JwtError> {
        let algorithm = Algorithm::from_str(self.algorithm.trim())
            .map_err(|_| JwtError::UnsupportedAlgorithm(self.algorithm.clone()))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            _ => Err(JwtError::UnsupportedAlgorithm(self.algorithm.clone())),
        }
    }
}

// Hand-written so the signing key never reaches logs.
impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_lifetime", &self.access_token_lifetime)
            .finish()
    }
}
