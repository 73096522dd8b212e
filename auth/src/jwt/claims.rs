use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Access token payload.
///
/// Registered RFC 7519 claims only. All fields are optional on the wire so a
/// token missing one still deserializes and is rejected by the verifier with a
/// precise reason rather than a generic decode failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Claims {
    /// Subject (username)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject expiring `lifetime` after `now`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token is bound to
    /// * `now` - Issue time
    /// * `lifetime` - Validity window
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    ///
    /// # Errors
    /// * `InvalidLifetime` - Expiry falls outside the representable time range
    pub fn for_subject(
        subject: impl ToString,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or(JwtError::InvalidLifetime)?;

        Ok(Self {
            sub: Some(subject.to_string()),
            exp: Some(expires_at.timestamp()),
            iat: Some(now.timestamp()),
            nbf: None,
        })
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set not before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Check if token is expired.
    ///
    /// A token stays valid through its `exp` second and expires after it.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }

    /// Check if the token's `nbf` lies in the future.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        self.nbf.map_or(false, |nbf| nbf > current_timestamp)
    }
}

/// Identity recovered from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
}

impl IdentityClaim {
    pub fn subject(&self) -> &str {
        &self.subject
    }
}
