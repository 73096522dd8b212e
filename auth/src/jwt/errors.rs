use thiserror::Error;

/// Error type for token configuration and issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Signing key must not be empty")]
    EmptySecret,

    #[error("Token lifetime must be positive and at most 365 days")]
    InvalidLifetime,
}

/// Reason a presented access token was refused.
///
/// Every variant renders the same public message so callers cannot learn
/// which check failed; use [`TokenRejection::reason`] for logs and metrics.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum TokenRejection {
    #[error("Could not validate credentials")]
    Malformed,

    #[error("Could not validate credentials")]
    BadSignature,

    #[error("Could not validate credentials")]
    AlgorithmMismatch,

    #[error("Could not validate credentials")]
    Expired,

    #[error("Could not validate credentials")]
    NotYetValid,

    #[error("Could not validate credentials")]
    MissingExpiry,

    #[error("Could not validate credentials")]
    MissingSubject,
}

impl TokenRejection {
    /// Public message shared by all rejections.
    pub const MESSAGE: &'static str = "Could not validate credentials";

    /// Stable tag for internal diagnostics. Never send this to clients.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenRejection::Malformed => "malformed",
            TokenRejection::BadSignature => "bad_signature",
            TokenRejection::AlgorithmMismatch => "algorithm_mismatch",
            TokenRejection::Expired => "expired",
            TokenRejection::NotYetValid => "not_yet_valid",
            TokenRejection::MissingExpiry => "missing_expiry",
            TokenRejection::MissingSubject => "missing_subject",
        }
    }
}

impl From<&jsonwebtoken::errors::Error> for TokenRejection {
    fn from(err: &jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => TokenRejection::BadSignature,
            ErrorKind::InvalidAlgorithm => TokenRejection::AlgorithmMismatch,
            ErrorKind::ExpiredSignature => TokenRejection::Expired,
            ErrorKind::ImmatureSignature => TokenRejection::NotYetValid,
            _ => TokenRejection::Malformed,
        }
    }
}
