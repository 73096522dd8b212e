use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::Claims;
use super::claims::IdentityClaim;
use super::errors::JwtError;
use super::errors::TokenRejection;
use super::settings::TokenSettings;

/// Issues and verifies signed, expiring access tokens.
///
/// Tokens are compact JWS strings (`header.payload.signature`) signed with an
/// HMAC algorithm, so any standard JWT library holding the key can read them.
/// Time is always passed in by the caller.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler configured with HS256 and the default 30 minute lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime: Duration::minutes(TokenSettings::DEFAULT_LIFETIME_MINUTES),
        }
    }

    /// Create a JWT handler from operator configuration.
    ///
    /// # Errors
    /// * `EmptySecret` - Signing key is empty
    /// * `UnsupportedAlgorithm` - Algorithm is unknown or not HMAC based
    /// * `InvalidLifetime` - Lifetime is not positive or exceeds the maximum
    pub fn from_settings(settings: &TokenSettings) -> Result<Self, JwtError> {
        if settings.secret_key.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let max_lifetime = Duration::try_days(TokenSettings::MAX_LIFETIME_DAYS)
            .ok_or(JwtError::InvalidLifetime)?;
        if settings.access_token_lifetime <= Duration::zero()
            || settings.access_token_lifetime > max_lifetime
        {
            return Err(JwtError::InvalidLifetime);
        }

        let secret = settings.secret_key.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: settings.signing_algorithm()?,
            lifetime: settings.access_token_lifetime,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Expiry instant of a token issued at `now`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Expiry falls outside the representable time range
    pub fn expires_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, JwtError> {
        now.checked_add_signed(self.lifetime)
            .ok_or(JwtError::InvalidLifetime)
    }

    /// Mint an access token for `subject`, valid for the configured lifetime.
    ///
    /// # Arguments
    /// * `subject` - Identity to bind the token to
    /// * `now` - Issue time
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Empty subject or signing failed
    /// * `InvalidLifetime` - Expiry falls outside the representable time range
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        if subject.is_empty() {
            return Err(JwtError::EncodingFailed(
                "subject must not be empty".to_string(),
            ));
        }

        self.encode(&Claims::for_subject(subject, now, self.lifetime)?)
    }

    /// Verify a presented token and recover its subject.
    ///
    /// Checks, in order: structure and signature, presence of `exp`, expiry
    /// against `now` (zero leeway), `nbf` if present, presence of `sub`.
    ///
    /// # Arguments
    /// * `token` - Token string as presented by the client
    /// * `now` - Verification time
    ///
    /// # Returns
    /// Identity claim for the token subject
    ///
    /// # Errors
    /// * `TokenRejection` - Tagged reason; all variants share one public message
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaim, TokenRejection> {
        let claims: Claims = self.decode(token)?;

        let exp = claims.exp.ok_or(TokenRejection::MissingExpiry)?;
        if claims.is_expired(now.timestamp()) {
            return Err(TokenRejection::Expired);
        }
        if claims.is_premature(now.timestamp()) {
            return Err(TokenRejection::NotYetValid);
        }

        let subject = claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(TokenRejection::MissingSubject)?;

        let expires_at = DateTime::from_timestamp(exp, 0).ok_or(TokenRejection::Malformed)?;

        Ok(IdentityClaim {
            subject,
            expires_at,
        })
    }

    /// Encode claims into a JWT token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a JWT token, checking structure, algorithm and signature only.
    ///
    /// Time-based claims are not inspected here; see [`JwtHandler::verify`].
    ///
    /// # Errors
    /// * `TokenRejection` - Malformed, wrong algorithm or bad signature
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenRejection> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenRejection::from(&e))
    }
}
