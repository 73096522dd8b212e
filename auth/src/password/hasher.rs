use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use super::errors::PasswordError;
use super::secret::CredentialSecret;
use crate::encoding::constant_time_eq;

/// Password hashing implementation.
///
/// Derives keys with PBKDF2-HMAC-SHA256 over a fresh random salt and stores
/// them as a self-describing [`CredentialSecret`].
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    /// Default PBKDF2 work factor.
    pub const DEFAULT_ITERATIONS: u32 = 100_000;

    /// Longest accepted password, in UTF-8 bytes.
    pub const MAX_PASSWORD_BYTES: usize = 72;

    pub const SALT_LEN: usize = 32;

    pub const KEY_LEN: usize = 32;

    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher using the default iteration count
    pub fn new() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
        }
    }

    /// Create a password hasher with a custom work factor.
    ///
    /// Only affects newly created secrets; existing secrets carry their own count.
    ///
    /// # Arguments
    /// * `iterations` - PBKDF2 iteration count
    ///
    /// # Errors
    /// * `InvalidIterations` - Iteration count is zero
    pub fn with_iterations(iterations: u32) -> Result<Self, PasswordError> {
        if iterations == 0 {
            return Err(PasswordError::InvalidIterations(iterations));
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash a plaintext password securely.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Credential secret string `<iterations>$<salt hex>$<key hex>`
    ///
    /// # Errors
    /// * `TooLong` - Password exceeds 72 bytes
    /// * `RandomnessUnavailable` - OS random source failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.hash_secret(password).map(|secret| secret.to_string())
    }

    /// Same as [`PasswordHasher::hash`], returning the structured secret.
    pub fn hash_secret(&self, password: &str) -> Result<CredentialSecret, PasswordError> {
        Self::check_length(password)?;

        let mut salt = vec![0u8; Self::SALT_LEN];
        OsRng.try_fill_bytes(&mut salt).map_err(|e| {
            tracing::error!(error = %e, "OS random source failed while generating salt");
            PasswordError::RandomnessUnavailable(e.to_string())
        })?;

        let derived_key = derive(password.as_bytes(), &salt, self.iterations, Self::KEY_LEN);

        Ok(CredentialSecret::new(self.iterations, salt, derived_key))
    }

    /// Verify a password against a stored secret.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `secret` - Stored credential secret string
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedSecret` - Stored secret does not have the expected format
    pub fn verify(&self, password: &str, secret: &str) -> Result<bool, PasswordError> {
        let parsed = CredentialSecret::parse(secret)?;
        Ok(self.verify_secret(password, &parsed))
    }

    /// Verify a password against an already parsed secret.
    pub fn verify_secret(&self, password: &str, secret: &CredentialSecret) -> bool {
        let candidate = derive(
            password.as_bytes(),
            secret.salt(),
            secret.iterations(),
            Self::KEY_LEN,
        );

        constant_time_eq(&candidate, secret.derived_key())
    }

    /// Fixed secret at this hasher's work factor that no stored account uses.
    ///
    /// Verifying against it costs the same as a real verification.
    pub fn placeholder_secret(&self) -> CredentialSecret {
        CredentialSecret::new(
            self.iterations,
            vec![0u8; Self::SALT_LEN],
            vec![0u8; Self::KEY_LEN],
        )
    }

    fn check_length(password: &str) -> Result<(), PasswordError> {
        let actual = password.len();
        if actual > Self::MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong {
                max: Self::MAX_PASSWORD_BYTES,
                actual,
            });
        }
        Ok(())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
thread_local! {
    pub(crate) static DERIVATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

fn derive(password: &[u8], salt: &[u8], iterations: u32, key_len: usize) -> Vec<u8> {
    #[cfg(test)]
    DERIVATIONS.with(|count| count.set(count.get() + 1));

    let mut key = vec![0u8; key_len];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    key
}
