use std::fmt;
use std::str::FromStr;

use super::errors::PasswordError;
use crate::encoding::from_hex;
use crate::encoding::to_hex;

const SEPARATOR: char = '$';

/// Self-describing stored form of a password.
///
/// Serialized as `<iterations>$<salt hex>$<derived key hex>`, so verification
/// uses the parameters the secret was created with, not the current defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSecret {
    iterations: u32,
    salt: Vec<u8>,
    derived_key: Vec<u8>,
}

impl CredentialSecret {
    pub(crate) fn new(iterations: u32, salt: Vec<u8>, derived_key: Vec<u8>) -> Self {
        Self {
            iterations,
            salt,
            derived_key,
        }
    }

    /// Parse a stored secret.
    ///
    /// # Arguments
    /// * `secret` - Secret string as persisted by the user store
    ///
    /// # Returns
    /// Parsed CredentialSecret
    ///
    /// # Errors
    /// * `MalformedSecret` - Not exactly three `$`-separated fields, iteration
    ///   count not a positive integer, or salt/key not non-empty hex
    pub fn parse(secret: &str) -> Result<Self, PasswordError> {
        let fields: Vec<&str> = secret.split(SEPARATOR).collect();
        let [iterations, salt, derived_key] = fields.as_slice() else {
            return Err(PasswordError::MalformedSecret(format!(
                "expected 3 fields, got {}",
                fields.len()
            )));
        };

        let iterations = match iterations.parse::<u32>() {
            Ok(0) | Err(_) => {
                return Err(PasswordError::MalformedSecret(
                    "iteration count is not a positive integer".to_string(),
                ))
            }
            Ok(n) => n,
        };

        Ok(Self {
            iterations,
            salt: from_hex(salt, "salt")?,
            derived_key: from_hex(derived_key, "derived key")?,
        })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }
}

impl FromStr for CredentialSecret {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CredentialSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.iterations,
            to_hex(&self.salt),
            to_hex(&self.derived_key)
        )
    }
}

// Keeps key material out of logs.
impl fmt::Debug for CredentialSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSecret")
            .field("iterations", &self.iterations)
            .field("salt_len", &self.salt.len())
            .field("derived_key", &"<redacted>")
            .finish()
    }
}
