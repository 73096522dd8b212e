//! Byte helpers shared by the password and token modules.

use subtle::ConstantTimeEq;

use crate::password::PasswordError;

/// Compare two byte slices without short-circuiting on the first difference.
///
/// Slices of different lengths compare unequal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Lowercase hex encoding.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a non-empty hex field of a credential secret.
///
/// # Errors
/// * `MalformedSecret` - Field is empty or not valid hex
pub fn from_hex(field: &str, name: &str) -> Result<Vec<u8>, PasswordError> {
    if field.is_empty() {
        return Err(PasswordError::MalformedSecret(format!("{} is empty", name)));
    }

    hex::decode(field)
        .map_err(|e| PasswordError::MalformedSecret(format!("{} is not valid hex: {}", name, e)))
}
