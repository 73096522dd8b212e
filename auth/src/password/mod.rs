pub mod errors;
pub mod hasher;
pub mod secret;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use secret::CredentialSecret;
