pub mod claims;
pub mod errors;
pub mod handler;
pub mod settings;

pub use claims::Claims;
pub use claims::IdentityClaim;
pub use errors::JwtError;
pub use errors::TokenRejection;
pub use handler::JwtHandler;
pub use settings::TokenSettings;
