use std::env;
use std::time::Duration;

use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Debug mode serves from the in-memory store instead of Postgres.
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,
    #[serde(default = "default_connect_retry_interval_secs")]
    pub connect_retry_interval_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub secret_key: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_retries() -> u32 {
    5
}

fn default_connect_retry_interval_secs() -> u64 {
    5
}

fn default_algorithm() -> String {
    TokenSettings::DEFAULT_ALGORITHM.to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    TokenSettings::DEFAULT_LIFETIME_MINUTES
}

fn default_iterations() -> u32 {
    auth::PasswordHasher::DEFAULT_ITERATIONS
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
        }
    }
}

impl DatabaseConfig {
    pub fn connect_retry_interval(&self) -> Duration {
        Duration::from_secs(self.connect_retry_interval_secs)
    }
}

impl TokenConfig {
    /// Token settings for the auth core.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Lifetime does not fit a duration
    pub fn settings(&self) -> Result<TokenSettings, ConfigError> {
        let lifetime = chrono::Duration::try_minutes(self.access_token_expire_minutes)
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "token.access_token_expire_minutes out of range: {}",
                    self.access_token_expire_minutes
                ))
            })?;

        Ok(TokenSettings::new(self.secret_key.clone())
            .with_algorithm(self.algorithm.clone())
            .with_lifetime(lifetime))
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__SECRET_KEY, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET_KEY=... overrides token.secret_key
            .add_source(
                Environment::with_prefix("")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
