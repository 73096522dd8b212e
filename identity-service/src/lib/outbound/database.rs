use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Open the Postgres pool, waiting for the database to come up.
///
/// Makes up to `connect_retries` attempts spaced `connect_retry_interval_secs`
/// apart. A container started alongside its database usually needs this.
///
/// # Arguments
/// * `config` - Database section of the service configuration
///
/// # Returns
/// Connected pool
///
/// # Errors
/// * `sqlx::Error` - Last connection error once attempts are exhausted
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let max_attempts = config.connect_retries.max(1);
    let interval = config.connect_retry_interval();
    let mut attempt = 1;

    loop {
        let result = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await;

        match result {
            Ok(pool) => {
                if attempt > 1 {
                    tracing::info!(attempt, "Database reachable after retry");
                }
                return Ok(pool);
            }
            Err(err) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    retry_in_secs = interval.as_secs(),
                    error = %err,
                    "Database not ready, retrying"
                );
                tokio::time::sleep(interval).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "Database unreachable, giving up"
                );
                return Err(err);
            }
        }
    }
}
