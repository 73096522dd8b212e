use std::sync::Arc;

use auth::Authenticator;
use identity_service::config::Config;
use identity_service::domain::user::ports::UserServicePort;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::cors_layer;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::database::connect_with_retry;
use identity_service::outbound::repositories::InMemoryUserRepository;
use identity_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        debug = config.server.debug,
        token_algorithm = %config.token.algorithm,
        token_lifetime_minutes = config.token.access_token_expire_minutes,
        password_iterations = config.password.iterations,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::from_settings(
        &config.token.settings()?,
        config.password.iterations,
    )?);

    let user_service: Arc<dyn UserServicePort> = if config.server.debug {
        tracing::warn!(
            database = "memory",
            "Debug mode: accounts are kept in memory and lost on restart"
        );
        let user_repository = Arc::new(InMemoryUserRepository::new());
        Arc::new(UserService::new(user_repository, authenticator))
    } else {
        let pg_pool = connect_with_retry(&config.database).await?;
        tracing::info!(
            max_connections = config.database.max_connections,
            database = "postgresql",
            "Database connection pool created"
        );

        sqlx::migrate!("./migrations").run(&pg_pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
        Arc::new(UserService::new(user_repository, authenticator))
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        config.server.debug,
        cors_layer(&config.cors.allowed_origins)?,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
