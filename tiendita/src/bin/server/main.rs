use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::PasswordHasher;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tiendita::config::Config;
use tiendita::domain::customer::ports::CustomerServicePort;
use tiendita::domain::customer::service::CustomerService;
use tiendita::domain::user::models::EmailAddress;
use tiendita::domain::user::ports::AuthServicePort;
use tiendita::domain::user::service::AuthService;
use tiendita::inbound::http::router::create_router;
use tiendita::outbound::repositories::InMemoryCustomerRepository;
use tiendita::outbound::repositories::InMemoryUserRepository;
use tiendita::outbound::repositories::PostgresCustomerRepository;
use tiendita::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiendita=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "tiendita",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.url.is_some(),
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
        password_hasher,
    ));

    let admin_emails = config
        .auth
        .admin_emails
        .iter()
        .map(|email| {
            EmailAddress::new(email.clone())
                .with_context(|| format!("Invalid admin email in auth.admin_emails: {}", email))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (auth_service, customer_service): (Arc<dyn AuthServicePort>, Arc<dyn CustomerServicePort>) =
        match config.database.url.as_deref() {
            Some(url) => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(url)
                    .await?;
                tracing::info!(
                    max_connections = config.database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                (
                    Arc::new(
                        AuthService::new(
                            Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                            Arc::clone(&authenticator),
                        )
                        .with_admin_emails(admin_emails),
                    ),
                    Arc::new(CustomerService::new(Arc::new(
                        PostgresCustomerRepository::new(pg_pool),
                    ))),
                )
            }
            None => {
                tracing::warn!("No database.url configured, data is kept in memory only");

                (
                    Arc::new(
                        AuthService::new(
                            Arc::new(InMemoryUserRepository::new()),
                            Arc::clone(&authenticator),
                        )
                        .with_admin_emails(admin_emails),
                    ),
                    Arc::new(CustomerService::new(Arc::new(
                        InMemoryCustomerRepository::new(),
                    ))),
                )
            }
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, customer_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
