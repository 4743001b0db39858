//! InferCircle access backend entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use secrecy::ExposeSecret;
use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use infercircle::adapters::email::ResendMailer;
use infercircle::adapters::flutterwave::{FlutterwaveConfig, FlutterwaveGateway};
use infercircle::adapters::http::{api_router, AppState};
use infercircle::adapters::postgres::{
    PostgresInviteCodeRepository, PostgresInviteGrantRepository, PostgresSubscriptionRepository,
    PostgresUserRepository,
};
use infercircle::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting InferCircle access backend"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let gateway_config =
        FlutterwaveConfig::new(config.payment.flutterwave_secret_key.expose_secret().clone())
            .with_base_url(config.payment.api_base_url.clone());

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        invite_codes: Arc::new(PostgresInviteCodeRepository::new(pool.clone())),
        invite_grants: Arc::new(PostgresInviteGrantRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        payment_gateway: Arc::new(FlutterwaveGateway::new(gateway_config)),
        mailer: Arc::new(ResendMailer::new(&config.email)),
        admin_emails: config.access.admin_emails_list(),
        payment_redirect_url: config.payment.redirect_url.clone(),
        webhook_secret: config
            .payment
            .flutterwave_webhook_secret
            .expose_secret()
            .clone(),
    };

    let origins = config
        .server
        .cors_origins_list()
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::any())
        .allow_origin(AllowOrigin::list(origins));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
