//! Creditline server binary.
//!
//! Wires configuration, the database pool, and the adapters into an axum
//! application and serves it.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use creditline::adapters::auth::{ClerkConfig, ClerkTokenVerifier};
use creditline::adapters::http::billing::{billing_routes, BillingAppState};
use creditline::adapters::http::identity::{webhook_routes, IdentityAppState};
use creditline::adapters::http::middleware::{auth_middleware, AuthState};
use creditline::adapters::postgres::{PostgresTransactionRepository, PostgresUserRepository};
use creditline::adapters::razorpay::{RazorpayConfig, RazorpayGateway};
use creditline::config::AppConfig;
use creditline::domain::billing::CheckoutSignatureVerifier;
use creditline::domain::identity::IdentityWebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        "Starting creditline"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let transactions = Arc::new(PostgresTransactionRepository::new(pool.clone()));
    let gateway = Arc::new(RazorpayGateway::new(RazorpayConfig::new(
        config.payment.key_id.clone(),
        config.payment.key_secret.clone(),
    )));

    let billing_state = BillingAppState {
        users: users.clone(),
        transactions,
        gateway,
        checkout_verifier: CheckoutSignatureVerifier::new(
            config.payment.key_secret.expose_secret(),
        ),
        currency: config.payment.currency.clone(),
    };

    let identity_state = IdentityAppState {
        webhook_verifier: IdentityWebhookVerifier::new(
            config.auth.webhook_secret.expose_secret(),
        )?,
        users,
    };

    let token_verifier: AuthState = Arc::new(ClerkTokenVerifier::new(ClerkConfig::new(
        config.auth.issuer.clone(),
        config.auth.jwks_cache_ttl(),
    ))?);

    let api = Router::new()
        .merge(billing_routes().with_state(billing_state))
        .layer(axum::middleware::from_fn_with_state(
            token_verifier,
            auth_middleware,
        ));

    let webhooks = webhook_routes().with_state(identity_state);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .nest("/api/webhooks", webhooks)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        layer.allow_origin(tower_http::cors::Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn health() -> &'static str {
    "ok"
}
