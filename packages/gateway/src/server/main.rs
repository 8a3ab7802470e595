// Main entry point for the gateway

use std::sync::Arc;

use anyhow::{Context, Result};
use gateway_core::{kernel::ServerDeps, server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gateway_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting commerce gateway");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Wire backend clients
    let deps = Arc::new(ServerDeps::from_config(&config).context("Failed to set up backends")?);
    tracing::info!(
        users = %config.user_service_url,
        products = %config.product_service_url,
        carts = %config.cart_service_url,
        orders = %config.order_service_url,
        wishlists = %config.wishlist_service_url,
        deadline_secs = config.backend_deadline.as_secs(),
        "Backends configured"
    );

    // Build application
    let app = build_app(deps, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("GraphQL endpoint: http://localhost:{}/graphql", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
