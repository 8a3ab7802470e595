use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub user_service_url: String,
    pub product_service_url: String,
    pub cart_service_url: String,
    pub order_service_url: String,
    pub wishlist_service_url: String,
    /// Upper bound on the backend work done for one inbound request
    pub backend_deadline: Duration,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            user_service_url: env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50051".to_string()),
            product_service_url: env::var("PRODUCT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            cart_service_url: env::var("CART_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50052".to_string()),
            order_service_url: env::var("ORDER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50053".to_string()),
            wishlist_service_url: env::var("WISHLIST_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50054".to_string()),
            backend_deadline: Duration::from_secs(
                env::var("BACKEND_DEADLINE_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("BACKEND_DEADLINE_SECS must be a whole number of seconds")?,
            ),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
