// SPDX-License-Identifier: MIT

//! Fitspot API Server
//!
//! REST backend for tracking sports activities, spots, favorites and
//! business challenges, with Firestore storage and JWT authentication.

use fitspot_backend::{
    config::Config,
    db::FirestoreDb,
    middleware::rate_limit::RateLimiter,
    services::{TokenService, WeatherService},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    fitspot_backend::error::init_dev_mode(config.is_development());
    tracing::info!(port = config.port, "Starting Fitspot API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.firestore_project_id)
        .await
        .expect("Failed to connect to Firestore");

    let tokens = TokenService::new(&config);
    let weather = WeatherService::new(config.openweather_api_key.clone());
    let rate_limiter = RateLimiter::new(
        config.rate_limit_max,
        Duration::from_millis(config.rate_limit_window_ms),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        tokens,
        weather,
        rate_limiter,
    });

    // Build router
    let app = fitspot_backend::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitspot_backend=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
