// SPDX-License-Identifier: MIT

use fitspot_backend::config::Config;
use fitspot_backend::db::FirestoreDb;
use fitspot_backend::middleware::rate_limit::RateLimiter;
use fitspot_backend::routes::create_router;
use fitspot_backend::services::{KeyClass, TokenService, WeatherService};
use fitspot_backend::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let tokens = TokenService::new(&config);
    let weather = WeatherService::new(None);
    let rate_limiter = RateLimiter::new(
        config.rate_limit_max,
        Duration::from_millis(config.rate_limit_window_ms),
    );

    let state = Arc::new(AppState {
        config,
        db,
        tokens,
        weather,
        rate_limiter,
    });

    (create_router(state.clone()), state)
}

/// Create a test app backed by the Firestore emulator.
/// Callers must guard with `require_emulator!` first.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db().await;
    let tokens = TokenService::new(&config);
    let weather = WeatherService::new(None);
    let rate_limiter = RateLimiter::new(
        config.rate_limit_max,
        Duration::from_millis(config.rate_limit_window_ms),
    );

    let state = Arc::new(AppState {
        config,
        db,
        tokens,
        weather,
        rate_limiter,
    });

    (create_router(state.clone()), state)
}

/// Issue a valid access token for a fake account ID.
#[allow(dead_code)]
pub fn create_test_jwt(state: &AppState, account_id: &str) -> String {
    state
        .tokens
        .issue(account_id, KeyClass::Access)
        .expect("token issuance should not fail")
}
