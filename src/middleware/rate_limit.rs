// SPDX-License-Identifier: MIT

//! Fixed-window request rate limiting, keyed by client IP.
//!
//! Windows live in an in-process [`DashMap`]; counters reset when a
//! window elapses. This bounds each client to `max` requests per
//! configured window, matching the limiter the API has always exposed.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Window {
    started: Instant,
    count: u32,
}

/// In-memory fixed-window rate limiter.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    max: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max,
            window,
        }
    }

    /// Record a hit for `key`; returns false once the ceiling is exceeded
    /// within the current window.
    pub fn check(&self, key: &str) -> bool {
        // Keys come from client-controlled headers, so stale windows must
        // be dropped or the map grows without bound. Eviction runs before
        // taking the entry lock on the same shard.
        self.windows
            .retain(|_, w| w.started.elapsed() < self.window * 2);

        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            started: Instant::now(),
            count: 0,
        });

        if entry.started.elapsed() >= self.window {
            entry.started = Instant::now();
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= self.max
    }
}

/// Best-effort client key: proxy header first, then the peer address.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware enforcing the configured request-rate ceiling.
pub async fn enforce(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = client_key(&request);

    if !state.rate_limiter.check(&key) {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}
