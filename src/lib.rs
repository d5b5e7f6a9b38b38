// SPDX-License-Identifier: MIT

//! Fitspot: fitness and sports-activity tracking backend.
//!
//! This crate provides the REST API for user accounts, activities, sport
//! spots, favorites, business challenges, employees and weather lookups,
//! backed by Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use middleware::rate_limit::RateLimiter;
use services::{TokenService, WeatherService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub tokens: TokenService,
    pub weather: WeatherService,
    pub rate_limiter: RateLimiter,
}
