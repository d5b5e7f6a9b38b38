// SPDX-License-Identifier: MIT

//! Middleware modules (authentication, guards, security, rate limiting).

pub mod auth;
pub mod guards;
pub mod rate_limit;
pub mod security;

pub use auth::{require_auth, CurrentUser};
