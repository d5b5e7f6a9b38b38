// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod password;
pub mod tokens;
pub mod weather;

pub use tokens::{KeyClass, TokenError, TokenService};
pub use weather::WeatherService;
