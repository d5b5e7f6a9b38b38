// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod activity;
pub mod challenge;
pub mod favorite;
pub mod spot;
pub mod user;

pub use activity::Activity;
pub use challenge::{Challenge, ChallengeUnit};
pub use favorite::{Favorite, FavoriteKind};
pub use spot::Spot;
pub use user::{Account, AccountStats, Badge, PublicAccount};
