// SPDX-License-Identifier: MIT

//! Favorite model: spots or events bookmarked by a user.

use serde::{Deserialize, Serialize};

/// What kind of item a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Spot,
    Event,
}

/// Stored favorite record in Firestore.
///
/// A user may favorite a given item only once per kind; the handler checks
/// for an existing record before inserting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Document ID (UUID)
    pub id: String,
    pub user_id: String,
    /// ID of the favorited spot or event
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    pub created_at: String,
}
