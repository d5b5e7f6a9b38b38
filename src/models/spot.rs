// SPDX-License-Identifier: MIT

//! Sport spot model for storage and API.

use serde::{Deserialize, Serialize};

/// Stored spot record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    /// Document ID (UUID)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Sport practiced at this spot
    #[serde(default)]
    pub sport_type: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub photos: Vec<String>,
    /// Account that created the spot
    pub created_by: String,
    pub created_at: String,
}
