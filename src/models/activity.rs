// SPDX-License-Identifier: MIT

//! Activity model for storage and API.

use serde::{Deserialize, Serialize};

/// Stored activity record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Document ID (UUID)
    pub id: String,
    /// Owning account ID
    pub user_id: String,
    pub name: String,
    /// Sport type (Run, Ride, Swim, ...)
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Activity date (ISO 8601 date)
    pub date: String,
    /// Time of day as entered by the user
    #[serde(default)]
    pub time: Option<String>,
    /// Duration in hours
    pub duration: f64,
    /// Business challenge this activity counts toward, if any
    #[serde(default)]
    pub challenge_id: Option<String>,
    pub created_at: String,
}
