// SPDX-License-Identifier: MIT

//! Business challenge model.

use serde::{Deserialize, Serialize};

/// Unit a challenge goal is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeUnit {
    Steps,
    Km,
    Hours,
    Activities,
}

/// Stored challenge record in Firestore, owned by a business account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// Document ID (UUID)
    pub id: String,
    /// Owning business account ID
    pub business_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub goal: f64,
    pub unit: ChallengeUnit,
    /// Start date (ISO 8601)
    pub start_date: String,
    /// End date (ISO 8601)
    pub end_date: String,
    /// Participating account IDs
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub progress: f64,
    pub created_at: String,
}
