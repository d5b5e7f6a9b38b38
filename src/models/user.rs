//! Account model for storage and its public API projection.

use serde::{Deserialize, Serialize};

/// Account record stored in Firestore.
///
/// The password is only ever stored as a bcrypt hash; API responses go
/// through [`PublicAccount`], which has no password field at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Document ID (UUID)
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Unique, stored lowercased
    pub email: String,
    /// bcrypt hash, never plaintext
    pub password_hash: String,
    /// GDPR consent to data processing
    pub consent: bool,
    /// Consent timestamp (RFC3339), kept for audit
    pub consent_at: Option<String>,
    /// Version of the accepted privacy policy
    pub policy_version: Option<String>,
    /// Business accounts manage employees, challenges and company stats
    #[serde(default)]
    pub is_business_user: bool,
    /// Owning business account, set on employee accounts
    #[serde(default)]
    pub business_owner: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub stats: AccountStats,
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub created_at: String,
}

/// Unlockable badge attached to an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub progress: f64,
}

/// Nested activity statistics block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    #[serde(default)]
    pub completed_activities: u32,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub avg_intensity: f64,
    #[serde(default)]
    pub active_streak: u32,
}

/// Public view of an account, shared by the register, login, me and
/// profile responses so the projections cannot drift apart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_business_user: bool,
    pub consent: bool,
    pub goals: Vec<String>,
    pub stats: AccountStats,
    pub badges: Vec<Badge>,
}

impl From<&Account> for PublicAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            is_business_user: account.is_business_user,
            consent: account.consent,
            goals: account.goals.clone(),
            stats: account.stats.clone(),
            badges: account.badges.clone(),
        }
    }
}
