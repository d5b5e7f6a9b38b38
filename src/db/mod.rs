//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    pub const SPOTS: &str = "spots";
    pub const FAVORITES: &str = "favorites";
    pub const CHALLENGES: &str = "challenges";
}
