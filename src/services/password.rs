// SPDX-License-Identifier: MIT

//! Password hashing helpers (bcrypt).

use crate::error::AppError;

/// Hash a plaintext password with bcrypt at the default cost.
pub fn hash(plain: &str) -> Result<String, AppError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// An unparsable stored hash counts as a mismatch rather than an error,
/// so login failures stay indistinguishable from the outside.
pub fn verify(plain: &str, hashed: &str) -> bool {
    bcrypt::verify(plain, hashed).unwrap_or(false)
}

/// Detect a client-supplied bcrypt hash masquerading as a password.
///
/// Clients must always send the plaintext; accepting a pre-hashed value
/// would make the hash itself the password.
pub fn looks_prehashed(candidate: &str) -> bool {
    candidate.starts_with("$2a$") || candidate.starts_with("$2b$") || candidate.starts_with("$2y$")
}
