// SPDX-License-Identifier: MIT

//! Token issuance and verification.
//!
//! Two classes of signed, time-bound HS256 tokens share the same claim
//! shape but use distinct signing keys and lifetimes:
//! - access tokens: 1 hour, used to authorize API calls
//! - refresh tokens: 7 days, used only to mint new access tokens
//!
//! Verification is purely functional over the keys and the clock; no
//! storage is touched and no token is ever persisted.

use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Access token lifetime: 1 hour.
pub const ACCESS_TOKEN_TTL_SECS: u64 = 60 * 60;
/// Refresh token lifetime: 7 days.
pub const REFRESH_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;
/// Clock-skew tolerance applied when verifying access tokens.
pub const ACCESS_LEEWAY_SECS: u64 = 5;

/// Which signing key a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Access,
    Refresh,
}

/// Token verification failures, classified by cause so the API can
/// return distinct messages for expiry vs a bad signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token expiré")]
    Expired,
    #[error("Signature invalide")]
    InvalidSignature,
    #[error("Token invalide")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and verifies both token classes.
///
/// Built once at startup from the configured secrets; read-only afterwards.
pub struct TokenService {
    access: KeyPair,
    refresh: KeyPair,
}

impl TokenService {
    pub fn new(config: &crate::config::Config) -> Self {
        Self {
            access: KeyPair::from_secret(&config.jwt_access_secret),
            refresh: KeyPair::from_secret(&config.jwt_refresh_secret),
        }
    }

    fn key_pair(&self, class: KeyClass) -> &KeyPair {
        match class {
            KeyClass::Access => &self.access,
            KeyClass::Refresh => &self.refresh,
        }
    }

    fn ttl(class: KeyClass) -> u64 {
        match class {
            KeyClass::Access => ACCESS_TOKEN_TTL_SECS,
            KeyClass::Refresh => REFRESH_TOKEN_TTL_SECS,
        }
    }

    /// Issue a signed token for an account.
    pub fn issue(&self, account_id: &str, class: KeyClass) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Malformed)?
            .as_secs() as usize;

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + Self::ttl(class) as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.key_pair(class).encoding,
        )
        .map_err(TokenError::from)
    }

    /// Verify a token against the key of the given class and return the
    /// embedded account ID.
    ///
    /// Access verification tolerates a small clock skew; refresh
    /// verification is strict, mirroring the issuing side.
    pub fn verify(&self, token: &str, class: KeyClass) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = match class {
            KeyClass::Access => ACCESS_LEEWAY_SECS,
            KeyClass::Refresh => 0,
        };

        let data = decode::<Claims>(token, &self.key_pair(class).decoding, &validation)?;
        Ok(data.claims.sub)
    }
}
