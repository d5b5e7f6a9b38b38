// SPDX-License-Identifier: MIT

//! Authentication routes: register/login, session info, token refresh.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{Account, AccountStats, PublicAccount};
use crate::services::{password, KeyClass};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        // Alias kept for older clients; same handler, so the two can
        // never drift apart.
        .route("/api/auth/signup", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/reset-password", post(reset_password))
}

/// Routes that require a verified access token.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/me", get(me))
}

// ─── Register / Signup ───────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 1, message = "Prénom requis"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Nom requis"))]
    pub last_name: String,
    #[validate(email(message = "Email valide requis"))]
    pub email: String,
    #[validate(length(min = 6, message = "Mot de passe de 6 caractères minimum requis"))]
    pub password: String,
    #[serde(default)]
    pub is_business_user: bool,
    #[serde(default)]
    pub consent: bool,
    #[serde(default)]
    pub policy_version: Option<String>,
}

/// Tokens plus the public account view, returned by register and login.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: PublicAccount,
}

/// Create an account and issue both tokens.
///
/// Single code path shared by `/register` and `/signup`.
async fn create_account(
    state: &AppState,
    payload: RegisterPayload,
) -> Result<AuthResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Refuse payloads carrying a client-side hash instead of a password.
    if password::looks_prehashed(&payload.password) {
        return Err(AppError::Validation(
            "Ne pas envoyer de mot de passe pré-haché depuis le client".to_string(),
        ));
    }

    if !payload.consent {
        return Err(AppError::Validation(
            "Le consentement au traitement des données est requis.".to_string(),
        ));
    }

    let email = payload.email.trim().to_lowercase();

    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Utilisateur déjà existant".to_string()));
    }

    let account = Account {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        email,
        password_hash: password::hash(&payload.password)?,
        consent: true,
        consent_at: Some(now_rfc3339()),
        policy_version: Some(
            payload.policy_version.unwrap_or_else(|| "v1.0".to_string()),
        ),
        is_business_user: payload.is_business_user,
        business_owner: None,
        goals: vec![],
        badges: vec![],
        stats: AccountStats::default(),
        profile_picture: None,
        created_at: now_rfc3339(),
    };

    state.db.upsert_user(&account).await?;

    tracing::info!(account_id = %account.id, "Account created");

    Ok(AuthResponse {
        token: state.tokens.issue(&account.id, KeyClass::Access)?,
        refresh_token: state.tokens.issue(&account.id, KeyClass::Refresh)?,
        user: PublicAccount::from(&account),
    })
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let response = create_account(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>> {
    let email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password produce the same response, so the
    // endpoint cannot be used to probe which emails have accounts.
    let account = state
        .db
        .find_user_by_email(&email)
        .await?
        .filter(|account| password::verify(&payload.password, &account.password_hash))
        .ok_or_else(|| {
            AppError::Validation("Email ou mot de passe incorrect".to_string())
        })?;

    tracing::info!(account_id = %account.id, "Login successful");

    Ok(Json(AuthResponse {
        token: state.tokens.issue(&account.id, KeyClass::Access)?,
        refresh_token: state.tokens.issue(&account.id, KeyClass::Refresh)?,
        user: PublicAccount::from(&account),
    }))
}

// ─── Current Session ─────────────────────────────────────────

/// Get the authenticated account's public view.
async fn me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<PublicAccount>> {
    let account = state
        .db
        .get_user(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Utilisateur non trouvé".to_string()))?;

    Ok(Json(PublicAccount::from(&account)))
}

// ─── Token Refresh ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Exchange a valid refresh token for exactly one new access token.
///
/// The refresh token itself is neither rotated nor invalidated: validity
/// is signature plus expiry, with no server-side state.
async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<RefreshResponse>> {
    let token = payload
        .refresh_token
        .ok_or_else(|| AppError::unauthorized("Refresh token requis"))?;

    let account_id = state
        .tokens
        .verify(&token, KeyClass::Refresh)
        .map_err(|e| AppError::unauthorized(e.to_string()))?;

    let account = state
        .db
        .get_user(&account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Utilisateur non trouvé".to_string()))?;

    Ok(Json(RefreshResponse {
        token: state.tokens.issue(&account.id, KeyClass::Access)?,
    }))
}

// ─── Dev Password Reset ──────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
    #[serde(default)]
    pub dev_secret: Option<String>,
}

#[derive(Serialize)]
pub struct ResetPasswordResponse {
    pub ok: bool,
}

/// Reset a password without authentication. Development mode only.
async fn reset_password(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<ResetPasswordResponse>> {
    if !state.config.is_development() {
        return Err(AppError::Forbidden(
            "Reset password endpoint is disabled except in development".to_string(),
        ));
    }

    if let Some(expected) = &state.config.dev_reset_secret {
        let provided = headers
            .get("x-dev-secret")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or(payload.dev_secret);

        if provided.as_deref() != Some(expected.as_str()) {
            return Err(AppError::unauthorized("Invalid dev secret"));
        }
    }

    let (email, new_password) = match (payload.email, payload.new_password) {
        (Some(email), Some(new_password)) => (email, new_password),
        _ => {
            return Err(AppError::Validation(
                "email & newPassword required".to_string(),
            ))
        }
    };

    let mut account = state
        .db
        .find_user_by_email(&email.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    account.password_hash = password::hash(&new_password)?;
    state.db.upsert_user(&account).await?;

    tracing::info!(account_id = %account.id, "Password reset (dev endpoint)");

    Ok(Json(ResetPasswordResponse { ok: true }))
}
