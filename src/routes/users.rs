// SPDX-License-Identifier: MIT

//! User profile routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{AccountStats, PublicAccount};
use crate::services::password;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/profile", get(get_profile).put(update_profile))
        .route("/api/users/stats", get(get_stats))
        .route("/api/users/{id}", delete(delete_account))
}

async fn get_profile(
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

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub goals: Option<Vec<String>>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Partial profile update; only the fields present in the payload change.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<PublicAccount>> {
    let mut account = state
        .db
        .get_user(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Utilisateur non trouvé".to_string()))?;

    if let Some(first_name) = payload.first_name {
        account.first_name = first_name;
    }
    if let Some(last_name) = payload.last_name {
        account.last_name = last_name;
    }
    if let Some(goals) = payload.goals {
        account.goals = goals;
    }
    if let Some(picture) = payload.profile_picture {
        account.profile_picture = Some(picture);
    }
    if let Some(new_password) = payload.password {
        if new_password.len() < 6 {
            return Err(AppError::Validation(
                "Mot de passe de 6 caractères minimum requis".to_string(),
            ));
        }
        if password::looks_prehashed(&new_password) {
            return Err(AppError::Validation(
                "Ne pas envoyer de mot de passe pré-haché depuis le client".to_string(),
            ));
        }
        account.password_hash = password::hash(&new_password)?;
    }

    state.db.upsert_user(&account).await?;

    Ok(Json(PublicAccount::from(&account)))
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<AccountStats>> {
    let account = state
        .db
        .get_user(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Statistiques non trouvées".to_string()))?;

    Ok(Json(account.stats))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Delete an account. Callers may only delete themselves.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if id != user.id {
        return Err(AppError::unauthorized("Non autorisé"));
    }

    state.db.delete_user(&id).await?;

    tracing::info!(account_id = %id, "Account deleted");

    Ok(Json(MessageResponse {
        message: "Compte utilisateur supprimé".to_string(),
    }))
}
