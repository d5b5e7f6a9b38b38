// SPDX-License-Identifier: MIT

//! Business challenge routes.
//!
//! The role check runs per handler here rather than as a layer; the
//! challenge endpoints answer 403 "Accès non autorisé" to non-business
//! callers, unlike the employees/stats groups.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::middleware::guards;
use crate::models::{Challenge, ChallengeUnit};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/challenges", get(list_challenges).post(create_challenge))
        .route(
            "/api/challenges/{id}",
            put(update_challenge).delete(delete_challenge),
        )
}

async fn list_challenges(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Challenge>>> {
    guards::ensure_business(&user)?;

    Ok(Json(state.db.list_challenges_for_business(&user.id).await?))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengePayload {
    #[validate(length(min = 1, message = "Nom requis"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.000001, message = "Objectif positif requis"))]
    pub goal: f64,
    pub unit: ChallengeUnit,
    #[validate(length(min = 1, message = "Date de début requise"))]
    pub start_date: String,
    #[validate(length(min = 1, message = "Date de fin requise"))]
    pub end_date: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

async fn create_challenge(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateChallengePayload>,
) -> Result<(StatusCode, Json<Challenge>)> {
    guards::ensure_business(&user)?;

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let challenge = Challenge {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: user.id.clone(),
        name: payload.name,
        description: payload.description,
        goal: payload.goal,
        unit: payload.unit,
        start_date: payload.start_date,
        end_date: payload.end_date,
        participants: payload.participants,
        progress: 0.0,
        created_at: now_rfc3339(),
    };

    state.db.upsert_challenge(&challenge).await?;

    Ok((StatusCode::CREATED, Json(challenge)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChallengePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub goal: Option<f64>,
    #[serde(default)]
    pub unit: Option<ChallengeUnit>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub participants: Option<Vec<String>>,
    #[serde(default)]
    pub progress: Option<f64>,
}

/// Load a challenge and check the caller owns it.
async fn load_owned_challenge(
    state: &AppState,
    user: &CurrentUser,
    id: &str,
) -> Result<Challenge> {
    let challenge = state
        .db
        .get_challenge(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge non trouvé".to_string()))?;

    if !guards::owns(&challenge.business_id, user) {
        return Err(AppError::Forbidden("Non autorisé".to_string()));
    }

    Ok(challenge)
}

async fn update_challenge(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateChallengePayload>,
) -> Result<Json<Challenge>> {
    guards::ensure_business(&user)?;

    let mut challenge = load_owned_challenge(&state, &user, &id).await?;

    if let Some(name) = payload.name {
        challenge.name = name;
    }
    if let Some(description) = payload.description {
        challenge.description = description;
    }
    if let Some(goal) = payload.goal {
        if goal <= 0.0 {
            return Err(AppError::Validation("Objectif positif requis".to_string()));
        }
        challenge.goal = goal;
    }
    if let Some(unit) = payload.unit {
        challenge.unit = unit;
    }
    if let Some(start_date) = payload.start_date {
        challenge.start_date = start_date;
    }
    if let Some(end_date) = payload.end_date {
        challenge.end_date = end_date;
    }
    if let Some(participants) = payload.participants {
        challenge.participants = participants;
    }
    if let Some(progress) = payload.progress {
        challenge.progress = progress;
    }

    state.db.upsert_challenge(&challenge).await?;

    Ok(Json(challenge))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

async fn delete_challenge(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    guards::ensure_business(&user)?;

    let challenge = load_owned_challenge(&state, &user, &id).await?;

    state.db.delete_challenge(&challenge.id).await?;

    Ok(Json(MessageResponse {
        message: "Challenge supprimé".to_string(),
    }))
}
