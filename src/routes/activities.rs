// SPDX-License-Identifier: MIT

//! Activity routes, scoped to the authenticated account.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::middleware::guards;
use crate::models::Activity;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/{id}", delete(delete_activity))
}

async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.db.list_activities_for_user(&user.id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub challenge_id: Option<String>,
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateActivityPayload>,
) -> Result<(StatusCode, Json<Activity>)> {
    let (name, activity_type, date, duration) = match (
        payload.name,
        payload.activity_type,
        payload.date,
        payload.duration,
    ) {
        (Some(name), Some(activity_type), Some(date), Some(duration)) => {
            (name, activity_type, date, duration)
        }
        _ => {
            return Err(AppError::Validation(
                "Champs obligatoires manquants".to_string(),
            ))
        }
    };

    if duration <= 0.0 {
        return Err(AppError::Validation(
            "La durée doit être positive".to_string(),
        ));
    }

    let activity = Activity {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        name,
        activity_type,
        date,
        time: payload.time,
        duration,
        challenge_id: payload.challenge_id,
        created_at: now_rfc3339(),
    };

    state.db.upsert_activity(&activity).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let activity = state
        .db
        .get_activity(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    if !guards::owns(&activity.user_id, &user) {
        return Err(AppError::unauthorized("Not authorized"));
    }

    state.db.delete_activity(&id).await?;

    Ok(Json(MessageResponse {
        message: "Activity removed".to_string(),
    }))
}
