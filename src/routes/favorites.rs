// SPDX-License-Identifier: MIT

//! Favorite routes, scoped to the authenticated account.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{Favorite, FavoriteKind};
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
        .route("/api/favorites", get(list_favorites).post(create_favorite))
        .route("/api/favorites/{item_id}", delete(delete_favorite))
}

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Favorite>>> {
    Ok(Json(state.db.list_favorites_for_user(&user.id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoritePayload {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<FavoriteKind>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

async fn create_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateFavoritePayload>,
) -> Result<(StatusCode, Json<Favorite>)> {
    let (item_id, kind, name) = match (payload.item_id, payload.kind, payload.name) {
        (Some(item_id), Some(kind), Some(name)) => (item_id, kind, name),
        _ => {
            return Err(AppError::Validation(
                "Champs obligatoires manquants : item_id, type, name".to_string(),
            ))
        }
    };

    let kind_str = match kind {
        FavoriteKind::Spot => "spot",
        FavoriteKind::Event => "event",
    };

    if state
        .db
        .find_favorite(&user.id, &item_id, kind_str)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Favori déjà existant".to_string()));
    }

    let favorite = Favorite {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        item_id,
        kind,
        name,
        address: payload.address,
        lat: payload.lat,
        lng: payload.lng,
        price: payload.price,
        created_at: now_rfc3339(),
    };

    state.db.upsert_favorite(&favorite).await?;

    Ok((StatusCode::CREATED, Json(favorite)))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Remove a favorite by the favorited item's ID (not the document ID).
async fn delete_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(item_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let favorite = state
        .db
        .find_favorite_by_item(&user.id, &item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Favori non trouvé".to_string()))?;

    state.db.delete_favorite(&favorite.id).await?;

    Ok(Json(MessageResponse {
        message: "Favori supprimé".to_string(),
    }))
}
