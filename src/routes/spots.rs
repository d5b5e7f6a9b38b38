// SPDX-License-Identifier: MIT

//! Sport spot routes.
//!
//! Listing is public; creation requires authentication, so the auth
//! middleware is attached to the POST method only.

use crate::error::{AppError, Result};
use crate::middleware::auth::{require_auth, CurrentUser};
use crate::models::Spot;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/spots",
        get(list_spots).merge(
            post(create_spot).layer(middleware::from_fn_with_state(state, require_auth)),
        ),
    )
}

async fn list_spots(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Spot>>> {
    Ok(Json(state.db.list_spots().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpotPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub sport_type: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photos: Vec<String>,
}

async fn create_spot(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateSpotPayload>,
) -> Result<(StatusCode, Json<Spot>)> {
    let (name, address, lat, lng) = match (
        payload.name,
        payload.address,
        payload.lat,
        payload.lng,
    ) {
        (Some(name), Some(address), Some(lat), Some(lng)) => (name, address, lat, lng),
        _ => {
            return Err(AppError::Validation(
                "Champs obligatoires manquants".to_string(),
            ))
        }
    };

    let spot = Spot {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        description: payload.description,
        address,
        lat,
        lng,
        sport_type: payload.sport_type,
        rating: payload.rating.unwrap_or(0.0),
        photos: payload.photos,
        created_by: user.id,
        created_at: now_rfc3339(),
    };

    state.db.upsert_spot(&spot).await?;

    Ok((StatusCode::CREATED, Json(spot)))
}
