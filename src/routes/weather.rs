// SPDX-License-Identifier: MIT

//! Weather lookup proxy route.

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/weather", get(get_weather))
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Fetch current weather from the selected provider.
///
/// Coordinates pass through to the provider as-is; validating them is the
/// provider's job.
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response> {
    let (lat, lon) = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(AppError::Validation(
                "lat et lon sont requis".to_string(),
            ))
        }
    };

    match query.provider.as_deref() {
        None | Some("wttr") => {
            let report = state.weather.wttr_current(&lat, &lon).await?;
            Ok(Json(report).into_response())
        }
        Some("openweather") => {
            let report = state.weather.openweather_current(&lat, &lon).await?;
            Ok(Json(report).into_response())
        }
        Some(other) => Err(AppError::Validation(format!(
            "Unknown weather provider: {other}"
        ))),
    }
}
