// SPDX-License-Identifier: MIT

//! Business statistics routes.
//!
//! Aggregates are computed on read from the employees' activity documents.
//! The role guard is layered on the group in the router.

use crate::error::Result;
use crate::middleware::auth::CurrentUser;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stats/global", get(global_stats))
        .route("/api/stats/top-employees", get(top_employees))
        .route("/api/stats/challenges", get(challenge_stats))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_employees: usize,
    pub total_activities: usize,
    pub total_hours: f64,
}

async fn global_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<GlobalStats>> {
    let employees = state.db.list_employees(&user.id).await?;
    let employee_ids: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();

    let activities = state.db.list_activities_for_users(&employee_ids).await?;
    let total_hours: f64 = activities.iter().map(|a| a.duration).sum();

    Ok(Json(GlobalStats {
        total_employees: employees.len(),
        total_activities: activities.len(),
        total_hours,
    }))
}

const TOP_EMPLOYEES_LIMIT: usize = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEmployee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub total_activities: usize,
}

async fn top_employees(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<TopEmployee>>> {
    let employees = state.db.list_employees(&user.id).await?;
    let employee_ids: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();

    let activities = state.db.list_activities_for_users(&employee_ids).await?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for activity in &activities {
        *counts.entry(activity.user_id.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<TopEmployee> = employees
        .iter()
        .map(|e| TopEmployee {
            id: e.id.clone(),
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            total_activities: counts.get(e.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    ranked.sort_by(|a, b| b.total_activities.cmp(&a.total_activities));
    ranked.truncate(TOP_EMPLOYEES_LIMIT);

    Ok(Json(ranked))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeStats {
    pub id: String,
    pub name: String,
    pub goal: f64,
    pub unit: crate::models::ChallengeUnit,
    pub completed_activities: usize,
}

async fn challenge_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<ChallengeStats>>> {
    let challenges = state.db.list_challenges_for_business(&user.id).await?;

    let mut stats = Vec::with_capacity(challenges.len());
    for challenge in challenges {
        let completed = state
            .db
            .count_activities_for_challenge(&challenge.id)
            .await?;

        stats.push(ChallengeStats {
            id: challenge.id,
            name: challenge.name,
            goal: challenge.goal,
            unit: challenge.unit,
            completed_activities: completed,
        });
    }

    Ok(Json(stats))
}
