// SPDX-License-Identifier: MIT

//! Employee management routes, business accounts only.
//!
//! Employees are ordinary accounts whose `business_owner` points at the
//! managing business. The role guard is layered on the whole group in the
//! router.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{Account, AccountStats, PublicAccount};
use crate::services::password;
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
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/{id}",
            put(update_employee).delete(delete_employee),
        )
}

async fn list_employees(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<PublicAccount>>> {
    let employees = state.db.list_employees(&user.id).await?;

    Ok(Json(employees.iter().map(PublicAccount::from).collect()))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, message = "Prénom requis"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Nom requis"))]
    pub last_name: String,
    #[validate(email(message = "Email valide requis"))]
    pub email: String,
    #[validate(length(min = 6, message = "Mot de passe de 6 caractères minimum requis"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct CreateEmployeeResponse {
    pub message: String,
    pub employee: PublicAccount,
}

async fn create_employee(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<(StatusCode, Json<CreateEmployeeResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if password::looks_prehashed(&payload.password) {
        return Err(AppError::Validation(
            "Ne pas envoyer de mot de passe pré-haché depuis le client".to_string(),
        ));
    }

    let email = payload.email.trim().to_lowercase();

    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Utilisateur déjà existant".to_string()));
    }

    let employee = Account {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        email,
        password_hash: password::hash(&payload.password)?,
        // Employee accounts are created by the business on the
        // employee's behalf; consent is collected at onboarding.
        consent: true,
        consent_at: Some(now_rfc3339()),
        policy_version: Some("v1.0".to_string()),
        is_business_user: false,
        business_owner: Some(user.id.clone()),
        goals: vec![],
        badges: vec![],
        stats: AccountStats::default(),
        profile_picture: None,
        created_at: now_rfc3339(),
    };

    state.db.upsert_user(&employee).await?;

    tracing::info!(employee_id = %employee.id, business_id = %user.id, "Employee added");

    Ok((
        StatusCode::CREATED,
        Json(CreateEmployeeResponse {
            message: "Employé ajouté".to_string(),
            employee: PublicAccount::from(&employee),
        }),
    ))
}

/// Load an employee account and check it belongs to the caller's business.
async fn load_owned_employee(
    state: &AppState,
    user: &CurrentUser,
    id: &str,
) -> Result<Account> {
    let employee = state
        .db
        .get_user(id)
        .await?
        .filter(|a| a.business_owner.is_some())
        .ok_or_else(|| AppError::NotFound("Employé non trouvé".to_string()))?;

    if employee.business_owner.as_deref() != Some(user.id.as_str()) {
        return Err(AppError::Forbidden("Non autorisé".to_string()));
    }

    Ok(employee)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

async fn update_employee(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<Json<PublicAccount>> {
    let mut employee = load_owned_employee(&state, &user, &id).await?;

    if let Some(first_name) = payload.first_name {
        employee.first_name = first_name;
    }
    if let Some(last_name) = payload.last_name {
        employee.last_name = last_name;
    }
    if let Some(email) = payload.email {
        let email = email.trim().to_lowercase();
        if email != employee.email {
            if state.db.find_user_by_email(&email).await?.is_some() {
                return Err(AppError::Conflict(
                    "Utilisateur déjà existant".to_string(),
                ));
            }
            employee.email = email;
        }
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
        employee.password_hash = password::hash(&new_password)?;
    }

    state.db.upsert_user(&employee).await?;

    Ok(Json(PublicAccount::from(&employee)))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let employee = load_owned_employee(&state, &user, &id).await?;

    state.db.delete_user(&employee.id).await?;

    tracing::info!(employee_id = %employee.id, business_id = %user.id, "Employee removed");

    Ok(Json(MessageResponse {
        message: "Employé supprimé".to_string(),
    }))
}
