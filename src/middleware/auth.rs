// SPDX-License-Identifier: MIT

//! JWT authentication middleware.

use crate::error::AppError;
use crate::models::Account;
use crate::services::KeyClass;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated identity attached to the request after verification.
///
/// Carries everything the guards and handlers need to authorize a call;
/// never the password hash.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_business_user: bool,
    pub business_owner: Option<String>,
}

impl From<&Account> for CurrentUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            is_business_user: account.is_business_user,
            business_owner: account.business_owner.clone(),
        }
    }
}

/// Middleware that requires a valid bearer access token.
///
/// Verifies the token, resolves the account (one store lookup, no
/// caching) and attaches a [`CurrentUser`] to the request extensions.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        _ => return Err(AppError::unauthorized("Non autorisé, pas de token")),
    };

    let account_id = state
        .tokens
        .verify(token, KeyClass::Access)
        .map_err(|e| AppError::token_rejected(e.to_string()))?;

    let account = state
        .db
        .get_user(&account_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Utilisateur non trouvé"))?;

    request.extensions_mut().insert(CurrentUser::from(&account));

    Ok(next.run(request).await)
}
