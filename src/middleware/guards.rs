// SPDX-License-Identifier: MIT

//! Role and ownership guards, layered after authentication.
//!
//! The role guard is a composable middleware for whole route groups
//! (employees, business stats); the ownership checks are pure predicates
//! evaluated by handlers once the target resource is loaded.

use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use axum::{extract::Request, middleware::Next, response::Response};

/// Middleware restricting a route group to business accounts.
pub async fn require_business(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::unauthorized("Non autorisé, pas de token"))?;

    if !user.is_business_user {
        return Err(AppError::Forbidden("Accès réservé aux entreprises".to_string()));
    }

    Ok(next.run(request).await)
}

/// Per-handler role check used by the challenge routes.
pub fn ensure_business(user: &CurrentUser) -> Result<(), AppError> {
    if !user.is_business_user {
        return Err(AppError::Forbidden("Accès non autorisé".to_string()));
    }
    Ok(())
}

/// Does the caller own the resource?
pub fn owns(owner_id: &str, user: &CurrentUser) -> bool {
    owner_id == user.id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, business: bool) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            email: format!("{id}@x.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            is_business_user: business,
            business_owner: None,
        }
    }

    #[test]
    fn test_ownership_predicate() {
        let alice = user("u-alice", false);
        assert!(owns("u-alice", &alice));
        assert!(!owns("u-bob", &alice));
    }

    #[test]
    fn test_business_check() {
        assert!(ensure_business(&user("u-1", true)).is_ok());

        let err = ensure_business(&user("u-2", false)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
