//! Authentication Middleware
//! Mission: Protect API endpoints with JWT validation and role checks

use crate::auth::models::{Claims, ADMIN_ROLE};
use crate::auth::{jwt::JwtHandler, user_store::UserStore};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Auth middleware that validates the Bearer token.
/// A missing or malformed Authorization header short-circuits with 401
/// before any verification is attempted.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt_handler
        .validate_token(&token)
        .map_err(|_| AuthError::InvalidToken)?;

    // Add claims to request extensions so handlers can access them
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Admin middleware that loads the authenticated user and requires the
/// ADMIN role tag. Runs after `auth_middleware`. A token whose user no
/// longer exists in the store is treated as forbidden.
pub async fn require_admin(
    State(user_store): State<Arc<UserStore>>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user_id = req
        .extensions()
        .get::<Claims>()
        .map(|c| c.id)
        .ok_or(AuthError::MissingToken)?;

    let user = user_store
        .get_user_by_id(user_id)
        .map_err(AuthError::RoleCheckFailed)?
        .ok_or(AuthError::AdminRequired)?;

    if !user.has_role(ADMIN_ROLE) {
        return Err(AuthError::AdminRequired);
    }

    Ok(next.run(req).await)
}

/// Auth error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    AdminRequired,
    RoleCheckFailed(anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing authorization token".to_string(),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            AuthError::AdminRequired => {
                (StatusCode::FORBIDDEN, "ADMIN role required".to_string())
            }
            AuthError::RoleCheckFailed(err) => {
                error!("Role check failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error checking user roles - {}", err),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
