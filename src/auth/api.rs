//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    user_store::UserStore,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Registration endpoint - POST /seguranca/register
///
/// Hashes the password and inserts the user with an empty role list.
/// Duplicate logins surface as a store error; only the UNIQUE constraint
/// enforces uniqueness.
pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AuthApiError> {
    let id = state
        .user_store
        .create_user(
            &payload.name,
            &payload.login,
            &payload.password,
            "",
            &payload.email,
        )
        .map_err(AuthApiError::RegisterFailed)?;

    info!("✅ Registered user: {} (id {})", payload.login, id);

    Ok(Json(RegisterResponse { id }))
}

/// Login endpoint - POST /seguranca/login
///
/// Unknown login and wrong password both answer 401 with the same
/// generic message so callers cannot probe for valid handles.
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", payload.login);

    let valid = state
        .user_store
        .verify_password(&payload.login, &payload.password)
        .map_err(AuthApiError::LoginFailed)?;

    if !valid {
        warn!("❌ Failed login attempt: {}", payload.login);
        return Err(AuthApiError::InvalidCredentials);
    }

    let user = state
        .user_store
        .get_user_by_login(&payload.login)
        .map_err(AuthApiError::LoginFailed)?
        .ok_or(AuthApiError::InvalidCredentials)?;

    let token = state
        .jwt_handler
        .generate_token(user.id)
        .map_err(AuthApiError::LoginFailed)?;

    info!("✅ Login successful: {} (id {})", user.login, user.id);

    Ok(Json(LoginResponse {
        id: user.id,
        login: user.login,
        name: user.name,
        roles: user.roles,
        token,
    }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    RegisterFailed(anyhow::Error),
    LoginFailed(anyhow::Error),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Incorrect login or password".to_string(),
            ),
            AuthApiError::RegisterFailed(err) => {
                error!("Registration failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error registering user - {}", err),
                )
            }
            AuthApiError::LoginFailed(err) => {
                error!("Login failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error verifying login - {}", err),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
