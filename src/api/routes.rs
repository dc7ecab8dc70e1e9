//! Catalog API Routes
//! Mission: Expose product CRUD behind the authentication gates

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::auth::{api as auth_api, auth_middleware, require_admin, AuthState, JwtHandler, UserStore};
use crate::catalog::ProductStore;
use crate::models::{Product, ProductBody};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductStore>,
}

/// Create the API router.
///
/// Guard composition is explicit: catalog routes sit behind the token
/// gate, and mutations additionally behind the admin gate. Layers run
/// outermost-last, so the token check always precedes the role check.
pub fn create_router(
    products: Arc<ProductStore>,
    user_store: Arc<UserStore>,
    jwt_handler: Arc<JwtHandler>,
) -> Router {
    let state = AppState { products };
    let auth_state = AuthState::new(user_store.clone(), jwt_handler.clone());

    let auth_router = Router::new()
        .route("/seguranca/register", post(auth_api::register))
        .route("/seguranca/login", post(auth_api::login))
        .with_state(auth_state);

    let read_routes = Router::new()
        .route("/produtos", get(list_products))
        .route("/produtos/:id", get(get_product))
        .route_layer(middleware::from_fn_with_state(
            jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/produtos", post(create_product))
        .route("/produtos/:id", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn_with_state(user_store, require_admin))
        .route_layer(middleware::from_fn_with_state(jwt_handler, auth_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .merge(auth_router)
        .merge(read_routes)
        .merge(admin_routes)
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List all products - GET /produtos
async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .products
        .list()
        .map_err(|e| ApiError::Store("Error fetching product list", e))?;

    Ok(Json(products))
}

/// Get a product by id - GET /produtos/:id
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    state
        .products
        .get(id)
        .map_err(|e| ApiError::Store("Error fetching product", e))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Create a product - POST /produtos
async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let new = body.validate().map_err(ApiError::BadRequest)?;

    let id = state.products.insert(&new).map_err(|e| {
        tracing::error!("Product insert failed: {}", e);
        ApiError::InsertFailed
    })?;

    Ok((
        StatusCode::CREATED,
        Json(Product {
            id,
            description: new.description,
            brand: new.brand,
            price: new.price,
        }),
    ))
}

/// Update a product - PUT /produtos/:id
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ProductBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let new = body.validate().map_err(ApiError::BadRequest)?;

    let updated = state
        .products
        .update(id, &new)
        .map_err(|e| ApiError::Store("Error updating product", e))?;

    if !updated {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({ "message": "Product updated successfully" })))
}

/// Delete a product - DELETE /produtos/:id
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state
        .products
        .delete(id)
        .map_err(|e| ApiError::Store("Error deleting product", e))?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

// ===== Response Types =====

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

// ===== Error Handling =====

#[derive(Debug)]
enum ApiError {
    NotFound,
    BadRequest(String),
    InsertFailed,
    Store(&'static str, anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Product not found".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InsertFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error inserting product".to_string(),
            ),
            ApiError::Store(context, err) => {
                tracing::error!("{}: {}", context, err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{}: {}", context, err),
                )
            }
        };

        let body = Json(json!({ "message": message }));

        (status, body).into_response()
    }
}
