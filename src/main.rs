//! Catalogo - Authenticated Product Catalog API
//! Mission: CRUD over the product catalog behind JWT auth and an ADMIN gate

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalogo_backend::{
    api,
    auth::{JwtHandler, UserStore},
    catalog::ProductStore,
    models::Config,
};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalogo_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    info!("🚀 Catalogo API starting");

    let user_store = Arc::new(UserStore::new(&config.database_path)?);
    let product_store = Arc::new(ProductStore::new(&config.database_path)?);
    let jwt_handler = Arc::new(JwtHandler::new(config.jwt_secret.clone()));

    info!("🔐 Stores initialized at: {}", config.database_path);

    let app = api::create_router(product_store, user_store, jwt_handler);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
