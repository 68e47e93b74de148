//! Rutas HTTP
//!
//! Este módulo arma el router completo de la aplicación.

pub mod company_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Crear el router principal con middleware y estado
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .nest("/api/company", company_routes::create_company_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "company-registry",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
