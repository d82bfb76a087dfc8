//! API Routes
//!
//! Configures the Axum router with all banner service endpoints.

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_banner_handler, delete_banner_handler, health_handler, list_banners_handler,
    stats_handler, update_banner_handler, user_banner_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /user_banner` - Banner content for a feature and tag
/// - `GET /banner` - List banners (admin)
/// - `POST /banner` - Create a banner (admin)
/// - `PATCH /banner/:id` - Update a banner (admin)
/// - `DELETE /banner/:id` - Delete a banner (admin)
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/user_banner", get(user_banner_handler))
        .route(
            "/banner",
            get(list_banners_handler).post(create_banner_handler),
        )
        .route(
            "/banner/:id",
            patch(update_banner_handler).delete(delete_banner_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
