use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, candidates::candidates_handler, joborders::joborders_handler,
        placements::placements_handler, prospects::prospects_handler,
        reminders::reminders_handler, sync::sync_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest(
            "/candidates",
            candidates_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/job-orders",
            joborders_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/placements",
            placements_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/prospects",
            prospects_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/reminders",
            reminders_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/sync", sync_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
