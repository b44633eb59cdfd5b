// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    export_orders, filtered_analytics, generate_report, health_check, list_restaurants, rankings,
    restaurant_trends,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/:id/trends", get(restaurant_trends))
        .route("/rankings", get(rankings))
        .route("/analytics", get(filtered_analytics))
        .route("/analytics/export", get(export_orders))
        .route("/reports", post(generate_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
