use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/report", get(handlers::report_page))
        .route("/api/reports/submit", post(handlers::submit_report))
        .route("/api/reports/:id", get(handlers::get_counts))
        .route("/api/reports/:id/trend", get(handlers::get_trend))
        .with_state(state)
}
