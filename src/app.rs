use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/tap", post(handlers::tap))
        .route("/api/untap", post(handlers::untap))
        .route("/api/reset", post(handlers::reset_today))
        .route("/api/reset-total", post(handlers::reset_all_time))
        .route("/api/goal", post(handlers::set_goal))
        .route(
            "/api/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .route("/api/history/:date", delete(handlers::delete_history_entry))
        .route("/api/auto/start", post(handlers::auto_start))
        .route("/api/auto/stop", post(handlers::auto_stop))
        .route("/api/theme", post(handlers::set_theme))
        .with_state(state)
}
