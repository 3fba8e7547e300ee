use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::submit_entry))
        .route(
            "/api/entries",
            get(handlers::list_entries)
                .post(handlers::create_entry)
                .delete(handlers::clear_entries),
        )
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/status", get(handlers::get_status))
        .with_state(state)
}
