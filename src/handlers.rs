use crate::errors::AppError;
use crate::models::{Mood, MoodEntry, MoodSummary, NewEntryRequest, StatusResponse};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use tokio::time::sleep;
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(store.entries(), &store.summary()))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<MoodEntry>> {
    let store = state.store.lock().await;
    Json(store.entries().to_vec())
}

pub async fn get_summary(State(state): State<AppState>) -> Json<MoodSummary> {
    let store = state.store.lock().await;
    Json(store.summary())
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        busy: state.is_busy(),
    })
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<NewEntryRequest>,
) -> Result<(StatusCode, Json<MoodEntry>), AppError> {
    match submit(&state, &payload.mood, &payload.note).await {
        Submission::Added(entry) => Ok((StatusCode::CREATED, Json(entry))),
        Submission::Busy => Err(AppError::conflict("a submission is already in progress")),
        Submission::Rejected => Err(AppError::bad_request(
            "mood must be one of 'excellent', 'good', 'neutral', 'poor'",
        )),
    }
}

/// Form fallback for the page. Invalid input is ignored rather than reported.
pub async fn submit_entry(
    State(state): State<AppState>,
    Form(payload): Form<NewEntryRequest>,
) -> Redirect {
    let outcome = submit(&state, &payload.mood, &payload.note).await;
    if !matches!(outcome, Submission::Added(_)) {
        debug!("form submission ignored");
    }
    Redirect::to("/")
}

pub async fn clear_entries(State(state): State<AppState>) -> StatusCode {
    state.store.lock().await.clear().await;
    StatusCode::NO_CONTENT
}

enum Submission {
    Added(MoodEntry),
    Busy,
    Rejected,
}

async fn submit(state: &AppState, mood: &str, note: &str) -> Submission {
    if mood.parse::<Mood>().is_err() {
        return Submission::Rejected;
    }

    let Some(_guard) = state.begin_submission() else {
        return Submission::Busy;
    };

    if !state.submit_delay.is_zero() {
        sleep(state.submit_delay).await;
    }

    let mut store = state.store.lock().await;
    match store.add_entry(mood, note).await {
        Some(entry) => Submission::Added(entry),
        None => Submission::Rejected,
    }
}
