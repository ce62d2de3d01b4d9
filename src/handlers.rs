use crate::errors::AppError;
use crate::models::{
    AutoStartRequest, GoalRequest, HistoryResponse, ThemeRequest, TodayResponse,
};
use crate::session::Session;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = snapshot(&state).await;
    Html(render_index(&today))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    Ok(Json(snapshot(&state).await))
}

pub async fn tap(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    state.session.lock().await.increment().await;
    Ok(Json(snapshot(&state).await))
}

pub async fn untap(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    state.session.lock().await.decrement().await;
    Ok(Json(snapshot(&state).await))
}

/// Confirmation happens client-side; by the time this is called the user has
/// already agreed to lose today's count (it is committed to history first).
pub async fn reset_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    state.session.lock().await.reset_today().await;
    Ok(Json(snapshot(&state).await))
}

pub async fn reset_all_time(
    State(state): State<AppState>,
) -> Result<Json<TodayResponse>, AppError> {
    state.session.lock().await.reset_all_time().await;
    Ok(Json(snapshot(&state).await))
}

pub async fn set_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    state.session.lock().await.set_goal(payload.goal).await?;
    Ok(Json(snapshot(&state).await))
}

/// Viewing history commits current progress first, so the list always shows
/// today as it stands.
pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.commit_today().await;
    Ok(Json(history_of(&session)))
}

pub async fn delete_history_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.delete_history(&date).await;
    Ok(Json(history_of(&session)))
}

pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.clear_history().await;
    Ok(Json(history_of(&session)))
}

pub async fn auto_start(
    State(state): State<AppState>,
    Json(payload): Json<AutoStartRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    {
        let mut auto = state.auto.lock().await;
        if auto.active() {
            return Err(AppError::conflict("auto tally is already running"));
        }
        auto.start(payload.interval_ms, state.session.clone());
    }
    Ok(Json(snapshot(&state).await))
}

pub async fn auto_stop(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    state.auto.lock().await.stop();
    Ok(Json(snapshot(&state).await))
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let color = payload.color.trim();
    if color.is_empty() {
        return Err(AppError::bad_request("color must not be empty"));
    }

    state.session.lock().await.set_theme(color.to_string()).await;
    Ok(Json(snapshot(&state).await))
}

// Lock order is auto before session everywhere both are held.
async fn snapshot(state: &AppState) -> TodayResponse {
    let auto = state.auto.lock().await;
    let session = state.session.lock().await;
    TodayResponse {
        date: session.day().to_string(),
        count: session.current_count(),
        all_time: session.all_time_count(),
        goal: session.daily_goal(),
        percent: session.progress_percent(),
        theme: session.theme().to_string(),
        auto_active: auto.active(),
        auto_interval_ms: auto.interval_ms(),
    }
}

fn history_of(session: &Session) -> HistoryResponse {
    HistoryResponse {
        entries: session.ledger().entries().to_vec(),
        best_day_count: session.best_day_count(),
        current_streak: session.current_streak(),
    }
}
