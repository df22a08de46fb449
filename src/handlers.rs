use crate::errors::AppError;
use crate::models::{FlipRequest, GuessRequest, Side, Snapshot};
use crate::runner::{self, ResetOutcome};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde_json::Value;
use std::num::NonZeroU32;

pub const MAX_BATCH: u32 = 10_000;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.snapshot().await;
    Html(render_index(&snapshot))
}

pub async fn get_state(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.snapshot().await)
}

pub async fn guess(
    State(state): State<AppState>,
    Json(payload): Json<GuessRequest>,
) -> Result<Json<Snapshot>, AppError> {
    let side = parse_side(&payload.side)?;
    runner::pick_guess(&state, side).await;
    Ok(Json(state.snapshot().await))
}

pub async fn flip(
    State(state): State<AppState>,
    Json(payload): Json<FlipRequest>,
) -> Result<Json<Snapshot>, AppError> {
    let times = requested_times(&payload.times)?;
    runner::flip_batch(&state, times).await;
    Ok(Json(state.snapshot().await))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    apply_reset(&state).await?;
    Ok(Json(state.snapshot().await))
}

pub async fn guess_form(
    State(state): State<AppState>,
    Path(side): Path<String>,
) -> Result<Redirect, AppError> {
    let side = parse_side(&side)?;
    runner::pick_guess(&state, side).await;
    Ok(Redirect::to("/"))
}

pub async fn flip_form(
    State(state): State<AppState>,
    Path(times): Path<u32>,
) -> Result<Redirect, AppError> {
    let times = batch_size(times)?;
    runner::flip_batch(&state, times).await;
    Ok(Redirect::to("/"))
}

pub async fn reset_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_reset(&state).await?;
    Ok(Redirect::to("/"))
}

async fn apply_reset(state: &AppState) -> Result<(), AppError> {
    match runner::reset(state).await {
        ResetOutcome::Done => Ok(()),
        ResetOutcome::Busy => Err(AppError::conflict(
            "A flip is in progress; reset when it finishes.",
        )),
    }
}

fn parse_side(value: &str) -> Result<Side, AppError> {
    Side::parse(value).ok_or_else(|| AppError::bad_request("side must be 'heads' or 'tails'"))
}

fn requested_times(value: &Value) -> Result<NonZeroU32, AppError> {
    let times = value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0);
    batch_size(times)
}

fn batch_size(times: u32) -> Result<NonZeroU32, AppError> {
    NonZeroU32::new(times)
        .filter(|n| n.get() <= MAX_BATCH)
        .ok_or_else(|| {
            AppError::bad_request(format!("times must be between 1 and {MAX_BATCH}"))
        })
}
