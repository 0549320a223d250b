use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    error::{reject, ControllerError},
    records::{
        controller::RecordCollectionController,
        dto::{BulkResponse, Snapshot, ToggleRequest},
    },
    state::AppState,
};

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records))
        .route("/records/reload", post(reload_records))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/selection/toggle", post(toggle_selection))
        .route("/selection/all", post(select_all))
        .route("/selection", delete(deselect_all))
        .route("/records/block", post(block_selected))
        .route("/records/unblock", post(unblock_selected))
        .route("/records/delete", post(delete_selected))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_records(State(state): State<AppState>) -> Json<Snapshot> {
    let controller = state.controller.lock().await;
    Json(controller.snapshot())
}

#[instrument(skip(state))]
pub async fn reload_records(
    State(state): State<AppState>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    controller.load().await.map_err(reject)?;
    Ok(Json(controller.snapshot()))
}

#[instrument(skip(state, payload))]
pub async fn toggle_selection(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    require_session(&controller)?;
    let selected = controller.toggle_selection(&payload.id).map_err(reject)?;
    debug!(record_id = %payload.id, selected, "selection toggled");
    Ok(Json(controller.snapshot()))
}

#[instrument(skip(state))]
pub async fn select_all(
    State(state): State<AppState>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    require_session(&controller)?;
    let count = controller.select_all();
    debug!(count, "select all toggled");
    Ok(Json(controller.snapshot()))
}

#[instrument(skip(state))]
pub async fn deselect_all(
    State(state): State<AppState>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    require_session(&controller)?;
    controller.deselect_all();
    Ok(Json(controller.snapshot()))
}

#[instrument(skip(state))]
pub async fn block_selected(
    State(state): State<AppState>,
) -> Result<Json<BulkResponse>, (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    require_session(&controller)?;
    let outcome = controller.block_selected().await.map_err(reject)?;
    Ok(Json(BulkResponse {
        outcome,
        snapshot: controller.snapshot(),
    }))
}

#[instrument(skip(state))]
pub async fn unblock_selected(
    State(state): State<AppState>,
) -> Result<Json<BulkResponse>, (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    require_session(&controller)?;
    let outcome = controller.unblock_selected().await.map_err(reject)?;
    Ok(Json(BulkResponse {
        outcome,
        snapshot: controller.snapshot(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_selected(
    State(state): State<AppState>,
) -> Result<Json<BulkResponse>, (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    require_session(&controller)?;
    let outcome = controller.delete_selected().await.map_err(reject)?;
    Ok(Json(BulkResponse {
        outcome,
        snapshot: controller.snapshot(),
    }))
}

// The table and toolbar are only offered to a logged-in user.
fn require_session(controller: &RecordCollectionController) -> Result<(), (StatusCode, String)> {
    if controller.current_user().is_none() {
        return Err(reject(ControllerError::NotAuthenticated));
    }
    Ok(())
}
