use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::dto::{LoginDraft, RegistrationDraft},
    error::{reject, ControllerError},
    records::repo_types::Record,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegistrationDraft>,
) -> Result<(StatusCode, Json<Record>), (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    let record = controller.register(&mut payload).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDraft>,
) -> Result<Json<Record>, (StatusCode, String)> {
    let mut controller = state.controller.lock().await;
    let session = controller
        .login(&payload)
        .map_err(|e| reject(ControllerError::from(e)))?;
    Ok(Json(session))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    let mut controller = state.controller.lock().await;
    controller.logout();
    info!("logout requested");
    StatusCode::NO_CONTENT
}
