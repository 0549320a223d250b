use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod session;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
