use axum::Router;
use serde::Serialize;

use crate::state::AppState;

pub mod admin;
pub mod merchant;

/// Bare `{success: true}` body for operations with no payload.
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    success: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

pub fn api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/admin", admin::admin_router(state.clone()))
        .nest("/api/merchant", merchant::merchant_router(state.clone()))
        .with_state(state)
}
