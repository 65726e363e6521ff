//! Assistant API routes

use axum::Router;
use domain_assistant::{AssistantService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(AssistantService::new(state.generator.clone()))
}
