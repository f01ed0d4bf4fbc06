//! HTTP handlers for environment data endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use shared::EnvironmentReading;

use crate::error::AppResult;
use crate::AppState;

/// Get the cached environment reading for a location
pub async fn get_environment(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> AppResult<Json<EnvironmentReading>> {
    let reading = state.environment_cache.get(&location).await?;
    Ok(Json(reading))
}
