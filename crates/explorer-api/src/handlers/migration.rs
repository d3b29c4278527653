//! Client migration handler.
//!
//! The browser posts its legacy local itinerary once per session; it
//! deletes the local copy only when the response says `clearLegacy`.

use axum::Json;
use axum::extract::State;
use serde_json::Value;

use crate::dto::response::MigrationResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// POST /api/itineraries/migrate
pub async fn migrate_legacy(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<Json<MigrationResponse>> {
    let outcome = state.migration_service.migrate(&auth, &payload).await?;
    Ok(Json(outcome.into()))
}
