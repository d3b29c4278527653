//! Shared link handlers. Only `resolve_link` is anonymous.

use axum::Json;
use axum::extract::{Path, State};

use explorer_core::error::AppError;
use explorer_entity::share::SharedLink;

use crate::dto::request::{CreateEventShareRequest, CreateItineraryShareRequest};
use crate::dto::response::{RevokeResponse, ShareResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/share/event
pub async fn create_event_share(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateEventShareRequest>,
) -> ApiResult<Json<ShareResponse>> {
    let created = state
        .share_service
        .create_event_share(&auth, req.into())
        .await?;
    Ok(Json(created.into()))
}

/// POST /api/share/itinerary
pub async fn create_itinerary_share(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateItineraryShareRequest>,
) -> ApiResult<Json<ShareResponse>> {
    let events = req
        .events
        .ok_or_else(|| AppError::validation("No events provided"))?;
    let created = state
        .share_service
        .create_itinerary_share(&auth, events, req.expires_at)
        .await?;
    Ok(Json(created.into()))
}

/// GET /api/share/{token}
pub async fn resolve_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<SharedLink>> {
    let link = state.access_service.resolve(&token).await?;
    Ok(Json(link))
}

/// GET /api/share/links
pub async fn list_links(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SharedLink>>> {
    let links = state.share_service.list_links(&auth).await?;
    Ok(Json(links))
}

/// DELETE /api/share/links/{id}
pub async fn revoke_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<RevokeResponse>> {
    let id = parse_uuid(&id)?;
    let link = state.share_service.revoke(&auth, id).await?;
    Ok(Json(RevokeResponse {
        message: "Shared link revoked successfully".to_string(),
        link,
    }))
}
