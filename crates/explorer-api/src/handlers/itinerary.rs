//! Itinerary CRUD and event membership handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use explorer_entity::event::Event;
use explorer_entity::itinerary::Itinerary;
use explorer_service::calendar::attachment_file_name;

use crate::dto::request::{CreateItineraryRequest, UpdateItineraryRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, ValidatedJson, parse_uuid};
use crate::handlers::calendar::calendar_response;
use crate::state::AppState;

/// GET /api/itineraries
pub async fn list_itineraries(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Itinerary>>> {
    let itineraries = state.itinerary_service.list(&auth).await?;
    Ok(Json(itineraries))
}

/// POST /api/itineraries
pub async fn create_itinerary(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateItineraryRequest>,
) -> ApiResult<(StatusCode, Json<Itinerary>)> {
    let itinerary = state.itinerary_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(itinerary)))
}

/// GET /api/itineraries/{id}
pub async fn get_itinerary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Itinerary>> {
    let id = parse_uuid(&id)?;
    let itinerary = state.itinerary_service.get(&auth, id).await?;
    Ok(Json(itinerary))
}

/// PUT /api/itineraries/{id}
pub async fn update_itinerary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateItineraryRequest>,
) -> ApiResult<Json<Itinerary>> {
    let id = parse_uuid(&id)?;
    let itinerary = state.itinerary_service.update(&auth, id, req.into()).await?;
    Ok(Json(itinerary))
}

/// DELETE /api/itineraries/{id}
pub async fn delete_itinerary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_uuid(&id)?;
    state.itinerary_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Itinerary deleted successfully")))
}

/// POST /api/itineraries/{id}/events
pub async fn add_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(event): JsonBody<Event>,
) -> ApiResult<Json<Itinerary>> {
    let id = parse_uuid(&id)?;
    let itinerary = state.itinerary_service.add_event(&auth, id, event).await?;
    Ok(Json(itinerary))
}

/// DELETE /api/itineraries/{id}/events/{event_id}
pub async fn remove_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, event_id)): Path<(String, String)>,
) -> ApiResult<Json<Itinerary>> {
    let id = parse_uuid(&id)?;
    let itinerary = state
        .itinerary_service
        .remove_event(&auth, id, &event_id)
        .await?;
    Ok(Json(itinerary))
}

/// GET /api/itineraries/{id}/calendar
pub async fn export_itinerary_calendar(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_uuid(&id)?;
    let itinerary = state.itinerary_service.get(&auth, id).await?;
    let document = state.calendar_service.export(&itinerary.events)?;
    Ok(calendar_response(&attachment_file_name(&itinerary.name), document))
}
