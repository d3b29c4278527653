//! Calendar export handler.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::dto::request::CalendarExportRequest;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/calendar/export
pub async fn export_calendar(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CalendarExportRequest>,
) -> ApiResult<Response> {
    let events = req.events.unwrap_or_default();
    let document = state.calendar_service.export(&events)?;
    Ok(calendar_response("itinerary.ics", document))
}

/// A downloadable `text/calendar` attachment.
pub fn calendar_response(file_name: &str, document: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        document,
    )
        .into_response()
}
