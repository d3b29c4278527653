//! Route definitions for the WorldExplorer HTTP API.
//!
//! All routes are mounted under `/api` and share one `AppState`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;
    let cors = middleware::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(itinerary_routes())
        .merge(share_routes())
        .merge(calendar_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::logging::http_span))
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

/// Itinerary CRUD, event membership, per-itinerary export and migration
fn itinerary_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/itineraries",
            get(handlers::itinerary::list_itineraries).post(handlers::itinerary::create_itinerary),
        )
        .route(
            "/itineraries/migrate",
            post(handlers::migration::migrate_legacy),
        )
        .route(
            "/itineraries/{id}",
            get(handlers::itinerary::get_itinerary)
                .put(handlers::itinerary::update_itinerary)
                .delete(handlers::itinerary::delete_itinerary),
        )
        .route(
            "/itineraries/{id}/events",
            post(handlers::itinerary::add_event),
        )
        .route(
            "/itineraries/{id}/events/{event_id}",
            delete(handlers::itinerary::remove_event),
        )
        .route(
            "/itineraries/{id}/calendar",
            get(handlers::itinerary::export_itinerary_calendar),
        )
}

/// Shared link creation, management, and anonymous resolution
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/share/event", post(handlers::share::create_event_share))
        .route(
            "/share/itinerary",
            post(handlers::share::create_itinerary_share),
        )
        .route("/share/links", get(handlers::share::list_links))
        .route("/share/links/{id}", delete(handlers::share::revoke_link))
        .route("/share/{token}", get(handlers::share::resolve_link))
}

/// Ad hoc calendar export
fn calendar_routes() -> Router<AppState> {
    Router::new().route("/calendar/export", post(handlers::calendar::export_calendar))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
