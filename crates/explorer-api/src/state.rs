//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use explorer_auth::jwt::JwtDecoder;
use explorer_core::config::AppConfig;
use explorer_database::Repositories;
use explorer_service::Services;
use explorer_service::calendar::CalendarService;
use explorer_service::itinerary::ItineraryService;
use explorer_service::migration::MigrationService;
use explorer_service::share::{AccessService, ShareService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Backing repositories, for health checks
    pub repositories: Repositories,
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Itinerary store
    pub itinerary_service: Arc<ItineraryService>,
    /// Owner-side shared link management
    pub share_service: Arc<ShareService>,
    /// Anonymous token resolution
    pub access_service: Arc<AccessService>,
    /// Calendar export
    pub calendar_service: Arc<CalendarService>,
    /// Client migration
    pub migration_service: Arc<MigrationService>,
}

impl AppState {
    /// Wires every service over `repositories`.
    pub fn new(config: AppConfig, repositories: Repositories) -> Self {
        let services = Services::new(&repositories, &config);
        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            itinerary_service: Arc::new(services.itineraries),
            share_service: Arc::new(services.shares),
            access_service: Arc::new(services.access),
            calendar_service: Arc::new(services.calendar),
            migration_service: Arc::new(services.migration),
            repositories,
            config: Arc::new(config),
        }
    }
}
