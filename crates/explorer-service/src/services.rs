//! Wiring of every service over one set of repositories.

use explorer_core::config::AppConfig;
use explorer_database::Repositories;

use crate::calendar::CalendarService;
use crate::itinerary::ItineraryService;
use crate::migration::MigrationService;
use crate::share::{AccessService, LinkService, ShareService};

/// All business services, cheap to clone.
#[derive(Debug, Clone)]
pub struct Services {
    /// Itinerary store.
    pub itineraries: ItineraryService,
    /// Owner-side shared link management.
    pub shares: ShareService,
    /// Anonymous token resolution.
    pub access: AccessService,
    /// Calendar export.
    pub calendar: CalendarService,
    /// Client migration.
    pub migration: MigrationService,
}

impl Services {
    /// Builds the services from repositories and configuration.
    pub fn new(repos: &Repositories, config: &AppConfig) -> Self {
        let itineraries = ItineraryService::new(repos.itineraries.clone());
        Self {
            migration: MigrationService::new(itineraries.clone()),
            itineraries,
            shares: ShareService::new(
                repos.shared_links.clone(),
                LinkService::new(&config.share),
            ),
            access: AccessService::new(repos.shared_links.clone()),
            calendar: CalendarService::new(&config.calendar),
        }
    }
}
