//! Response DTOs.

use serde::{Deserialize, Serialize};

use explorer_entity::itinerary::Itinerary;
use explorer_entity::share::SharedLink;
use explorer_service::migration::{MigrationOutcome, SkipReason};
use explorer_service::share::CreatedShare;

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returned when a link is minted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    /// Bearer token.
    pub token: String,
    /// Public URL embedding the token.
    pub share_url: String,
    /// Stored record.
    pub shared_link: SharedLink,
}

impl From<CreatedShare> for ShareResponse {
    fn from(created: CreatedShare) -> Self {
        Self {
            token: created.token,
            share_url: created.share_url,
            shared_link: created.shared_link,
        }
    }
}

/// Returned when a link is revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeResponse {
    /// Human-readable message.
    pub message: String,
    /// The revoked link.
    pub link: SharedLink,
}

/// Result of a migration request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResponse {
    /// Whether an itinerary was created.
    pub migrated: bool,
    /// The created itinerary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
    /// Whether the client should now drop its local copy.
    pub clear_legacy: bool,
    /// Why nothing happened, when nothing did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    /// Number of legacy records that were dropped.
    pub rejected: usize,
}

impl From<MigrationOutcome> for MigrationResponse {
    fn from(outcome: MigrationOutcome) -> Self {
        match outcome {
            MigrationOutcome::Migrated {
                itinerary,
                rejected,
            } => Self {
                migrated: true,
                itinerary: Some(itinerary),
                clear_legacy: true,
                skipped: None,
                rejected: rejected.len(),
            },
            MigrationOutcome::Skipped(reason) => Self {
                migrated: false,
                itinerary: None,
                clear_legacy: false,
                skipped: Some(reason),
                rejected: 0,
            },
        }
    }
}

/// Liveness and store status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `ok` or `unavailable`.
    pub store: String,
}
