//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the HTTP extractor from verified token claims and passed into
/// every owner-scoped service method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Display name from the token, if any.
    pub username: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(user_id: Uuid, username: Option<String>) -> Self {
        Self {
            user_id,
            username,
            request_time: Utc::now(),
        }
    }
}
