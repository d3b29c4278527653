//! In-memory shared link repository.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use explorer_core::error::AppError;
use explorer_core::result::AppResult;
use explorer_entity::share::{CreateSharedLink, SharedLink};

use super::{Stored, newest_first};
use crate::repositories::SharedLinkRepository;

/// Shared links keyed by id, with a unique token index.
#[derive(Debug, Default)]
pub struct MemorySharedLinkRepository {
    links: DashMap<Uuid, Stored<SharedLink>>,
    tokens: DashMap<String, Uuid>,
    seq: AtomicU64,
}

impl MemorySharedLinkRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SharedLinkRepository for MemorySharedLinkRepository {
    async fn create(&self, data: &CreateSharedLink) -> AppResult<SharedLink> {
        let now = Utc::now();
        let link = SharedLink {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            link_type: data.link_type,
            token: data.token.clone(),
            event_id: data.event_id.clone(),
            event_name: data.event_name.clone(),
            event_url: data.event_url.clone(),
            itinerary_data: data.itinerary_data.clone(),
            is_revoked: false,
            access_count: 0,
            expires_at: data.expires_at,
            created_at: now,
            updated_at: now,
        };

        // The record is inserted before the token slot is filled, so a
        // visible token always has a backing link.
        match self.tokens.entry(data.token.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Share token already in use")),
            Entry::Vacant(slot) => {
                let seq = self.seq.fetch_add(1, Ordering::SeqCst);
                self.links.insert(
                    link.id,
                    Stored {
                        seq,
                        doc: link.clone(),
                    },
                );
                slot.insert(link.id);
                Ok(link)
            }
        }
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<SharedLink>> {
        let Some(id) = self.tokens.get(token).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.links.get(&id).map(|entry| entry.doc.clone()))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<SharedLink>> {
        let owned = self
            .links
            .iter()
            .filter(|entry| entry.doc.user_id == user_id)
            .map(|entry| (entry.doc.created_at, entry.value().clone()))
            .collect();
        Ok(newest_first(owned))
    }

    async fn record_access(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<SharedLink>> {
        let Some(id) = self.tokens.get(token).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        let Some(mut entry) = self.links.get_mut(&id) else {
            return Ok(None);
        };
        let link = &mut entry.doc;
        if link.is_revoked || link.is_expired_at(now) {
            return Ok(None);
        }
        link.access_count += 1;
        link.updated_at = now;
        Ok(Some(link.clone()))
    }

    async fn revoke(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<SharedLink>> {
        let Some(mut entry) = self.links.get_mut(&id) else {
            return Ok(None);
        };
        let link = &mut entry.doc;
        if link.user_id != user_id {
            return Ok(None);
        }
        if !link.is_revoked {
            link.is_revoked = true;
            link.updated_at = Utc::now();
        }
        Ok(Some(link.clone()))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
