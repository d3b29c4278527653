//! Shared link creation, listing, and revocation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use explorer_core::error::{AppError, ErrorKind};
use explorer_database::repositories::SharedLinkRepository;
use explorer_entity::event::Event;
use explorer_entity::share::{CreateSharedLink, ItinerarySnapshot, SharedLink, SharedLinkType};

use super::link::LinkService;
use crate::context::RequestContext;

/// Attempts at minting a token that is not already stored.
const TOKEN_ATTEMPTS: usize = 3;

/// Request to share a single event.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EventShareRequest {
    /// Event id.
    pub event_id: Option<String>,
    /// Event name.
    pub event_name: Option<String>,
    /// Event url.
    pub event_url: Option<String>,
    /// Optional expiry; must lie in the future.
    pub expires_at: Option<DateTime<Utc>>,
}

/// A freshly minted link plus its stored record.
#[derive(Debug, Clone)]
pub struct CreatedShare {
    /// Bearer token.
    pub token: String,
    /// Public URL embedding the token.
    pub share_url: String,
    /// The stored record.
    pub shared_link: SharedLink,
}

/// Owner-side shared link management.
#[derive(Clone)]
pub struct ShareService {
    repo: Arc<dyn SharedLinkRepository>,
    links: LinkService,
}

impl std::fmt::Debug for ShareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareService")
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(repo: Arc<dyn SharedLinkRepository>, links: LinkService) -> Self {
        Self { repo, links }
    }

    /// Shares one event. All three event fields are required.
    pub async fn create_event_share(
        &self,
        ctx: &RequestContext,
        req: EventShareRequest,
    ) -> Result<CreatedShare, AppError> {
        let event_id = required(req.event_id, "eventId")?;
        let event_name = required(req.event_name, "eventName")?;
        let event_url = required(req.event_url, "eventUrl")?;
        check_expiry(req.expires_at, ctx.request_time)?;

        let created = self
            .mint(CreateSharedLink {
                user_id: ctx.user_id,
                link_type: SharedLinkType::Event,
                token: String::new(),
                event_id: Some(event_id),
                event_name: Some(event_name),
                event_url: Some(event_url),
                itinerary_data: None,
                expires_at: req.expires_at,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            link_id = %created.shared_link.id,
            event_id = ?created.shared_link.event_id,
            "Event share created"
        );
        Ok(created)
    }

    /// Shares a frozen copy of `events`. The list must not be empty.
    pub async fn create_itinerary_share(
        &self,
        ctx: &RequestContext,
        events: Vec<Event>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<CreatedShare, AppError> {
        if events.is_empty() {
            return Err(AppError::validation("At least one event is required"));
        }
        check_expiry(expires_at, ctx.request_time)?;

        let count = events.len();
        let created = self
            .mint(CreateSharedLink {
                user_id: ctx.user_id,
                link_type: SharedLinkType::Itinerary,
                token: String::new(),
                event_id: None,
                event_name: None,
                event_url: None,
                itinerary_data: Some(ItinerarySnapshot { events }),
                expires_at,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            link_id = %created.shared_link.id,
            events = count,
            "Itinerary share created"
        );
        Ok(created)
    }

    /// Lists the caller's links, newest first, revoked ones included.
    pub async fn list_links(&self, ctx: &RequestContext) -> Result<Vec<SharedLink>, AppError> {
        self.repo.list_by_user(ctx.user_id).await
    }

    /// Revokes one of the caller's links. Revoking twice succeeds.
    pub async fn revoke(&self, ctx: &RequestContext, link_id: Uuid) -> Result<SharedLink, AppError> {
        let link = self
            .repo
            .revoke(ctx.user_id, link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shared link not found"))?;

        info!(user_id = %ctx.user_id, link_id = %link_id, "Shared link revoked");
        Ok(link)
    }

    async fn mint(&self, mut data: CreateSharedLink) -> Result<CreatedShare, AppError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            data.token = self.links.generate_token();
            match self.repo.create(&data).await {
                Ok(shared_link) => {
                    return Ok(CreatedShare {
                        token: shared_link.token.clone(),
                        share_url: self.links.share_url(&shared_link.token),
                        shared_link,
                    });
                }
                Err(e) if e.kind == ErrorKind::Conflict && attempt < TOKEN_ATTEMPTS => {
                    warn!(attempt, "Share token collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Rejects missing or blank values; accepted values are stored as sent.
fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::validation(format!("{field} is required")))
}

fn check_expiry(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<(), AppError> {
    match expires_at {
        Some(at) if at <= now => Err(AppError::validation("expiresAt must be in the future")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use explorer_core::config::ShareConfig;
    use explorer_database::memory::MemorySharedLinkRepository;

    use super::*;

    fn service() -> ShareService {
        ShareService::new(
            Arc::new(MemorySharedLinkRepository::new()),
            LinkService::new(&ShareConfig::default()),
        )
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), Some("ana".to_string()))
    }

    fn event_request() -> EventShareRequest {
        EventShareRequest {
            event_id: Some("E1".to_string()),
            event_name: Some("Inti Raymi".to_string()),
            event_url: Some("https://tickets.example/E1".to_string()),
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_event_share_requires_all_fields() {
        let svc = service();
        for req in [
            EventShareRequest {
                event_id: None,
                ..event_request()
            },
            EventShareRequest {
                event_name: Some("  ".to_string()),
                ..event_request()
            },
            EventShareRequest {
                event_url: None,
                ..event_request()
            },
        ] {
            let err = svc.create_event_share(&ctx(), req).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[tokio::test]
    async fn test_event_fields_are_stored_verbatim() {
        let created = service()
            .create_event_share(
                &ctx(),
                EventShareRequest {
                    event_id: Some(" E1 ".to_string()),
                    event_name: Some("Inti Raymi\n".to_string()),
                    ..event_request()
                },
            )
            .await
            .unwrap();

        assert_eq!(created.shared_link.event_id.as_deref(), Some(" E1 "));
        assert_eq!(created.shared_link.event_name.as_deref(), Some("Inti Raymi\n"));
    }

    #[tokio::test]
    async fn test_repeated_event_shares_get_distinct_tokens() {
        let svc = service();
        let ctx = ctx();
        let a = svc.create_event_share(&ctx, event_request()).await.unwrap();
        let b = svc.create_event_share(&ctx, event_request()).await.unwrap();

        assert_ne!(a.token, b.token);
        assert_eq!(
            a.share_url,
            format!("http://localhost:3000/share/{}", a.token)
        );
        assert!(!a.share_url.contains(&a.shared_link.id.to_string()));
    }

    #[tokio::test]
    async fn test_itinerary_share_requires_events() {
        let err = service()
            .create_itinerary_share(&ctx(), Vec::new(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_past_expiry_is_rejected() {
        let svc = service();
        let ctx = ctx();
        let err = svc
            .create_event_share(
                &ctx,
                EventShareRequest {
                    expires_at: Some(ctx.request_time - Duration::hours(1)),
                    ..event_request()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_revoke_is_owner_only_and_idempotent() {
        let svc = service();
        let owner = ctx();
        let created = svc.create_event_share(&owner, event_request()).await.unwrap();
        let id = created.shared_link.id;

        let err = svc.revoke(&ctx(), id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        assert!(svc.revoke(&owner, id).await.unwrap().is_revoked);
        assert!(svc.revoke(&owner, id).await.unwrap().is_revoked);
    }

    #[tokio::test]
    async fn test_list_includes_revoked_newest_first() {
        let svc = service();
        let ctx = ctx();
        let first = svc.create_event_share(&ctx, event_request()).await.unwrap();
        let second = svc
            .create_itinerary_share(&ctx, vec![Event::new("E2", "Lima Food Tour")], None)
            .await
            .unwrap();
        svc.revoke(&ctx, first.shared_link.id).await.unwrap();

        let links = svc.list_links(&ctx).await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].id, second.shared_link.id);
        assert!(links[1].is_revoked);
        let stranger = RequestContext::new(Uuid::new_v4(), None);
        assert!(svc.list_links(&stranger).await.unwrap().is_empty());
    }
}
