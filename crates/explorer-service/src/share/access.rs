//! Anonymous token resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use explorer_core::error::AppError;
use explorer_database::repositories::SharedLinkRepository;
use explorer_entity::share::SharedLink;

const NOT_FOUND: &str = "Shared link not found";

/// Resolves bearer tokens to shared links and counts each access.
#[derive(Clone)]
pub struct AccessService {
    repo: Arc<dyn SharedLinkRepository>,
}

impl std::fmt::Debug for AccessService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessService").finish_non_exhaustive()
    }
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(repo: Arc<dyn SharedLinkRepository>) -> Self {
        Self { repo }
    }

    /// Resolves `token` at the current instant.
    pub async fn resolve(&self, token: &str) -> Result<SharedLink, AppError> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Resolves `token` as of `now`.
    ///
    /// Unknown and revoked tokens are both `NotFound`; an expired link is
    /// `Gone`. Only a successful resolution increments `access_count`.
    pub async fn resolve_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SharedLink, AppError> {
        if token.is_empty() {
            return Err(AppError::not_found(NOT_FOUND));
        }

        if let Some(link) = self.repo.record_access(token, now).await? {
            debug!(link_id = %link.id, access_count = link.access_count, "Shared link resolved");
            return Ok(link);
        }

        match self.repo.find_by_token(token).await? {
            Some(link) if !link.is_revoked && link.is_expired_at(now) => {
                debug!(link_id = %link.id, "Expired shared link requested");
                Err(AppError::gone("Shared link has expired"))
            }
            _ => Err(AppError::not_found(NOT_FOUND)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use explorer_core::config::ShareConfig;
    use explorer_core::error::ErrorKind;
    use explorer_database::memory::MemorySharedLinkRepository;
    use explorer_entity::event::Event;
    use uuid::Uuid;

    use super::*;
    use crate::context::RequestContext;
    use crate::share::{EventShareRequest, LinkService, ShareService};

    fn services() -> (ShareService, AccessService) {
        let repo: Arc<dyn SharedLinkRepository> = Arc::new(MemorySharedLinkRepository::new());
        (
            ShareService::new(Arc::clone(&repo), LinkService::new(&ShareConfig::default())),
            AccessService::new(repo),
        )
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), None)
    }

    fn event_request(expires_at: Option<DateTime<Utc>>) -> EventShareRequest {
        EventShareRequest {
            event_id: Some("E1".to_string()),
            event_name: Some("Inti Raymi".to_string()),
            event_url: Some("https://tickets.example/E1".to_string()),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_resolve_counts_each_access() {
        let (shares, access) = services();
        let created = shares
            .create_event_share(&ctx(), event_request(None))
            .await
            .unwrap();

        access.resolve(&created.token).await.unwrap();
        let second = access.resolve(&created.token).await.unwrap();
        assert_eq!(second.access_count, 2);
        assert_eq!(second.event_name.as_deref(), Some("Inti Raymi"));
    }

    #[tokio::test]
    async fn test_revoked_link_looks_missing_and_is_not_counted() {
        let (shares, access) = services();
        let ctx = ctx();
        let created = shares
            .create_event_share(&ctx, event_request(None))
            .await
            .unwrap();
        shares.revoke(&ctx, created.shared_link.id).await.unwrap();

        let revoked = access.resolve(&created.token).await.unwrap_err();
        let unknown = access.resolve("0000").await.unwrap_err();
        assert_eq!(revoked.kind, ErrorKind::NotFound);
        assert_eq!(revoked.message, unknown.message);

        let links = shares.list_links(&ctx).await.unwrap();
        assert_eq!(links[0].access_count, 0);
    }

    #[tokio::test]
    async fn test_expired_link_is_gone_and_not_counted() {
        let (shares, access) = services();
        let ctx = ctx();
        let expires = ctx.request_time + Duration::minutes(5);
        let created = shares
            .create_event_share(&ctx, event_request(Some(expires)))
            .await
            .unwrap();

        let later = expires + Duration::seconds(1);
        let err = access
            .resolve_at(&created.token, later)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Gone);
        assert_eq!(shares.list_links(&ctx).await.unwrap()[0].access_count, 0);

        let earlier = access
            .resolve_at(&created.token, expires - Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(earlier.access_count, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_resolutions_are_all_counted() {
        let (shares, access) = services();
        let created = shares
            .create_event_share(&ctx(), event_request(None))
            .await
            .unwrap();

        let tasks = (0..64).map(|_| {
            let access = access.clone();
            let token = created.token.clone();
            tokio::spawn(async move { access.resolve(&token).await })
        });
        for result in futures::future::join_all(tasks).await {
            assert!(result.unwrap().is_ok());
        }

        let final_count = access.resolve(&created.token).await.unwrap().access_count;
        assert_eq!(final_count, 65);
    }

    #[tokio::test]
    async fn test_snapshot_survives_later_source_changes() {
        let (shares, access) = services();
        let mut source = vec![Event::new("E1", "Inti Raymi"), Event::new("E2", "Machu Picchu")];
        let created = shares
            .create_itinerary_share(&ctx(), source.clone(), None)
            .await
            .unwrap();

        source.retain(|e| e.id != "E1");
        source[0].name = "renamed".to_string();

        let link = access.resolve(&created.token).await.unwrap();
        let snapshot = link.itinerary_data.unwrap();
        let names: Vec<&str> = snapshot.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Inti Raymi", "Machu Picchu"]);
    }
}
