//! Where legacy payloads live until they are migrated.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use explorer_core::result::AppResult;

/// Access to a user's client-local legacy payload.
#[async_trait]
pub trait LegacyPayloadStore: Send + Sync {
    /// The raw payload, if one is present.
    async fn load(&self, user_id: Uuid) -> AppResult<Option<Value>>;

    /// Forget the payload.
    async fn clear(&self, user_id: Uuid) -> AppResult<()>;
}

/// Payloads held in a concurrent map, keyed by user.
#[derive(Debug, Default)]
pub struct MemoryLegacyPayloadStore {
    payloads: DashMap<Uuid, Value>,
}

impl MemoryLegacyPayloadStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a payload for `user_id`.
    pub fn put(&self, user_id: Uuid, payload: Value) {
        self.payloads.insert(user_id, payload);
    }

    /// Whether a payload is staged for `user_id`.
    pub fn contains(&self, user_id: Uuid) -> bool {
        self.payloads.contains_key(&user_id)
    }
}

#[async_trait]
impl LegacyPayloadStore for MemoryLegacyPayloadStore {
    async fn load(&self, user_id: Uuid) -> AppResult<Option<Value>> {
        Ok(self.payloads.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn clear(&self, user_id: Uuid) -> AppResult<()> {
        self.payloads.remove(&user_id);
        Ok(())
    }
}
