//! Server-side sessions.
//!
//! The cookie only carries an opaque random id; the authenticated user id
//! lives here. Sessions expire after a period of inactivity.

use moka::future::Cache;
use std::time::Duration;
use uuid::Uuid;

const MAX_SESSIONS: u64 = 100_000;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, i64>,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_idle(idle_timeout)
            .build();
        Self { sessions }
    }

    /// Start a session for `user_id` and return its id
    pub async fn create(&self, user_id: i64) -> String {
        let session_id = Uuid::new_v4().simple().to_string();
        self.sessions.insert(session_id.clone(), user_id).await;
        session_id
    }

    pub async fn user_id(&self, session_id: &str) -> Option<i64> {
        self.sessions.get(session_id).await
    }

    pub async fn destroy(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_resolve_until_destroyed() {
        let store = SessionStore::new(Duration::from_secs(60));

        let alice = store.create(1).await;
        let bob = store.create(2).await;
        assert_ne!(alice, bob);

        assert_eq!(store.user_id(&alice).await, Some(1));
        assert_eq!(store.user_id(&bob).await, Some(2));

        store.destroy(&alice).await;
        assert_eq!(store.user_id(&alice).await, None);
        assert_eq!(store.user_id(&bob).await, Some(2));
    }

    #[tokio::test]
    async fn unknown_ids_resolve_to_nothing() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_eq!(store.user_id("not-a-session").await, None);
    }
}
