//! Process-wide, in-memory session store.
//!
//! Sessions live for a fixed window from login; they are not extended on
//! use. Expired entries are dropped lazily on lookup and in bulk by the
//! periodic cleanup task.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Identity stored in an authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub account_id: i64,
    pub employee_id: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

pub struct SessionStore {
    entries: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start an authenticated session for `user`
    pub fn create(&self, user: SessionUser) -> Session {
        let created_at = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user,
            created_at,
            expires_at: created_at + self.ttl,
        };
        self.entries.insert(session.token.clone(), session.clone());
        session
    }

    /// Look up a live session; expired ones are removed and reported as absent
    pub fn get(&self, token: &str) -> Option<Session> {
        let session = self.entries.get(token).map(|entry| entry.value().clone())?;
        if session.is_expired_at(Utc::now()) {
            self.entries.remove(token);
            return None;
        }
        Some(session)
    }

    /// Remove a session; returns whether it existed
    pub fn destroy(&self, token: &str) -> bool {
        self.entries.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, session| !session.is_expired_at(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn force_expire(&self, token: &str) {
        if let Some(mut entry) = self.entries.get_mut(token) {
            entry.expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(employee_id: &str) -> SessionUser {
        SessionUser {
            account_id: 1,
            employee_id: employee_id.to_string(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = SessionStore::new(Duration::hours(24));
        let session = store.create(user("EMP10254"));

        assert_eq!(session.expires_at - session.created_at, Duration::hours(24));
        let found = store.get(&session.token).unwrap();
        assert_eq!(found.user.employee_id, "EMP10254");
        assert!(store.get("not-a-token").is_none());
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new(Duration::hours(24));
        let a = store.create(user("EMP10254"));
        let b = store.create(user("EMP10254"));
        assert_ne!(a.token, b.token);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_destroy() {
        let store = SessionStore::new(Duration::hours(24));
        let session = store.create(user("EMP10842"));

        assert!(store.destroy(&session.token));
        assert!(!store.destroy(&session.token));
        assert!(store.get(&session.token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_expired_session_is_absent() {
        let store = SessionStore::new(Duration::hours(24));
        let session = store.create(user("EMP10468"));
        store.force_expire(&session.token);

        assert!(store.get(&session.token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_cleanup_expired() {
        let store = SessionStore::new(Duration::hours(24));
        let stale = store.create(user("EMP10254"));
        let live = store.create(user("EMP10842"));
        store.force_expire(&stale.token);

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&live.token).is_some());
        assert_eq!(store.cleanup_expired(), 0);
    }
}
