use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::{StoredAuth, UserInfo};
use parking_lot::RwLock;

use super::storage::KeyValueStore;
use crate::shared::config::AuthSettings;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user_info: Option<UserInfo>,
}

/// Authentication flag plus the persisted session blob behind it.
///
/// Clones share state, so the auth guard, the app context and pages all see
/// the same flag.
#[derive(Clone)]
pub struct AuthSession {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    ttl: Duration,
    state: Arc<RwLock<AuthState>>,
}

impl AuthSession {
    pub fn new(storage: Arc<dyn KeyValueStore>, settings: &AuthSettings) -> Self {
        Self {
            storage,
            key: settings.storage_key.clone(),
            ttl: Duration::hours(settings.session_ttl_hours),
            state: Arc::new(RwLock::new(AuthState::default())),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().user_info.is_some()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.read().user_info.clone()
    }

    /// Restores a stored session that has not expired at `now`. Expired or
    /// unreadable blobs are removed.
    pub fn restore(&self, now: DateTime<Utc>) -> bool {
        let Some(raw) = self.storage.get(&self.key) else {
            return false;
        };
        match serde_json::from_str::<StoredAuth>(&raw) {
            Ok(stored) if stored.is_valid_at(now) => {
                log::info!("restored session for {}", stored.user.email);
                self.state.write().user_info = Some(stored.user);
                true
            }
            Ok(stored) => {
                log::info!("session for {} expired at {}", stored.user.email, stored.expiry);
                self.sign_out();
                false
            }
            Err(err) => {
                log::error!("failed to restore auth state: {}", err);
                self.sign_out();
                false
            }
        }
    }

    pub fn sign_in(&self, user: UserInfo, token: String, now: DateTime<Utc>) {
        let stored = StoredAuth {
            user: user.clone(),
            token,
            expiry: now + self.ttl,
        };
        match serde_json::to_string(&stored) {
            Ok(json) => self.storage.set(&self.key, &json),
            Err(err) => log::warn!("failed to persist session: {}", err),
        }
        self.state.write().user_info = Some(user);
    }

    pub fn sign_out(&self) {
        self.state.write().user_info = None;
        self.storage.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::AppConfig;
    use crate::system::auth::storage::MemoryStore;
    use chrono::TimeZone;

    fn session() -> (AuthSession, MemoryStore) {
        let memory = MemoryStore::default();
        let session = AuthSession::new(Arc::new(memory.clone()), &AppConfig::default().auth);
        (session, memory)
    }

    fn user() -> UserInfo {
        UserInfo {
            email: "user@kevinlab.co.kr".to_string(),
            name: "사용자".to_string(),
            role: "user".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_sign_in_persists_blob_with_expiry() {
        let (session, memory) = session();
        session.sign_in(user(), "mock-token-12345".to_string(), now());

        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some(user()));
        let stored: StoredAuth = serde_json::from_str(&memory.get("auth").unwrap()).unwrap();
        assert_eq!(stored.token, "mock-token-12345");
        assert_eq!(stored.expiry, now() + Duration::hours(24));
    }

    #[test]
    fn test_restore_within_ttl() {
        let (session, memory) = session();
        session.sign_in(user(), "t".to_string(), now());

        let restored = AuthSession::new(Arc::new(memory), &AppConfig::default().auth);
        assert!(restored.restore(now() + Duration::hours(23)));
        assert!(restored.is_authenticated());
    }

    #[test]
    fn test_restore_expired_clears_blob() {
        let (session, memory) = session();
        session.sign_in(user(), "t".to_string(), now());

        let restored = AuthSession::new(Arc::new(memory.clone()), &AppConfig::default().auth);
        assert!(!restored.restore(now() + Duration::hours(24)));
        assert!(!restored.is_authenticated());
        assert_eq!(memory.get("auth"), None);
    }

    #[test]
    fn test_restore_garbage_clears_blob() {
        let (session, memory) = session();
        memory.set("auth", "{not json");
        assert!(!session.restore(now()));
        assert_eq!(memory.get("auth"), None);
        assert!(!session.restore(now()));
    }

    #[test]
    fn test_sign_out() {
        let (session, memory) = session();
        session.sign_in(user(), "t".to_string(), now());
        let shared = session.clone();

        session.sign_out();
        assert!(!shared.is_authenticated());
        assert_eq!(memory.get("auth"), None);
    }
}
