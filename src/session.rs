//! Session
//!
//! Login state as an explicit object: created by a successful login,
//! persisted in a key-value store so reloads stay signed in, torn down by
//! logout. Components reach it through [`SessionContext`] instead of
//! poking at browser storage themselves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::models::LoginResponse;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Key-value persistence backing the session
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ApiResult<()>;
    /// Remove every key
    fn clear(&self);
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// False in private modes or sandboxed frames that deny storage access
    pub fn is_available() -> bool {
        Self::storage().is_some()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let storage = Self::storage().ok_or_else(|| ApiError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.clear();
        }
    }
}

/// In-memory store, for tests and environments without web storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ApiError::Storage("memory store poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Everything else the login endpoint returned about the user
    pub profile: Map<String, Value>,
}

impl Session {
    pub fn from_login(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            profile: response.profile,
        }
    }

    /// First name, else username, else "User"
    pub fn display_name(&self) -> String {
        ["firstName", "username"]
            .iter()
            .filter_map(|key| self.profile.get(*key).and_then(Value::as_str))
            .find(|name| !name.is_empty())
            .unwrap_or("User")
            .to_string()
    }

    /// Write all session keys. A partial write is undone so the store never
    /// holds a token without its profile.
    pub fn persist(&self, store: &dyn KeyValueStore) -> ApiResult<()> {
        let profile = serde_json::to_string(&self.profile)?;
        let written = store
            .set(ACCESS_TOKEN_KEY, &self.access_token)
            .and_then(|()| store.set(REFRESH_TOKEN_KEY, &self.refresh_token))
            .and_then(|()| store.set(USER_KEY, &profile));
        if written.is_err() {
            store.clear();
        }
        written
    }

    /// Read a previously persisted session; `None` unless an access token is present
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        let access_token = store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())?;
        let profile = store
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<Map<String, Value>>(&raw).ok())
            .unwrap_or_default();
        Some(Self {
            access_token,
            refresh_token: store.get(REFRESH_TOKEN_KEY).unwrap_or_default(),
            profile,
        })
    }
}

/// Reactive session handle provided via context
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    current: RwSignal<Option<Session>>,
}

impl SessionContext {
    /// Pick up whatever session the store already holds
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let current = Session::load(store.as_ref());
        log::debug!(target: "session", "Restored session: {}", current.is_some());
        Self {
            store,
            current: RwSignal::new(current),
        }
    }

    /// Start a session from a login response
    pub fn begin(&self, response: LoginResponse) -> ApiResult<()> {
        let session = Session::from_login(response);
        session.persist(self.store.as_ref())?;
        log::info!(target: "session", "Signed in as {}", session.display_name());
        self.current.set(Some(session));
        Ok(())
    }

    /// Drop the session and everything in the store
    pub fn end(&self) {
        self.store.clear();
        self.current.set(None);
        log::info!(target: "session", "Signed out");
    }

    /// Tracked: re-runs reactive scopes on login/logout
    pub fn is_authenticated(&self) -> bool {
        self.current.with(Option::is_some)
    }

    pub fn is_authenticated_untracked(&self) -> bool {
        self.current.with_untracked(Option::is_some)
    }

    pub fn display_name(&self) -> Option<String> {
        self.current.with(|s| s.as_ref().map(Session::display_name))
    }

    pub fn access_token_untracked(&self) -> Option<String> {
        self.current.with_untracked(|s| s.as_ref().map(|s| s.access_token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_response(first_name: Option<&str>) -> LoginResponse {
        let mut profile = Map::new();
        profile.insert("username".to_string(), Value::from("emilys"));
        if let Some(name) = first_name {
            profile.insert("firstName".to_string(), Value::from(name));
        }
        LoginResponse {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            profile,
        }
    }

    /// Store whose writes start failing after `ok_writes` successes
    struct FlakyStore {
        inner: MemoryStore,
        ok_writes: Mutex<usize>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> ApiResult<()> {
            let mut left = self.ok_writes.lock().unwrap();
            if *left == 0 {
                return Err(ApiError::Storage("quota exceeded".to_string()));
            }
            *left -= 1;
            self.inner.set(key, value)
        }

        fn clear(&self) {
            self.inner.clear();
        }
    }

    #[test]
    fn test_persist_writes_all_keys() {
        let store = MemoryStore::new();
        Session::from_login(login_response(Some("Emily"))).persist(&store).unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("access"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh"));
        let user: Value = serde_json::from_str(&store.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(user["firstName"], "Emily");
    }

    #[test]
    fn test_load_requires_access_token() {
        let store = MemoryStore::new();
        assert!(Session::load(&store).is_none());

        store.set(USER_KEY, r#"{"username":"emilys"}"#).unwrap();
        assert!(Session::load(&store).is_none());

        store.set(ACCESS_TOKEN_KEY, "tok").unwrap();
        let session = Session::load(&store).unwrap();
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.display_name(), "emilys");
    }

    #[test]
    fn test_load_tolerates_corrupt_profile() {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, "{not json").unwrap();
        let session = Session::load(&store).unwrap();
        assert!(session.profile.is_empty());
        assert_eq!(session.display_name(), "User");
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(Session::from_login(login_response(Some("Emily"))).display_name(), "Emily");
        assert_eq!(Session::from_login(login_response(Some(""))).display_name(), "emilys");
        assert_eq!(Session::from_login(login_response(None)).display_name(), "emilys");
    }

    #[test]
    fn test_failed_persist_leaves_store_empty() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            ok_writes: Mutex::new(1),
        };
        let result = Session::from_login(login_response(None)).persist(&store);
        assert!(matches!(result, Err(ApiError::Storage(_))));
        assert!(store.inner.is_empty());
        assert!(Session::load(&store).is_none());
    }

    #[test]
    fn test_context_lifecycle() {
        let store = Arc::new(MemoryStore::new());
        let ctx = SessionContext::restore(store.clone());
        assert!(!ctx.is_authenticated_untracked());

        ctx.begin(login_response(Some("Emily"))).unwrap();
        assert!(ctx.is_authenticated_untracked());
        assert_eq!(ctx.access_token_untracked().as_deref(), Some("access"));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("access"));

        // A fresh context (page reload) sees the same session
        let reloaded = SessionContext::restore(store.clone());
        assert!(reloaded.is_authenticated_untracked());

        ctx.end();
        assert!(!ctx.is_authenticated_untracked());
        assert!(store.is_empty());
    }
}
