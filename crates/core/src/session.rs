//! Persisted session state and role resolution.
//!
//! A [`SessionStore`] is the client's small key/value store (the browser's
//! local storage in the original front end). Everything that gates rendering
//! or attaches auth headers reads it through the typed accessors here rather
//! than poking at raw keys.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::CoreError;
use crate::roles::Role;
use crate::token;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

pub const KEY_ACCESS_TOKEN: &str = "ak_access";
pub const KEY_ID_TOKEN: &str = "ak_id";
pub const KEY_REFRESH_TOKEN: &str = "ak_refresh";
pub const KEY_USER_ID: &str = "userId";
/// JSON-serialized list of group names.
pub const KEY_GROUPS: &str = "groups";

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// String key/value storage shared by every page of one client.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

/// Volatile store, used by tests and one-shot commands.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        lock(&self.entries).remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        lock(&self.entries).clear();
        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk.
///
/// Every mutation rewrites the whole file through a sibling temp file and a
/// rename, so a crash never leaves a half-written session behind.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty session. An unreadable or malformed file is
    /// also treated as an empty session; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Discarding malformed session file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Session file unreadable");
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage_error)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| CoreError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(storage_error)?;
        std::fs::rename(&tmp, &self.path).map_err(storage_error)?;
        Ok(())
    }

    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), CoreError> {
        let mut entries = lock(&self.entries);
        f(&mut entries);
        self.persist(&entries)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.mutate(|m| {
            m.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.mutate(|m| {
            m.remove(key);
        })
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.mutate(|m| m.clear())
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn storage_error(e: std::io::Error) -> CoreError {
    CoreError::Storage(e.to_string())
}

// ---------------------------------------------------------------------------
// Typed session view
// ---------------------------------------------------------------------------

/// Tokens returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

/// Snapshot of the persisted session, read on page mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    /// Access token sent as the bearer credential, if logged in.
    pub raw_token: Option<String>,
    pub user_id: Option<DbId>,
}

impl Session {
    pub fn load(store: &dyn SessionStore) -> Self {
        Self {
            role: resolve_role(store),
            raw_token: access_token(store),
            user_id: user_id(store),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            role: Role::Anonymous,
            raw_token: None,
            user_id: None,
        }
    }
}

/// Persist a freshly issued login: tokens, numeric user id and group list.
///
/// Groups and user id come from the id token's claims when it decodes. An
/// explicit `user_id` wins over the claim-derived one.
pub fn store_login(
    store: &dyn SessionStore,
    tokens: &SessionTokens,
    user_id: Option<DbId>,
) -> Result<Role, CoreError> {
    store.set(KEY_ACCESS_TOKEN, &tokens.access_token)?;
    store.set(KEY_ID_TOKEN, &tokens.id_token)?;
    store.set(KEY_REFRESH_TOKEN, &tokens.refresh_token)?;

    let claims = match token::decode_claims(&tokens.id_token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::warn!(error = %e, "Id token payload could not be decoded");
            None
        }
    };

    let groups = claims.as_ref().map(|c| c.groups.clone()).unwrap_or_default();
    let groups_json =
        serde_json::to_string(&groups).map_err(|e| CoreError::Storage(e.to_string()))?;
    store.set(KEY_GROUPS, &groups_json)?;

    match user_id.or_else(|| claims.as_ref().and_then(|c| c.user_id())) {
        Some(id) => store.set(KEY_USER_ID, &id.to_string())?,
        None => store.remove(KEY_USER_ID)?,
    }

    Ok(Role::from_groups(&groups))
}

/// Destroy the session.
pub fn clear_session(store: &dyn SessionStore) -> Result<(), CoreError> {
    store.clear()
}

pub fn access_token(store: &dyn SessionStore) -> Option<String> {
    store.get(KEY_ACCESS_TOKEN).filter(|t| !t.trim().is_empty())
}

/// Numeric user id; a non-numeric stored value reads as absent.
pub fn user_id(store: &dyn SessionStore) -> Option<DbId> {
    store.get(KEY_USER_ID).and_then(|v| v.trim().parse().ok())
}

/// Classify the stored session.
///
/// Reads the persisted group list first, falling back to the id token's
/// group claim. Malformed data of either kind resolves to
/// [`Role::Anonymous`]; this function never fails.
pub fn resolve_role(store: &dyn SessionStore) -> Role {
    if let Some(raw) = store.get(KEY_GROUPS) {
        return match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(groups) => Role::from_groups(&groups),
            Err(e) => {
                tracing::debug!(error = %e, "Stored groups are malformed; treating as anonymous");
                Role::Anonymous
            }
        };
    }

    match store.get(KEY_ID_TOKEN) {
        Some(id_token) => token::decode_claims(&id_token)
            .map(|c| c.role())
            .unwrap_or(Role::Anonymous),
        None => Role::Anonymous,
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Outcome of one-shot role resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Loading,
    Resolved(Role),
}

/// Derives the current role once per mount.
///
/// Starts in [`Resolution::Loading`]; the navigation shell must not render
/// anything until [`SessionResolver::resolve`] has run.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    state: Resolution,
}

impl Default for SessionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionResolver {
    pub fn new() -> Self {
        Self {
            state: Resolution::Loading,
        }
    }

    /// Resolve the role from the store. Later calls return the first result;
    /// re-resolution requires a new resolver (a remount).
    pub fn resolve(&mut self, store: &dyn SessionStore) -> Role {
        match self.state {
            Resolution::Resolved(role) => role,
            Resolution::Loading => {
                let role = resolve_role(store);
                tracing::debug!(role = %role, "Session role resolved");
                self.state = Resolution::Resolved(role);
                role
            }
        }
    }

    pub fn state(&self) -> Resolution {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, Resolution::Loading)
    }

    /// The resolved role, or `None` while still loading.
    pub fn role(&self) -> Option<Role> {
        match self.state {
            Resolution::Loading => None,
            Resolution::Resolved(role) => Some(role),
        }
    }
}
