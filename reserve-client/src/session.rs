//! Session context
//!
//! The signed-in [`Principal`] lives in an explicit [`SessionContext`] that
//! every collaborator call receives. Persistence sits behind
//! [`SessionStore`] so the CLI keeps the session in a JSON file and tests
//! keep it in memory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use shared::{Principal, Role};

use crate::{ClientError, ClientResult};

/// Where a principal survives between runs
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    fn load(&self) -> ClientResult<Option<Principal>>;
    fn save(&self, principal: &Principal) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Principal>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<Principal>> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, principal: &Principal) -> ClientResult<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(principal.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// 会话文件存储 (JSON)
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    /// A missing file is no session; an unreadable one is discarded
    fn load(&self) -> ClientResult<Option<Principal>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&json) {
            Ok(principal) => Ok(Some(principal)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding unreadable session file"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, principal: &Principal) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(principal)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// The current principal plus the store that persists it
#[derive(Debug)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Principal>>,
}

impl SessionContext {
    /// Empty session backed by `store`; nothing is read from it
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Session holding whatever `store` persisted last
    pub fn restore(store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let principal = store.load()?;
        if let Some(p) = &principal {
            tracing::debug!(user = %p.name, role = %p.role, "Session restored");
        }
        Ok(Self {
            store,
            current: RwLock::new(principal),
        })
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    pub fn principal(&self) -> Option<Principal> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|p| p.role)
    }

    pub fn require_principal(&self) -> ClientResult<Principal> {
        self.principal().ok_or(ClientError::Unauthenticated)
    }

    /// Bearer token for the next request
    pub fn credential(&self) -> ClientResult<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|p| p.access_token.clone())
            .ok_or(ClientError::Unauthenticated)
    }

    /// Replace the principal and persist it
    pub fn sign_in(&self, principal: Principal) -> ClientResult<()> {
        self.store.save(&principal)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(principal);
        Ok(())
    }

    pub fn sign_out(&self) -> ClientResult<()> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.store.clear()
    }
}
