//! Session credential storage
//!
//! The client holds exactly one piece of state: the opaque token returned by
//! a successful login. Services reach it through a [`SessionStore`] so callers
//! decide where it lives (memory, a file on disk, or nowhere at all).

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{Error, Result};

/// Storage for the session credential.
///
/// Implementations never fail loudly: storage problems read as "no credential".
pub trait SessionStore: Send + Sync {
    /// The stored credential, if any
    fn get(&self) -> Option<String>;

    /// Store a credential, replacing any previous one
    fn set(&self, token: &str);

    /// Remove the stored credential
    fn clear(&self);
}

/// In-process credential storage
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a credential
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    fn set(&self, token: &str) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_string());
    }

    fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

/// Storage for contexts without persistence: nothing is ever held.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSessionStore;

impl SessionStore for NullSessionStore {
    fn get(&self) -> Option<String> {
        None
    }

    fn set(&self, _token: &str) {}

    fn clear(&self) {}
}

/// Credential storage backed by a JSON key/value file.
///
/// The file may hold other keys; only the configured one is touched.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    key: String,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Create a store for `path`, keeping the credential under `key`
    pub fn new(path: impl Into<PathBuf>, key: &str) -> Self {
        Self {
            path: path.into(),
            key: key.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    /// The backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    // The file holds a bearer credential: it is written owner-only (0600 on
    // unix) and replaced by rename, so readers never see a partial write.
    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&serde_json::to_vec_pretty(entries)?)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        // a corrupt file is replaced rather than blocking the write
        let mut entries = self.load().unwrap_or_default();
        apply(&mut entries);
        self.save(&entries)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        match self.load() {
            Ok(entries) => entries.get(&self.key).cloned(),
            Err(err) => {
                warn!("Failed to read session file {}: {}", self.path.display(), err);
                None
            }
        }
    }

    fn set(&self, token: &str) {
        let key = self.key.clone();
        let token = token.to_string();
        if let Err(err) = self.update(move |entries| {
            entries.insert(key, token);
        }) {
            warn!("Failed to write session file {}: {}", self.path.display(), err);
        }
    }

    fn clear(&self) {
        if !self.path.exists() {
            return;
        }
        let key = self.key.clone();
        if let Err(err) = self.update(move |entries| {
            entries.remove(&key);
        }) {
            warn!("Failed to write session file {}: {}", self.path.display(), err);
        }
    }
}

/// Claims carried by a session credential issued by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The user ID
    #[serde(default)]
    pub user_id: Option<String>,

    /// The user's email address
    #[serde(default)]
    pub email: Option<String>,

    /// The token issuer
    #[serde(default)]
    pub iss: Option<String>,

    /// The token subject
    #[serde(default)]
    pub sub: Option<String>,

    /// The expiry timestamp (seconds since the epoch)
    #[serde(default)]
    pub exp: Option<i64>,

    /// The issue timestamp (seconds since the epoch)
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Decode the claims of a credential without verifying its signature.
    ///
    /// Only the server can tell whether a credential is valid; this is for
    /// display purposes.
    pub fn decode(token: &str) -> Result<Self> {
        let header = jsonwebtoken::decode_header(token)?;
        let mut validation = Validation::new(header.alg);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(&[]),
            &validation,
        )
        .map_err(|e| Error::session(format!("undecodable credential: {}", e)))?;

        Ok(data.claims)
    }

    /// Check if the credential has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.exp {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::from_secs(0))
                .as_secs() as i64;

            now >= expires_at
        } else {
            false
        }
    }
}
