//! File-based credential store.
//!
//! The session token lives in a small JSON file, by default under the
//! platform data directory:
//! ```json
//! {
//!   "schema_version": 1,
//!   "access_token": "..."
//! }
//! ```
//! Writes go to a temporary sibling file that is then renamed over the
//! target, so readers never observe a half-written token.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use gigboard_application::ports::{CredentialStore, CredentialStoreError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable overriding the credentials file location.
pub const ENV_CREDENTIALS_PATH: &str = "GIGBOARD_CREDENTIALS_PATH";

const SCHEMA_VERSION: u32 = 1;
const FILE_NAME: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
struct CredentialsFile {
    schema_version: u32,
    access_token: String,
}

/// Credential store persisting the token to a file.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes writers within the process; the rename keeps each write
    // atomic for readers.
    lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Creates a store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the default credentials file: `GIGBOARD_CREDENTIALS_PATH` if
    /// set, otherwise `<data dir>/gigboard/session.json`.
    #[must_use]
    pub fn default_location() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(ENV_CREDENTIALS_PATH) {
            return Some(PathBuf::from(path));
        }
        dirs::data_dir().map(|p| p.join("gigboard").join(FILE_NAME))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomically(&self, contents: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let mut file = open_private(&temp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp, &self.path)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: CredentialsFile = serde_json::from_slice(&contents).map_err(|e| {
            CredentialStoreError::Backend(format!(
                "corrupt credentials file {}: {e}",
                self.path.display()
            ))
        })?;
        if file.schema_version != SCHEMA_VERSION {
            return Err(CredentialStoreError::Backend(format!(
                "unsupported credentials schema version {}",
                file.schema_version
            )));
        }

        Ok(Some(file.access_token).filter(|token| !token.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), CredentialStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let contents = serde_json::to_vec_pretty(&CredentialsFile {
            schema_version: SCHEMA_VERSION,
            access_token: token.to_string(),
        })
        .map_err(|e| CredentialStoreError::Backend(e.to_string()))?;

        self.write_atomically(&contents)?;
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    fn delete(&self) -> Result<(), CredentialStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session token deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
