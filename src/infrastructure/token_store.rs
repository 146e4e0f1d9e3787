// Token store implementations (JSON session file, in-memory)
use crate::application::token_store::{StoreError, TokenStore};
use crate::domain::credential::Credential;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(rename = "authUser", default, skip_serializing_if = "Option::is_none")]
    auth_user: Option<String>,
}

/// Session file holding `authToken` and `authUser`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        let session = PersistedSession {
            auth_token: Some(credential.token.clone()),
            auth_user: Some(credential.username.clone()),
        };
        let contents = serde_json::to_vec_pretty(&session)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Both keys land in one rename.
        let tmp = self.path.with_extension("tmp");
        if let Err(e) = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!("Saved session for {} to {}", credential.username, self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Credential>, StoreError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session: PersistedSession = serde_json::from_slice(&contents)?;
        match (session.auth_token, session.auth_user) {
            (Some(token), Some(username)) if !token.is_empty() => {
                Ok(Some(Credential::new(token, username)))
            }
            _ => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session that ends with the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    credential: Mutex<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.credential.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self
            .credential
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.credential.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().unwrap(), None);

        store.save(&Credential::new("abc123", "alice")).unwrap();
        assert_eq!(store.load().unwrap(), Some(Credential::new("abc123", "alice")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_uses_browser_storage_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        store.save(&Credential::new("abc123", "alice")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["authToken"], "abc123");
        assert_eq!(raw["authUser"], "alice");
    }

    #[test]
    fn test_file_store_requires_both_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileTokenStore::new(&path);

        fs::write(&path, r#"{"authToken": "abc123"}"#).unwrap();
        assert_eq!(store.load().unwrap(), None);

        fs::write(&path, r#"{"authToken": "", "authUser": "alice"}"#).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileTokenStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Format(_)));
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::create_dir_all(path.join("keep")).unwrap();
        let store = FileTokenStore::new(&path);

        let err = store.save(&Credential::new("abc123", "alice")).unwrap_err();

        assert!(matches!(err, StoreError::Io(_)));
        assert!(!dir.path().join("session.tmp").exists());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load().unwrap(), None);

        store.save(&Credential::new("t", "bob")).unwrap();
        assert_eq!(store.load().unwrap(), Some(Credential::new("t", "bob")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
