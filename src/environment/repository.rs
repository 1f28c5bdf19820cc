use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{from_slice, to_string_pretty};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// The fixed key the session token is stored under
pub const AUTH_TOKEN_KEY_NAME: &str = "six-cities-token";

/// Tokens older than this are considered gone
pub const TOKEN_RETENTION_DAYS: i64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
struct StoredToken {
    token: String,
    saved: DateTime<Utc>,
}

/// Persists the opaque session token. The token is cached in memory
/// and written through to a json file
#[derive(Clone)]
pub struct Repository {
    directory: Option<PathBuf>,
    token: Arc<Mutex<Option<StoredToken>>>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("directory", &self.directory)
            .finish()
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    /// Uses the platform config directory
    pub fn new() -> Self {
        Self::with_directory(data_directory())
    }

    /// Stores the token in `directory`, `None` keeps it in memory only
    pub fn with_directory(directory: Option<PathBuf>) -> Self {
        let token = directory
            .as_deref()
            .and_then(|dir| read::<StoredToken>(dir, &file_name()).ok().flatten());
        Self {
            directory,
            token: Arc::new(Mutex::new(token)),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_directory(None)
    }

    pub fn save_token(&self, token: &str) {
        self.store(Some(StoredToken {
            token: token.to_string(),
            saved: Utc::now(),
        }));
    }

    /// The stored token, or an empty string
    pub fn token(&self) -> String {
        let Ok(mut guard) = self.token.lock() else {
            log::error!("Token Data Error: poisoned");
            return String::new();
        };
        match guard.as_ref() {
            None => return String::new(),
            Some(stored) if !is_expired(stored, Utc::now()) => return stored.token.clone(),
            Some(_) => {}
        }
        // still locked, a concurrent save can not be lost
        log::debug!("Stored token expired, dropping it");
        *guard = None;
        self.persist(None);
        String::new()
    }

    pub fn has_token(&self) -> bool {
        !self.token().is_empty()
    }

    pub fn drop_token(&self) {
        self.store(None);
    }

    fn store(&self, value: Option<StoredToken>) {
        match self.token.lock() {
            Ok(mut guard) => {
                self.persist(value.as_ref());
                *guard = value;
            }
            Err(e) => log::error!("Token Data Error: {e:?}"),
        }
    }

    /// Mirror the token to disk. Callers hold the lock
    fn persist(&self, value: Option<&StoredToken>) {
        let Some(ref directory) = self.directory else {
            return;
        };
        let result = match value {
            Some(token) => write(directory, &file_name(), token),
            None => remove(directory, &file_name()),
        };
        if let Err(e) = result {
            log::error!("Could not save token: {e:?}");
        }
    }

    #[cfg(test)]
    fn backdate(&self, by: Duration) {
        if let Ok(mut guard) = self.token.lock() {
            if let Some(stored) = guard.as_mut() {
                stored.saved = stored.saved - by;
            }
        }
    }
}

fn is_expired(stored: &StoredToken, now: DateTime<Utc>) -> bool {
    now - stored.saved > Duration::days(TOKEN_RETENTION_DAYS)
}

fn file_name() -> String {
    format!("{AUTH_TOKEN_KEY_NAME}.json")
}

fn read<T: DeserializeOwned>(directory: &Path, name: &str) -> Result<Option<T>, String> {
    let data_path = directory.join(name);
    if !data_path.exists() {
        return Ok(None);
    };
    let data = std::fs::read(&data_path)
        .map_err(|e| format!("Could not read {}: {e:?}", data_path.display()))?;
    let obj: T =
        from_slice(&data).map_err(|e| format!("Could not parse {}: {e:?}", data_path.display()))?;
    Ok(Some(obj))
}

fn write<T: Serialize>(directory: &Path, name: &str, value: &T) -> Result<(), String> {
    if !directory.exists() {
        std::fs::create_dir_all(directory)
            .map_err(|e| format!("Could not create directory {}: {e:?}", directory.display()))?;
    }
    let data_path = directory.join(name);
    let data = to_string_pretty(&value).map_err(|e| format!("Could not parse value:{e:?}"))?;
    std::fs::write(&data_path, data)
        .map_err(|e| format!("Could not write to {}: {e:?}", data_path.display()))?;
    Ok(())
}

fn remove(directory: &Path, name: &str) -> Result<(), String> {
    let data_path = directory.join(name);
    if !data_path.exists() {
        return Ok(());
    }
    std::fs::remove_file(&data_path)
        .map_err(|e| format!("Could not remove {}: {e:?}", data_path.display()))
}

fn data_directory() -> Option<PathBuf> {
    use directories_next::ProjectDirs;
    let Some(proj_dirs) = ProjectDirs::from("com", "htmlacademy", "six-cities") else {
        log::error!("Couldn't find a folder to save data, keeping the token in memory");
        return None;
    };
    Some(proj_dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_without_token() {
        let repository = Repository::in_memory();
        assert_eq!(repository.token(), "");
        assert!(!repository.has_token());
    }

    #[test]
    fn persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::with_directory(Some(dir.path().to_path_buf()));
        repository.save_token("T2F1dGggdG9rZW4=");
        assert!(dir.path().join("six-cities-token.json").exists());

        let reopened = Repository::with_directory(Some(dir.path().to_path_buf()));
        assert_eq!(reopened.token(), "T2F1dGggdG9rZW4=");
    }

    #[test]
    fn drop_removes_the_file() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::with_directory(Some(dir.path().to_path_buf()));
        repository.save_token("abc");
        repository.drop_token();
        assert_eq!(repository.token(), "");
        assert!(!dir.path().join("six-cities-token.json").exists());
        // dropping twice is fine
        repository.drop_token();
    }

    #[test]
    fn expired_tokens_are_dropped() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::with_directory(Some(dir.path().to_path_buf()));
        repository.save_token("abc");
        repository.backdate(Duration::days(TOKEN_RETENTION_DAYS + 1));
        assert_eq!(repository.token(), "");
        assert!(!dir.path().join("six-cities-token.json").exists());
    }

    #[test]
    fn expired_token_does_not_erase_a_fresh_save() {
        let repository = Repository::in_memory();
        let cloned = repository.clone();
        repository.save_token("old");
        repository.backdate(Duration::days(TOKEN_RETENTION_DAYS + 1));
        assert_eq!(cloned.token(), "");
        cloned.save_token("fresh");
        assert_eq!(repository.token(), "fresh");
        assert!(repository.has_token());
    }

    #[test]
    fn clones_share_the_token() {
        let repository = Repository::in_memory();
        let cloned = repository.clone();
        repository.save_token("shared");
        assert_eq!(cloned.token(), "shared");
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("six-cities-token.json"), b"{not json").unwrap();
        let repository = Repository::with_directory(Some(dir.path().to_path_buf()));
        assert_eq!(repository.token(), "");
    }
}
