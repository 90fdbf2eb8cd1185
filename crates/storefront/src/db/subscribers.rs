//! JSON-file backed [`ListStore`].
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes go to a sibling temp file
//! that is then renamed over the target, so readers never observe a partial
//! list.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cafe_artesano_core::ListStore;

use super::RepositoryError;

/// A [`ListStore`] that keeps each list in its own JSON file.
#[derive(Debug)]
pub struct JsonListStore {
    dir: PathBuf,
    /// Serializes file access.
    io: Mutex<()>,
    /// Held across a read-modify-write sequence such as a subscription.
    updates: Mutex<()>,
}

impl JsonListStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            io: Mutex::new(()),
            updates: Mutex::new(()),
        }
    }

    /// Directory holding the list files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Block other read-modify-write sequences until the guard drops.
    ///
    /// `read_list` and `write_list` are individually atomic; callers that
    /// read, change, and write back a list hold this guard so two concurrent
    /// updates cannot lose each other's entries.
    ///
    /// The guard is per store value and therefore per process. A second
    /// process writing the same directory (such as `ca-cli subscribers add`
    /// while the storefront runs) is not excluded and can overwrite an entry
    /// added in between. Share one store, or stop the server, for offline
    /// edits.
    pub fn lock_updates(&self) -> MutexGuard<'_, ()> {
        self.updates.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, RepositoryError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl ListStore for JsonListStore {
    type Error = RepositoryError;

    fn read_list(&self, key: &str) -> Result<Vec<String>, Self::Error> {
        let path = self.path_for(key)?;
        let _guard = self.io.lock().unwrap_or_else(PoisonError::into_inner);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::DataCorruption(format!("{}: {e}", path.display()))
        })
    }

    fn write_list(&self, key: &str, values: &[String]) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        let json = serde_json::to_vec_pretty(values)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        let _guard = self.io.lock().unwrap_or_else(PoisonError::into_inner);
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        tracing::debug!(key, count = values.len(), "List written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cafe_artesano_core::{SUBSCRIBERS_KEY, SubscribeOutcome, subscribe};

    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonListStore::new(dir.path().join("not-yet-created"));
        assert!(store.read_list(SUBSCRIBERS_KEY).unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonListStore::new(dir.path());
        let values = vec!["ana@example.com".to_string(), "luis@example.com".to_string()];

        store.write_list(SUBSCRIBERS_KEY, &values).unwrap();

        assert_eq!(store.read_list(SUBSCRIBERS_KEY).unwrap(), values);
        assert!(dir.path().join("newsletter-subscribers.json").exists());
        assert!(!dir.path().join("newsletter-subscribers.json.tmp").exists());
    }

    #[test]
    fn test_rewrite_replaces_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonListStore::new(dir.path());
        store
            .write_list("tags", &["a".to_string(), "b".to_string()])
            .unwrap();
        store.write_list("tags", &["c".to_string()]).unwrap();

        assert_eq!(store.read_list("tags").unwrap(), vec!["c"]);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), b"{not json").unwrap();
        let store = JsonListStore::new(dir.path());

        assert!(matches!(
            store.read_list("broken"),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonListStore::new(dir.path());

        for key in ["", "../escape", "a/b", "with space"] {
            assert!(matches!(
                store.read_list(key),
                Err(RepositoryError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_subscribe_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let first = JsonListStore::new(dir.path());
        let outcome = subscribe(&first, "Ana@Example.com").unwrap();
        assert!(matches!(outcome, SubscribeOutcome::Subscribed(_)));

        let second = JsonListStore::new(dir.path());
        let outcome = subscribe(&second, "ana@example.com").unwrap();
        assert!(matches!(outcome, SubscribeOutcome::AlreadySubscribed(_)));
        assert_eq!(
            second.read_list(SUBSCRIBERS_KEY).unwrap(),
            vec!["ana@example.com"]
        );
    }

    #[test]
    fn test_concurrent_subscriptions_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(JsonListStore::new(dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    let _updating = store.lock_updates();
                    subscribe(&*store, &format!("reader{n}@example.com")).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert!(matches!(handle.join().unwrap(), SubscribeOutcome::Subscribed(_)));
        }

        assert_eq!(store.read_list(SUBSCRIBERS_KEY).unwrap().len(), 8);
    }
}
