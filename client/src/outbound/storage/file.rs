//! Key-value storage persisted as one JSON object on disk.
//!
//! The file is rewritten whole on every mutation, via a sibling temporary
//! file and a rename, so a crash mid-write leaves the previous contents in
//! place. File access goes through `cap_std` directory handles.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

type Entries = BTreeMap<String, String>;

/// `KeyValueStore` persisted to a JSON file that survives restarts.
pub struct JsonFileKeyValueStore {
    directory: Dir,
    file_name: PathBuf,
    temp_name: PathBuf,
    path: PathBuf,
    lock: Mutex<()>,
}

impl std::fmt::Debug for JsonFileKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileKeyValueStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl JsonFileKeyValueStore {
    /// Open (without creating) the store file at `path`.
    ///
    /// Missing parent directories are created; the file itself appears on
    /// the first write.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Io`] when the parent directory cannot be
    /// created or opened, or when `path` has no file name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KeyValueStoreError> {
        let path = path.as_ref();
        let file_name = path.file_name().ok_or_else(|| {
            KeyValueStoreError::io(format!("{} has no file name", path.display()))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|error| io_error(parent, &error))?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|error| io_error(parent, &error))?;

        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        Ok(Self {
            directory,
            file_name: PathBuf::from(file_name),
            temp_name: PathBuf::from(temp_name),
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, KeyValueStoreError> {
        match self.directory.read_to_string(&self.file_name) {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|error| {
                KeyValueStoreError::corrupt(format!("{}: {error}", self.path.display()))
            }),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(error) => Err(io_error(&self.path, &error)),
        }
    }

    fn save(&self, entries: &Entries) -> Result<(), KeyValueStoreError> {
        let encoded = serde_json::to_vec_pretty(entries).map_err(|error| {
            KeyValueStoreError::corrupt(format!("encode {}: {error}", self.path.display()))
        })?;
        self.directory
            .write(&self.temp_name, encoded)
            .map_err(|error| io_error(&self.path, &error))?;
        self.directory
            .rename(&self.temp_name, &self.directory, &self.file_name)
            .map_err(|error| io_error(&self.path, &error))?;
        debug!(path = %self.path.display(), keys = entries.len(), "storage file written");
        Ok(())
    }

    fn update(&self, mutate: impl FnOnce(&mut Entries) -> bool) -> Result<(), KeyValueStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        if mutate(&mut entries) {
            self.save(&entries)?;
        }
        Ok(())
    }
}

fn io_error(path: &Path, error: &std::io::Error) -> KeyValueStoreError {
    KeyValueStoreError::io(format!("{}: {error}", path.display()))
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Persistence coverage using temporary directories.

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[rstest]
    fn values_survive_reopening(temp_dir: TempDir) {
        let path = temp_dir.path().join("state").join("session.json");
        {
            let store = JsonFileKeyValueStore::open(&path).expect("open store");
            store.set("token", "abc").expect("set token");
            store.set("user_id", "1").expect("set user id");
            store.remove("user_id").expect("remove user id");
        }

        let reopened = JsonFileKeyValueStore::open(&path).expect("reopen store");
        assert_eq!(reopened.get("token").expect("get").as_deref(), Some("abc"));
        assert_eq!(reopened.get("user_id").expect("get"), None);
    }

    #[rstest]
    fn missing_file_reads_as_empty(temp_dir: TempDir) {
        let store =
            JsonFileKeyValueStore::open(temp_dir.path().join("absent.json")).expect("open store");
        assert_eq!(store.get("token").expect("get"), None);
        store.remove("token").expect("remove on empty store");
    }

    #[rstest]
    fn unparseable_file_is_reported_corrupt(temp_dir: TempDir) {
        let path = temp_dir.path().join("broken.json");
        let store = JsonFileKeyValueStore::open(&path).expect("open store");
        store.set("token", "abc").expect("seed file");
        store
            .directory
            .write(&store.file_name, b"{not json")
            .expect("overwrite file");

        let err = store.get("token").expect_err("corrupt file");
        assert!(matches!(err, KeyValueStoreError::Corrupt { .. }));
    }
}
