use crate::error::StorageError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Key/value persistence behind the journal.
pub trait Storage {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a key that does not exist succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Unavailable {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_failed = |source: std::io::Error| StorageError::WriteFailed {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_failed)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_failed)?;
        tmp.write_all(value.as_bytes()).map_err(write_failed)?;
        tmp.as_file().sync_all().map_err(write_failed)?;
        tmp.persist(self.key_path(key))
            .map_err(|err| write_failed(err.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::WriteFailed {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_storage_roundtrip_and_remove() {
        let tmp = tempdir().expect("tempdir");
        let storage = FileStorage::new(tmp.path().join("journal"));

        assert_eq!(storage.read("wildwatch_entries").expect("read"), None);
        storage.write("wildwatch_entries", "[]").expect("write");
        assert_eq!(
            storage.read("wildwatch_entries").expect("read"),
            Some("[]".to_string())
        );
        assert!(storage.key_path("wildwatch_entries").exists());

        storage.remove("wildwatch_entries").expect("remove");
        assert_eq!(storage.read("wildwatch_entries").expect("read"), None);
        storage.remove("wildwatch_entries").expect("remove missing");
    }

    #[test]
    fn file_storage_overwrites_in_place() {
        let tmp = tempdir().expect("tempdir");
        let storage = FileStorage::new(tmp.path());
        storage.write("k", "first").expect("write");
        storage.write("k", "second").expect("write");
        assert_eq!(storage.read("k").expect("read"), Some("second".to_string()));

        let files = fs::read_dir(tmp.path()).expect("read dir").count();
        assert_eq!(files, 1);
    }
}
