use crate::error::StorageError;
use crate::wildwatch::entry::JournalEntry;
use crate::wildwatch::storage::Storage;
use crate::wildwatch::warn;

/// Append-only journal persisted as one JSON array under a single key.
///
/// Reads never fail: missing or unreadable data is an empty journal. Writes
/// return their outcome so callers can tell the user.
pub struct JournalStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> JournalStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read_strict(&self) -> Result<Vec<JournalEntry>, StorageError> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: self.key.clone(),
            source,
        })
    }

    /// Entries in insertion order.
    pub fn load(&self) -> Vec<JournalEntry> {
        match self.read_strict() {
            Ok(entries) => entries,
            Err(err) => {
                warn::emit(
                    err.code(),
                    "journal",
                    "load",
                    &self.key,
                    "degraded to empty journal",
                    &err.to_string(),
                );
                Vec::new()
            }
        }
    }

    /// Entries for display, most recent first.
    pub fn newest_first(&self) -> Vec<JournalEntry> {
        let mut entries = self.load();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// Read, append, write back the whole collection. A journal that cannot be
    /// read is left untouched rather than overwritten.
    pub fn append(&self, entry: JournalEntry) -> Result<(), StorageError> {
        let result = self.append_inner(entry);
        if let Err(err) = &result {
            warn::emit(
                err.code(),
                "journal",
                "append",
                &self.key,
                "entry not recorded",
                &err.to_string(),
            );
        }
        result
    }

    fn append_inner(&self, entry: JournalEntry) -> Result<(), StorageError> {
        let mut entries = self.read_strict()?;
        if entries.iter().any(|existing| existing.id == entry.id) {
            return Err(StorageError::DuplicateEntry(entry.id));
        }
        entries.push(entry);
        let data = serde_json::to_string_pretty(&entries)?;
        self.storage.write(&self.key, &format!("{data}\n"))
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        let result = self.storage.remove(&self.key);
        if let Err(err) = &result {
            warn::emit(
                err.code(),
                "journal",
                "clear",
                &self.key,
                "journal not cleared",
                &err.to_string(),
            );
        }
        result
    }
}
