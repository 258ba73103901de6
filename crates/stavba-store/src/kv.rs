//! Key-value persistence boundary.
//!
//! Values are UTF-8 JSON documents addressed by the keys in
//! [`stavba_shared::constants`].  Writes are grouped into batches that a
//! backend must apply all-or-nothing.

use std::collections::BTreeMap;

use crate::error::{StorageError, StorageResult};

/// One pending mutation of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvWrite {
    Set { key: String, value: String },
    Remove { key: String },
}

impl KvWrite {
    pub fn set(key: &str, value: String) -> Self {
        KvWrite::Set {
            key: key.to_string(),
            value,
        }
    }

    pub fn remove(key: &str) -> Self {
        KvWrite::Remove {
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            KvWrite::Set { key, .. } | KvWrite::Remove { key } => key,
        }
    }
}

pub trait KvStore: Send {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Apply every write or none of them.
    fn apply(&mut self, writes: Vec<KvWrite>) -> StorageResult<()>;

    fn set(&mut self, key: &str, value: String) -> StorageResult<()> {
        self.apply(vec![KvWrite::set(key, value)])
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.apply(vec![KvWrite::remove(key)])
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Volatile store, optionally limited to a byte quota the way browser
/// local storage is.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the summed size of keys and values to `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn footprint(entries: &BTreeMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, writes: Vec<KvWrite>) -> StorageResult<()> {
        let mut next = self.entries.clone();
        for write in writes {
            match write {
                KvWrite::Set { key, value } => {
                    next.insert(key, value);
                }
                KvWrite::Remove { key } => {
                    next.remove(&key);
                }
            }
        }

        if let Some(quota) = self.quota {
            let needed = Self::footprint(&next);
            if needed > quota {
                tracing::warn!(needed, quota, "memory store quota exceeded");
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        self.entries = next;
        Ok(())
    }
}
