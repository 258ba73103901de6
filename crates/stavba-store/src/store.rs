//! The [`DomainStore`]: typed access to every persisted collection.
//!
//! All mutators follow the same shape: read the collections they touch, build
//! the new documents in memory, then hand every write to the backend as one
//! batch.  A failure anywhere before the commit leaves storage untouched.
//!
//! Callers must serialise access (`&mut self` on every mutator); the
//! read-modify-write sequences are not safe against a second writer on the
//! same backend.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use stavba_shared::Clock;

use crate::error::{Result, StorageError};
use crate::kv::{KvStore, KvWrite};

pub struct DomainStore {
    kv: Box<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl DomainStore {
    pub fn new(kv: impl KvStore + 'static, clock: Arc<dyn Clock>) -> Self {
        Self::from_boxed(Box::new(kv), clock)
    }

    /// Build on a backend chosen at runtime.
    pub fn from_boxed(kv: Box<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Raw backend access, mainly for inspection in tests and tooling.
    pub fn kv(&self) -> &dyn KvStore {
        self.kv.as_ref()
    }

    // ------------------------------------------------------------------
    // Document helpers
    // ------------------------------------------------------------------

    pub(crate) fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Load a collection, treating an absent key as empty.
    pub(crate) fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    pub(crate) fn write<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<KvWrite> {
        let json = serde_json::to_string(value).map_err(StorageError::Serialize)?;
        Ok(KvWrite::set(key, json))
    }

    pub(crate) fn commit(&mut self, writes: Vec<KvWrite>) -> Result<()> {
        self.kv.apply(writes)?;
        Ok(())
    }
}
