//! Application state shared across all commands.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` by the presentation
//! host so that every command handler can access it.  It is the explicit
//! context object: the store, the session and the configuration travel
//! together instead of living in globals.

use std::sync::{Arc, Mutex, MutexGuard};

use stavba_shared::Clock;
use stavba_store::{DomainStore, KvStore, MemoryKv, Session, SqliteKv, StorageError};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::EventSink;

pub type SharedState = Arc<Mutex<AppState>>;

/// Central application state.
pub struct AppState {
    /// Persisted collections.
    pub store: DomainStore,

    /// Logged-in user, loaded from storage at bootstrap.
    pub session: Session,

    pub config: ClientConfig,

    /// Where UI notifications go.  `None` when nobody listens.
    pub events: Option<Arc<dyn EventSink>>,
}

impl AppState {
    /// Open storage, seed defaults and restore the session.
    ///
    /// Never fails: storage problems are logged and the application continues
    /// on a fresh in-memory store.
    pub fn bootstrap(config: ClientConfig, clock: Arc<dyn Clock>) -> Self {
        let backend = open_backend(&config).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to open database, continuing in memory");
            Box::new(MemoryKv::new()) as Box<dyn KvStore>
        });
        let mut store = DomainStore::from_boxed(backend, clock.clone());

        if config.seed_defaults {
            if let Err(e) = store.seed_defaults() {
                tracing::warn!(error = %e, "Seeding failed, continuing with in-memory defaults");
                store = DomainStore::new(MemoryKv::new(), clock);
                if let Err(e) = store.seed_defaults() {
                    tracing::error!(error = %e, "Seeding the in-memory store failed");
                }
            }
        }

        let session = store.load_session().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored session unreadable, starting logged out");
            Session::anonymous()
        });

        if let Some(user) = session.current_user() {
            tracing::info!(user_id = %user.id, "Restored session");
        }

        Self {
            store,
            session,
            config,
            events: None,
        }
    }

    pub fn with_events(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = Some(sink);
        self
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    pub(crate) fn event_sink(&self) -> Option<&dyn EventSink> {
        self.events.as_deref()
    }

    /// Persist the session before the process exits.
    pub fn shutdown(&mut self) -> Result<()> {
        self.store.save_session(&self.session)?;
        tracing::info!("State saved");
        Ok(())
    }
}

fn open_backend(config: &ClientConfig) -> std::result::Result<Box<dyn KvStore>, StorageError> {
    if config.in_memory {
        tracing::info!("Using in-memory storage");
        return Ok(Box::new(MemoryKv::new()));
    }

    let kv = match &config.db_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            tracing::info!(path = %path.display(), "opening database");
            SqliteKv::open_at(path)?
        }
        None => SqliteKv::open_default()?,
    };
    Ok(Box::new(kv))
}

/// Lock the shared state, mapping poisoning to [`ClientError::LockPoisoned`].
pub fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>> {
    state.lock().map_err(|_| ClientError::LockPoisoned)
}
