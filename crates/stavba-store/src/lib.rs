//! # stavba-store
//!
//! Local persistence for the Stavba site application.
//!
//! Every collection is one JSON document in a key-value backend ([`SqliteKv`]
//! on disk, [`MemoryKv`] for tests and fallbacks).  [`DomainStore`] layers the
//! typed entities, seeding rules and mutators on top, with each mutation
//! committed as a single atomic batch.

pub mod attendance;
pub mod audit;
pub mod backup;
pub mod chat;
pub mod dashboard;
pub mod database;
pub mod kv;
pub mod migrations;
pub mod models;
pub mod projects;
pub mod records;
pub mod seed;
pub mod session;
pub mod settings;
pub mod store;
pub mod users;

mod error;

pub use backup::{BackupPayload, ImportStats};
pub use dashboard::DashboardStats;
pub use database::SqliteKv;
pub use error::{StorageError, StoreError};
pub use kv::{KvStore, KvWrite, MemoryKv};
pub use models::*;
pub use session::Session;
pub use store::DomainStore;
