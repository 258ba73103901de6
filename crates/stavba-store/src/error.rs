use stavba_shared::ParseError;
use thiserror::Error;

/// Faults of the underlying key-value persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document is not valid JSON for its collection.
    #[error("Corrupt document under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The write would exceed the configured storage quota.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Errors produced by domain store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("A user with email {0} already exists")]
    DuplicateUser(String),

    /// A required registration / project field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Record not found")]
    NotFound,

    #[error("Invalid value: {0}")]
    Invalid(#[from] ParseError),

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] StorageError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Result of raw key-value operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
