use serde::{Serialize, Serializer};
use stavba_shared::CalcError;
use stavba_store::StoreError;
use thiserror::Error;

/// Error surfaced to the presentation layer.  Serializes as its display
/// message.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("Application state lock poisoned")]
    LockPoisoned,
}

impl Serialize for ClientError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
