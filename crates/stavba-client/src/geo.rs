//! Device position lookup used by check-in.

use std::future::Future;

use stavba_shared::Coordinate;

/// Single-shot position request.  The future resolves to the coordinate or a
/// human-readable reason; there is no timeout.
pub trait GeolocationProvider: Send + Sync {
    fn request_position(&self) -> impl Future<Output = Result<Coordinate, String>> + Send;
}

/// Provider answering every request with the same outcome.  Used for fixed
/// installations (site office terminals) and tests.
#[derive(Debug, Clone)]
pub struct StaticPosition(pub Result<Coordinate, String>);

impl StaticPosition {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self(Ok(Coordinate::new(lat, lng)))
    }

    pub fn unavailable(reason: &str) -> Self {
        Self(Err(reason.to_string()))
    }
}

impl GeolocationProvider for StaticPosition {
    fn request_position(&self) -> impl Future<Output = Result<Coordinate, String>> + Send {
        std::future::ready(self.0.clone())
    }
}
