use serde::Serialize;
use stavba_store::AttendanceEntry;
use tracing::info;

use crate::error::Result;
use crate::events::{emit_event, AttendancePayload, EVENT_ATTENDANCE_CHANGED};
use crate::geo::GeolocationProvider;
use crate::state::{lock, AppState, SharedState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDto {
    pub id: i64,
    pub user_id: String,
    pub checkin_time: String,
    pub checkout_time: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// Minutes between check-in and check-out, once closed.
    pub worked_minutes: Option<i64>,
}

impl From<&AttendanceEntry> for AttendanceDto {
    fn from(e: &AttendanceEntry) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id.to_string(),
            checkin_time: e.checkin_time.to_rfc3339(),
            checkout_time: e.checkout_time.map(|t| t.to_rfc3339()),
            lat: e.location.lat,
            lng: e.location.lng,
            worked_minutes: e
                .checkout_time
                .map(|out| (out - e.checkin_time).num_minutes()),
        }
    }
}

/// Ask the device for a position, then record a check-in.
///
/// The state lock is not held while the position request is pending.
pub async fn check_in<G: GeolocationProvider>(
    state: &SharedState,
    geolocation: &G,
) -> Result<AttendanceDto> {
    lock(state)?.session.require_user()?;

    let position = geolocation.request_position().await;

    let mut guard = lock(state)?;
    let AppState { store, session, .. } = &mut *guard;
    let entry = store.check_in(session, position)?;

    info!(entry_id = entry.id, "Check-in recorded");
    emit_event(
        guard.event_sink(),
        EVENT_ATTENDANCE_CHANGED,
        AttendancePayload {
            user_id: entry.user_id.to_string(),
            checked_in: true,
        },
    );
    Ok(AttendanceDto::from(&entry))
}

/// Close today's latest open check-in.  `None` when there was nothing open.
pub fn check_out(state: &SharedState) -> Result<Option<AttendanceDto>> {
    let mut guard = lock(state)?;
    let AppState { store, session, .. } = &mut *guard;
    let Some(entry) = store.check_out(session)? else {
        return Ok(None);
    };

    emit_event(
        guard.event_sink(),
        EVENT_ATTENDANCE_CHANGED,
        AttendancePayload {
            user_id: entry.user_id.to_string(),
            checked_in: false,
        },
    );
    Ok(Some(AttendanceDto::from(&entry)))
}

/// Today's entries of the logged-in user.
pub fn today(state: &SharedState) -> Result<Vec<AttendanceDto>> {
    let guard = lock(state)?;
    let user = guard.session.require_user()?;
    Ok(guard
        .store
        .attendance_today(&user.id)?
        .iter()
        .map(AttendanceDto::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::auth::login;
    use crate::error::ClientError;
    use crate::geo::StaticPosition;
    use crate::state::test_support::in_memory_state;
    use chrono::Duration;
    use stavba_store::StoreError;

    #[tokio::test]
    async fn check_in_and_out_for_logged_in_worker() {
        let (state, clock) = in_memory_state();
        login(&state, "svoboda@stavba.cz".into(), "worker123".into()).unwrap();

        let entry = check_in(&state, &StaticPosition::at(50.0755, 14.4378))
            .await
            .unwrap();
        assert!(entry.checkout_time.is_none());
        assert_eq!(entry.user_id, "3");

        clock.advance(Duration::minutes(95));
        let closed = check_out(&state).unwrap().unwrap();
        assert_eq!(closed.id, entry.id);
        assert_eq!(closed.worked_minutes, Some(95));

        assert!(check_out(&state).unwrap().is_none());
        assert_eq!(today(&state).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unavailable_location_records_nothing() {
        let (state, _) = in_memory_state();
        login(&state, "svoboda@stavba.cz".into(), "worker123".into()).unwrap();

        let err = check_in(&state, &StaticPosition::unavailable("timeout"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Store(StoreError::LocationUnavailable(_))
        ));
        assert!(today(&state).unwrap().is_empty());
    }

    #[tokio::test]
    async fn check_in_requires_login() {
        let (state, _) = in_memory_state();
        let err = check_in(&state, &StaticPosition::at(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Store(StoreError::NotLoggedIn)));
    }
}
