//! GPS check-in / check-out.
//!
//! Repeated check-ins are accepted and produce several open entries; check-out
//! always closes the most recent open entry of the day.

use stavba_shared::constants::KEY_ATTENDANCE;
use stavba_shared::types::next_time_id;
use stavba_shared::{Coordinate, UserId};

use crate::error::{Result, StoreError};
use crate::models::{AttendanceEntry, AttendanceKind};
use crate::session::Session;
use crate::store::DomainStore;

impl DomainStore {
    pub fn attendance(&self) -> Result<Vec<AttendanceEntry>> {
        self.load_list(KEY_ATTENDANCE)
    }

    /// Today's entries of one user, in insertion order.
    pub fn attendance_today(&self, user_id: &UserId) -> Result<Vec<AttendanceEntry>> {
        let clock = self.clock();
        Ok(self
            .attendance()?
            .into_iter()
            .filter(|e| &e.user_id == user_id && clock.is_today(e.date))
            .collect())
    }

    /// The entry a check-out would close, if any.
    pub fn open_entry_today(&self, user_id: &UserId) -> Result<Option<AttendanceEntry>> {
        Ok(self
            .attendance_today(user_id)?
            .into_iter()
            .filter(AttendanceEntry::is_open)
            .max_by_key(|e| e.checkin_time))
    }

    /// Record a check-in for the session user at `position`.  A failed
    /// position lookup writes nothing.
    pub fn check_in(
        &mut self,
        session: &Session,
        position: std::result::Result<Coordinate, String>,
    ) -> Result<AttendanceEntry> {
        let user = session.require_user()?;
        let location = position.map_err(|reason| {
            tracing::warn!(user_id = %user.id, %reason, "check-in without location");
            StoreError::LocationUnavailable(reason)
        })?;

        let now = self.clock().now();
        let mut entries = self.attendance()?;
        let entry = AttendanceEntry {
            id: next_time_id(now, entries.iter().map(|e| e.id).max()),
            user_id: user.id.clone(),
            kind: AttendanceKind::Checkin,
            date: now,
            checkin_time: now,
            checkout_time: None,
            location,
        };
        entries.push(entry.clone());

        let (_, audit) = self.audit_write(
            "Check-in",
            &format!("GPS {:.5}, {:.5}", location.lat, location.lng),
            &user.name,
        )?;
        self.commit(vec![Self::write(KEY_ATTENDANCE, &entries)?, audit])?;

        tracing::info!(user_id = %user.id, entry_id = entry.id, "checked in");
        Ok(entry)
    }

    /// Close the latest open entry of today.  `Ok(None)` when there is none.
    pub fn check_out(&mut self, session: &Session) -> Result<Option<AttendanceEntry>> {
        let user = session.require_user()?;
        let Some(open) = self.open_entry_today(&user.id)? else {
            tracing::debug!(user_id = %user.id, "check-out without open entry");
            return Ok(None);
        };

        let now = self.clock().now();
        let mut entries = self.attendance()?;
        let Some(entry) = entries.iter_mut().find(|e| e.id == open.id) else {
            return Ok(None);
        };
        entry.checkout_time = Some(now);
        let closed = entry.clone();

        let worked = now - closed.checkin_time;
        let (_, audit) = self.audit_write(
            "Check-out",
            &format!("Odpracováno {} min", worked.num_minutes()),
            &user.name,
        )?;
        self.commit(vec![Self::write(KEY_ATTENDANCE, &entries)?, audit])?;

        tracing::info!(user_id = %user.id, entry_id = closed.id, "checked out");
        Ok(Some(closed))
    }
}
