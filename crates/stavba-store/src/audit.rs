//! Append-only audit log capped at [`AUDIT_LOG_CAPACITY`] entries.

use stavba_shared::constants::{AUDIT_LOG_CAPACITY, KEY_AUDIT_LOG};
use stavba_shared::types::next_time_id;

use crate::error::Result;
use crate::kv::KvWrite;
use crate::models::AuditLogEntry;
use crate::store::DomainStore;

impl DomainStore {
    pub fn audit_log(&self) -> Result<Vec<AuditLogEntry>> {
        self.load_list(KEY_AUDIT_LOG)
    }

    /// Append one entry and persist immediately.
    pub fn append_audit(
        &mut self,
        action: &str,
        details: &str,
        actor: &str,
    ) -> Result<AuditLogEntry> {
        let (entry, write) = self.audit_write(action, details, actor)?;
        self.commit(vec![write])?;
        Ok(entry)
    }

    /// Build the audit log document with one more entry, oldest entries
    /// dropped beyond the cap.  The caller commits it with its own writes.
    pub(crate) fn audit_write(
        &self,
        action: &str,
        details: &str,
        actor: &str,
    ) -> Result<(AuditLogEntry, KvWrite)> {
        let mut log = self.audit_log()?;

        let entry = AuditLogEntry {
            id: next_time_id(self.clock().now(), log.last().map(|e| e.id)),
            action: action.to_string(),
            details: details.to_string(),
            user: actor.to_string(),
            timestamp: self.clock().locale_timestamp(),
        };
        log.push(entry.clone());

        if log.len() > AUDIT_LOG_CAPACITY {
            let excess = log.len() - AUDIT_LOG_CAPACITY;
            log.drain(..excess);
        }

        tracing::debug!(action, actor, "audit entry");
        Ok((entry, Self::write(KEY_AUDIT_LOG, &log)?))
    }
}
