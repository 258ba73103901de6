use serde::{Deserialize, Serialize};
use stavba_shared::constants::{
    AUDIT_LOG_CAPACITY, KEY_ATTENDANCE, KEY_AUDIT_LOG, KEY_CHAT_MESSAGES, KEY_PHOTOS,
    KEY_PROJECTS, KEY_REPORTS, KEY_USERS,
};
use stavba_shared::Theme;

use crate::error::Result;
use crate::kv::KvWrite;
use crate::models::{AttendanceEntry, AuditLogEntry, ChatMessage, Photo, Project, Report, User};
use crate::store::DomainStore;

/// Full backup payload: every collection as stored.  The session is not part
/// of a backup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupPayload {
    /// ISO 8601 timestamp of when the backup was created
    pub created_at: String,
    /// App version that produced the backup
    pub version: String,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub photos: Vec<Photo>,
    pub reports: Vec<Report>,
    pub chat_messages: Vec<ChatMessage>,
    pub attendance: Vec<AttendanceEntry>,
    pub audit_log: Vec<AuditLogEntry>,
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub users: usize,
    pub projects: usize,
    pub photos: usize,
    pub reports: usize,
    pub chat_messages: usize,
    pub attendance: usize,
    pub audit_log: usize,
}

/// Append the records of `incoming` whose id is not yet present.
fn merge_by_id<T, K, F>(existing: &mut Vec<T>, incoming: &[T], id: F) -> usize
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut added = 0;
    for item in incoming {
        let key = id(item);
        if !existing.iter().any(|e| id(e) == key) {
            existing.push(item.clone());
            added += 1;
        }
    }
    added
}

/// Like [`merge_by_id`], but an incoming user whose email is already taken
/// is skipped too, so emails stay unique.
fn merge_users(existing: &mut Vec<User>, incoming: &[User]) -> usize {
    let mut added = 0;
    for user in incoming {
        if existing.iter().any(|e| e.id == user.id || e.email == user.email) {
            tracing::debug!(user_id = %user.id, "skipping imported user with taken id or email");
            continue;
        }
        existing.push(user.clone());
        added += 1;
    }
    added
}

impl DomainStore {
    /// Export every collection into a serializable struct.
    pub fn export_backup(&self) -> Result<BackupPayload> {
        Ok(BackupPayload {
            created_at: self.clock().now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            users: self.users()?,
            projects: self.projects()?,
            photos: self.photos()?,
            reports: self.reports()?,
            chat_messages: self.chat_messages()?,
            attendance: self.attendance()?,
            audit_log: self.audit_log()?,
            theme: self.theme()?,
        })
    }

    /// Import a backup payload, merging with existing data: records whose id
    /// already exists are ignored, as are users whose email is taken.  The theme is left unchanged.
    pub fn import_backup(&mut self, payload: &BackupPayload) -> Result<ImportStats> {
        let mut users = self.users()?;
        let mut projects = self.projects()?;
        let mut photos = self.photos()?;
        let mut reports = self.reports()?;
        let mut chat = self.chat_messages()?;
        let mut attendance = self.attendance()?;
        let mut audit = self.audit_log()?;

        let stats = ImportStats {
            users: merge_users(&mut users, &payload.users),
            projects: merge_by_id(&mut projects, &payload.projects, |p| p.id),
            photos: merge_by_id(&mut photos, &payload.photos, |p| p.id),
            reports: merge_by_id(&mut reports, &payload.reports, |r| r.id),
            chat_messages: merge_by_id(&mut chat, &payload.chat_messages, |m| m.id),
            attendance: merge_by_id(&mut attendance, &payload.attendance, |a| a.id),
            audit_log: merge_by_id(&mut audit, &payload.audit_log, |a| a.id),
        };

        chat.sort_by_key(|m| m.id);
        attendance.sort_by_key(|a| a.id);
        audit.sort_by_key(|a| a.id);
        let excess = audit.len().saturating_sub(AUDIT_LOG_CAPACITY);
        audit.drain(..excess);

        let writes: Vec<KvWrite> = vec![
            Self::write(KEY_USERS, &users)?,
            Self::write(KEY_PROJECTS, &projects)?,
            Self::write(KEY_PHOTOS, &photos)?,
            Self::write(KEY_REPORTS, &reports)?,
            Self::write(KEY_CHAT_MESSAGES, &chat)?,
            Self::write(KEY_ATTENDANCE, &attendance)?,
            Self::write(KEY_AUDIT_LOG, &audit)?,
        ];
        self.commit(writes)?;

        tracing::info!(?stats, version = %payload.version, "backup imported");
        Ok(stats)
    }
}
