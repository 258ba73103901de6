//! Domain model structs persisted as JSON documents.
//!
//! Field names follow the persisted layout (camelCase, `type` for kinds) so
//! documents written by earlier versions of the application load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stavba_shared::{Coordinate, Role, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique, compared case-sensitively.
    pub email: String,
    /// Stored as entered.
    pub password: String,
    pub role: Role,
}

/// Registration form input.  Every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    /// `commercial`, `industrial` or any other label.
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    /// Percent complete.  Not clamped.
    pub completion: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.completion < 100
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub completion: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Photo / Report
// ---------------------------------------------------------------------------

/// A site photo.  Only `date` is interpreted; everything else is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: i64,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A site report.  Only `date` is interpreted; everything else is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: i64,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: i64,
    /// Display name of the sender.
    pub user: String,
    pub message: String,
    /// Locale-formatted send time.
    pub timestamp: String,
    pub channel: String,
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceKind {
    Checkin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub id: i64,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: AttendanceKind,
    pub date: DateTime<Utc>,
    pub checkin_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_time: Option<DateTime<Utc>>,
    pub location: Coordinate,
}

impl AttendanceEntry {
    pub fn is_open(&self) -> bool {
        self.checkout_time.is_none()
    }
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: i64,
    pub action: String,
    pub details: String,
    /// Display name of the acting user, or `System`.
    pub user: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_uses_persisted_field_names() {
        let json = r#"{
            "id": 1,
            "userId": "3",
            "type": "checkin",
            "date": "2024-05-02T06:58:00Z",
            "checkinTime": "2024-05-02T06:58:00Z",
            "location": { "lat": 50.08, "lng": 14.42 }
        }"#;
        let entry: AttendanceEntry = serde_json::from_str(json).unwrap();
        assert!(entry.is_open());
        assert_eq!(entry.user_id, UserId::from("3"));

        let back = serde_json::to_value(&entry).unwrap();
        assert!(back.get("checkoutTime").is_none());
        assert_eq!(back["type"], "checkin");
    }

    #[test]
    fn photo_keeps_unknown_attributes() {
        let json = r#"{
            "id": 7,
            "date": "2024-05-02T10:00:00Z",
            "caption": "VZT jednotka",
            "projectId": 1
        }"#;
        let photo: Photo = serde_json::from_str(json).unwrap();
        assert_eq!(photo.attributes["caption"], "VZT jednotka");

        let back = serde_json::to_value(&photo).unwrap();
        assert_eq!(back["projectId"], 1);
    }

    #[test]
    fn project_without_description() {
        let json = r#"{
            "id": 1,
            "name": "Hala",
            "type": "industrial",
            "address": "Brno",
            "completion": 140
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.description, None);
        assert!(!project.is_active());
    }
}
