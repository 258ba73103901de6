//! First-run defaults.
//!
//! Presence of a key, not emptiness, decides whether it is seeded: a key that
//! holds `[]` is left alone.

use stavba_shared::constants::{
    DEFAULT_CHANNEL, KEY_CHAT_MESSAGES, KEY_PROJECTS, KEY_THEME, KEY_USERS, SEEDED_KEYS,
};
use stavba_shared::{Role, Theme, UserId};

use crate::error::Result;
use crate::kv::KvWrite;
use crate::models::{ChatMessage, Project, User};
use crate::store::DomainStore;

pub fn default_users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, password: &str, role| User {
        id: UserId::from(id),
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
    };

    vec![
        user("1", "Admin", "admin@stavba.cz", "admin123", Role::Admin),
        user("2", "Jan Novák", "novak@stavba.cz", "super123", Role::Supervisor),
        user("3", "Petr Svoboda", "svoboda@stavba.cz", "worker123", Role::Worker),
    ]
}

pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Administrativní centrum Praha".to_string(),
            kind: "commercial".to_string(),
            address: "Vinohradská 12, Praha 2".to_string(),
            completion: 65,
            description: Some("Vzduchotechnika kanceláří, 4 VZT jednotky".to_string()),
        },
        Project {
            id: 2,
            name: "Výrobní hala Brno".to_string(),
            kind: "industrial".to_string(),
            address: "Průmyslová 8, Brno".to_string(),
            completion: 30,
            description: Some("Odsávání a větrání výrobní haly".to_string()),
        },
    ]
}

fn default_chat(timestamp: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            id: 1,
            user: "Jan Novák".to_string(),
            message: "Dobré ráno, dnes montáž potrubí ve 2. patře.".to_string(),
            timestamp: timestamp.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
        },
        ChatMessage {
            id: 2,
            user: "Petr Svoboda".to_string(),
            message: "Rozumím, materiál je na místě.".to_string(),
            timestamp: timestamp.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
        },
    ]
}

impl DomainStore {
    /// Write defaults for every absent collection.  Returns the seeded keys.
    pub fn seed_defaults(&mut self) -> Result<Vec<&'static str>> {
        let empty: Vec<serde_json::Value> = Vec::new();
        let timestamp = self.clock().locale_timestamp();

        let mut writes = Vec::new();
        let mut seeded = Vec::new();

        for key in SEEDED_KEYS {
            if self.kv().contains(key)? {
                continue;
            }
            let write: KvWrite = match key {
                KEY_USERS => Self::write(key, &default_users())?,
                KEY_PROJECTS => Self::write(key, &default_projects())?,
                KEY_CHAT_MESSAGES => Self::write(key, &default_chat(&timestamp))?,
                KEY_THEME => Self::write(key, &Theme::default())?,
                _ => Self::write(key, &empty)?,
            };
            writes.push(write);
            seeded.push(key);
        }

        if writes.is_empty() {
            tracing::debug!("store already initialised");
            return Ok(seeded);
        }

        self.commit(writes)?;
        tracing::info!(keys = ?seeded, "seeded default collections");
        Ok(seeded)
    }
}
