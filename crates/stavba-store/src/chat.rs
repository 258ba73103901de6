//! Chat messages, partitioned by free-form channel names.

use stavba_shared::constants::{DEFAULT_CHANNEL, KEY_CHAT_MESSAGES};
use stavba_shared::types::next_time_id;

use crate::error::Result;
use crate::models::ChatMessage;
use crate::session::Session;
use crate::store::DomainStore;

impl DomainStore {
    pub fn chat_messages(&self) -> Result<Vec<ChatMessage>> {
        self.load_list(KEY_CHAT_MESSAGES)
    }

    pub fn chat_messages_in(&self, channel: &str) -> Result<Vec<ChatMessage>> {
        Ok(self
            .chat_messages()?
            .into_iter()
            .filter(|m| m.channel == channel)
            .collect())
    }

    /// Post a message as the session user.  Blank text is ignored
    /// (`Ok(None)`); a blank channel means [`DEFAULT_CHANNEL`].
    pub fn send_chat_message(
        &mut self,
        session: &Session,
        text: &str,
        channel: Option<&str>,
    ) -> Result<Option<ChatMessage>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let user = session.require_user()?;
        let channel = channel
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CHANNEL);

        let mut messages = self.chat_messages()?;
        let message = ChatMessage {
            id: next_time_id(self.clock().now(), messages.iter().map(|m| m.id).max()),
            user: user.name.clone(),
            message: text.to_string(),
            timestamp: self.clock().locale_timestamp(),
            channel: channel.to_string(),
        };
        messages.push(message.clone());
        self.commit(vec![Self::write(KEY_CHAT_MESSAGES, &messages)?])?;

        tracing::debug!(channel, msg_id = message.id, "chat message stored");
        Ok(Some(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_users;
    use crate::store::test_support::seeded_store;

    fn supervisor() -> Session {
        Session::for_user(default_users().remove(1))
    }

    #[test]
    fn blank_message_changes_nothing() {
        let (mut store, _) = seeded_store();
        let before = store.kv().get(KEY_CHAT_MESSAGES).unwrap();

        assert!(store.send_chat_message(&supervisor(), "", None).unwrap().is_none());
        assert!(store
            .send_chat_message(&supervisor(), " \n\t ", Some("emergency"))
            .unwrap()
            .is_none());

        assert_eq!(store.kv().get(KEY_CHAT_MESSAGES).unwrap(), before);
    }

    #[test]
    fn message_is_tagged_with_sender_and_channel() {
        let (mut store, _) = seeded_store();
        let msg = store
            .send_chat_message(&supervisor(), "  Únik vody v 3. patře ", Some("emergency"))
            .unwrap()
            .unwrap();

        assert_eq!(msg.user, "Jan Novák");
        assert_eq!(msg.message, "Únik vody v 3. patře");
        assert_eq!(msg.channel, "emergency");
        assert_eq!(msg.timestamp, "2. 5. 2024 7:00:00");
        assert_eq!(store.chat_messages_in("emergency").unwrap(), vec![msg]);
    }

    #[test]
    fn channel_defaults_to_general() {
        let (mut store, _) = seeded_store();
        let a = store.send_chat_message(&supervisor(), "ahoj", None).unwrap().unwrap();
        let b = store.send_chat_message(&supervisor(), "ahoj", Some("  ")).unwrap().unwrap();
        assert_eq!(a.channel, "general");
        assert_eq!(b.channel, "general");
        assert!(b.id > a.id);
        assert_eq!(store.chat_messages_in("general").unwrap().len(), 4);
    }
}
