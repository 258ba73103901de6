use stavba_store::ChatMessage;
use tracing::info;

use crate::error::Result;
use crate::events::{emit_event, ChatMessagePayload, EVENT_CHAT_MESSAGE};
use crate::state::{lock, AppState, SharedState};

/// Post to `channel` (or the configured default).  Returns `None` when the
/// text was blank and nothing was sent.
pub fn send_message(
    state: &SharedState,
    content: String,
    channel: Option<String>,
) -> Result<Option<ChatMessage>> {
    let mut guard = lock(state)?;
    let AppState {
        store,
        session,
        config,
        ..
    } = &mut *guard;

    let channel = channel
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| config.default_channel.clone());
    let Some(message) = store.send_chat_message(session, &content, Some(&channel))? else {
        return Ok(None);
    };

    info!(msg_id = message.id, channel = %message.channel, "Message sent");
    emit_event(
        guard.event_sink(),
        EVENT_CHAT_MESSAGE,
        ChatMessagePayload {
            channel: message.channel.clone(),
            sender: message.user.clone(),
            timestamp: message.timestamp.clone(),
        },
    );
    Ok(Some(message))
}

/// Messages of one channel, or of all channels when `channel` is `None`.
pub fn get_messages(state: &SharedState, channel: Option<String>) -> Result<Vec<ChatMessage>> {
    let guard = lock(state)?;
    let messages = match channel {
        Some(channel) => guard.store.chat_messages_in(&channel)?,
        None => guard.store.chat_messages()?,
    };
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::auth::login;
    use crate::events::test_support::RecordingSink;
    use crate::state::test_support::in_memory_state;
    use std::sync::Arc;

    #[test]
    fn blank_message_is_dropped() {
        let (state, _) = in_memory_state();
        login(&state, "novak@stavba.cz".into(), "super123".into()).unwrap();
        let sink = Arc::new(RecordingSink::default());
        lock(&state).unwrap().events = Some(sink.clone());

        assert!(send_message(&state, "   ".into(), None).unwrap().is_none());
        assert_eq!(get_messages(&state, None).unwrap().len(), 2);
        assert!(sink.names().is_empty());
    }

    #[test]
    fn configured_default_channel_is_used() {
        let (state, _) = in_memory_state();
        login(&state, "novak@stavba.cz".into(), "super123".into()).unwrap();
        lock(&state).unwrap().config.default_channel = "brno".into();

        let msg = send_message(&state, "Jeřáb dorazí v 10:00".into(), None)
            .unwrap()
            .unwrap();
        assert_eq!(msg.channel, "brno");

        let emergency = send_message(&state, "Požár!".into(), Some("emergency".into()))
            .unwrap()
            .unwrap();
        assert_eq!(emergency.user, "Jan Novák");
        assert_eq!(get_messages(&state, Some("emergency".into())).unwrap().len(), 1);
    }
}
