use serde::Serialize;
use stavba_shared::UserId;
use stavba_store::{NewUser, User};
use tracing::info;

use crate::error::Result;
use crate::events::{emit_event, SessionPayload, EVENT_SESSION_CHANGED};
use crate::state::{lock, AppState, SharedState};

/// User as shown in the UI.  The password never leaves the store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserDto {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            short_id: u.id.short().to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
        }
    }
}

pub fn register(state: &SharedState, input: NewUser) -> Result<UserDto> {
    let mut guard = lock(state)?;
    let AppState { store, session, .. } = &mut *guard;
    let user = store.register_user(session, input)?;
    Ok(UserDto::from(&user))
}

pub fn login(state: &SharedState, email: String, password: String) -> Result<UserDto> {
    let mut guard = lock(state)?;
    let AppState { store, session, .. } = &mut *guard;
    let user = store.login(session, &email, &password)?;

    info!(user_id = %user.id, "Session started");
    emit_event(
        guard.event_sink(),
        EVENT_SESSION_CHANGED,
        SessionPayload {
            user_name: Some(user.name.clone()),
        },
    );
    Ok(UserDto::from(&user))
}

pub fn logout(state: &SharedState) -> Result<()> {
    let mut guard = lock(state)?;
    let AppState { store, session, .. } = &mut *guard;
    if store.logout(session)?.is_some() {
        emit_event(
            guard.event_sink(),
            EVENT_SESSION_CHANGED,
            SessionPayload { user_name: None },
        );
    }
    Ok(())
}

pub fn current_user(state: &SharedState) -> Result<Option<UserDto>> {
    let guard = lock(state)?;
    Ok(guard.session.current_user().map(UserDto::from))
}

pub fn list_users(state: &SharedState) -> Result<Vec<UserDto>> {
    let guard = lock(state)?;
    Ok(guard.store.users()?.iter().map(UserDto::from).collect())
}

pub fn delete_user(state: &SharedState, user_id: String) -> Result<UserDto> {
    let mut guard = lock(state)?;
    let AppState { store, session, .. } = &mut *guard;
    let removed = store.delete_user(session, &UserId::from(user_id.as_str()))?;
    Ok(UserDto::from(&removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::events::test_support::RecordingSink;
    use crate::state::test_support::in_memory_state;
    use stavba_store::StoreError;
    use std::sync::Arc;

    #[test]
    fn register_login_logout() {
        let (state, _) = in_memory_state();
        let dto = register(
            &state,
            NewUser {
                name: "Eva Malá".into(),
                email: "mala@stavba.cz".into(),
                password: "tajne".into(),
                role: "supervisor".into(),
            },
        )
        .unwrap();
        assert_eq!(dto.role, "supervisor");
        assert!(current_user(&state).unwrap().is_none());

        let logged = login(&state, "mala@stavba.cz".into(), "tajne".into()).unwrap();
        assert_eq!(logged, dto);
        assert_eq!(current_user(&state).unwrap(), Some(dto));

        logout(&state).unwrap();
        assert!(current_user(&state).unwrap().is_none());
    }

    #[test]
    fn wrong_password_surfaces_message() {
        let (state, _) = in_memory_state();
        let err = login(&state, "admin@stavba.cz".into(), "nope".into()).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Store(StoreError::InvalidCredentials)
        ));
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn dto_hides_password() {
        let (state, _) = in_memory_state();
        let users = list_users(&state).unwrap();
        let json = serde_json::to_string(&users).unwrap();
        assert!(!json.contains("admin123"));
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn session_events_are_emitted() {
        let (state, _) = in_memory_state();
        let sink = Arc::new(RecordingSink::default());
        lock(&state).unwrap().events = Some(sink.clone());

        login(&state, "admin@stavba.cz".into(), "admin123".into()).unwrap();
        logout(&state).unwrap();
        logout(&state).unwrap();

        assert_eq!(sink.names(), vec![EVENT_SESSION_CHANGED, EVENT_SESSION_CHANGED]);
    }

    #[test]
    fn delete_seeded_worker() {
        let (state, _) = in_memory_state();
        let removed = delete_user(&state, "3".into()).unwrap();
        assert_eq!(removed.email, "svoboda@stavba.cz");
        assert_eq!(list_users(&state).unwrap().len(), 2);
    }

    #[test]
    fn deleting_own_account_logs_out() {
        let (state, _) = in_memory_state();
        let me = login(&state, "svoboda@stavba.cz".into(), "worker123".into()).unwrap();
        delete_user(&state, me.id).unwrap();
        assert!(current_user(&state).unwrap().is_none());
    }
}
