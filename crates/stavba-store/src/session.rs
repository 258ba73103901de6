//! Explicit session context.
//!
//! The logged-in user lives in a [`Session`] value owned by the caller and is
//! passed to every operation that needs it.  [`DomainStore::load_session`] and
//! [`DomainStore::save_session`] are the load/save boundary at process start
//! and end.

use stavba_shared::constants::{KEY_CURRENT_USER, SYSTEM_ACTOR};

use crate::error::{Result, StoreError};
use crate::kv::KvWrite;
use crate::models::User;
use crate::store::DomainStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user: User) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// The logged-in user, or [`StoreError::NotLoggedIn`].
    pub fn require_user(&self) -> Result<&User> {
        self.current_user.as_ref().ok_or(StoreError::NotLoggedIn)
    }

    /// Name recorded in audit entries.
    pub fn actor_name(&self) -> &str {
        self.current_user
            .as_ref()
            .map_or(SYSTEM_ACTOR, |u| u.name.as_str())
    }

    pub(crate) fn replace(&mut self, user: Option<User>) -> Option<User> {
        std::mem::replace(&mut self.current_user, user)
    }
}

impl DomainStore {
    pub fn load_session(&self) -> Result<Session> {
        Ok(Session {
            current_user: self.load(KEY_CURRENT_USER)?,
        })
    }

    pub fn save_session(&mut self, session: &Session) -> Result<()> {
        let write = Self::session_write(session)?;
        self.commit(vec![write])
    }

    pub(crate) fn session_write(session: &Session) -> Result<KvWrite> {
        match session.current_user() {
            Some(user) => Self::write(KEY_CURRENT_USER, user),
            None => Ok(KvWrite::remove(KEY_CURRENT_USER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_users;
    use crate::store::test_support::seeded_store;

    #[test]
    fn session_round_trips_through_storage() {
        let (mut store, _) = seeded_store();
        let user = default_users().remove(1);

        store.save_session(&Session::for_user(user.clone())).unwrap();
        assert_eq!(store.load_session().unwrap().current_user(), Some(&user));

        store.save_session(&Session::anonymous()).unwrap();
        assert!(!store.load_session().unwrap().is_logged_in());
    }

    #[test]
    fn anonymous_actor_is_system() {
        assert_eq!(Session::anonymous().actor_name(), "System");
        assert!(matches!(
            Session::anonymous().require_user(),
            Err(StoreError::NotLoggedIn)
        ));
    }
}
