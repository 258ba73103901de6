//! Accounts and authentication.
//!
//! Credentials are compared exactly as stored; there is no hashing and no
//! case folding.

use stavba_shared::constants::KEY_USERS;
use stavba_shared::{Role, UserId};

use crate::error::{Result, StoreError};
use crate::models::{NewUser, User};
use crate::session::Session;
use crate::store::DomainStore;

fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

impl DomainStore {
    pub fn users(&self) -> Result<Vec<User>> {
        self.load_list(KEY_USERS)
    }

    pub fn find_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.users()?.into_iter().find(|u| &u.id == id))
    }

    /// Create an account.  Does not log the new user in.
    pub fn register_user(&mut self, session: &Session, input: NewUser) -> Result<User> {
        let name = required("name", &input.name)?;
        let email = required("email", &input.email)?;
        let password = required("password", &input.password)?;
        let role: Role = required("role", &input.role)?.parse()?;

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == email) {
            tracing::warn!(%email, "registration rejected: email taken");
            return Err(StoreError::DuplicateUser(email));
        }

        let user = User {
            id: UserId::new(),
            name,
            email,
            password,
            role,
        };
        users.push(user.clone());

        let (_, audit) = self.audit_write(
            "Registrace",
            &format!("Nový uživatel {} ({})", user.name, user.role),
            session.actor_name(),
        )?;
        self.commit(vec![Self::write(KEY_USERS, &users)?, audit])?;

        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Authenticate and start a session, replacing any previous one.
    pub fn login(&mut self, session: &mut Session, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(StoreError::MissingCredentials);
        }

        let user = self
            .users()?
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| {
                tracing::warn!(%email, "login failed");
                StoreError::InvalidCredentials
            })?;

        let next = Session::for_user(user.clone());
        let (_, audit) =
            self.audit_write("Přihlášení", &format!("{} se přihlásil", user.email), &user.name)?;
        self.commit(vec![Self::session_write(&next)?, audit])?;

        if let Some(previous) = session.replace(Some(user.clone())) {
            tracing::debug!(previous = %previous.id, "session replaced");
        }
        tracing::info!(user_id = %user.id, "logged in");
        Ok(user)
    }

    /// End the session.  Without a session this only clears the stored key.
    pub fn logout(&mut self, session: &mut Session) -> Result<Option<User>> {
        let mut writes = Vec::new();
        if let Some(user) = session.current_user() {
            let (_, audit) =
                self.audit_write("Odhlášení", &format!("{} se odhlásil", user.email), &user.name)?;
            writes.push(audit);
        }
        writes.push(Self::session_write(&Session::anonymous())?);
        self.commit(writes)?;

        let previous = session.replace(None);
        if let Some(user) = &previous {
            tracing::info!(user_id = %user.id, "logged out");
        }
        Ok(previous)
    }

    /// Remove an account.  Attendance entries referencing it are kept.
    /// Deleting the logged-in user also ends the session.
    pub fn delete_user(&mut self, session: &mut Session, id: &UserId) -> Result<User> {
        let mut users = self.users()?;
        let index = users
            .iter()
            .position(|u| &u.id == id)
            .ok_or(StoreError::NotFound)?;
        let removed = users.remove(index);

        let (_, audit) = self.audit_write(
            "Smazání uživatele",
            &format!("Uživatel {} odstraněn", removed.email),
            session.actor_name(),
        )?;
        let mut writes = vec![Self::write(KEY_USERS, &users)?, audit];
        let deletes_self = session.current_user().is_some_and(|u| &u.id == id);
        if deletes_self {
            writes.push(Self::session_write(&Session::anonymous())?);
        }
        self.commit(writes)?;

        if deletes_self {
            session.replace(None);
        }
        tracing::info!(user_id = %removed.id, ended_session = deletes_self, "user deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::kv::MemoryKv;
    use crate::store::test_support::seeded_store;
    use stavba_shared::SystemClock;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Karel Dvořák".into(),
            email: email.into(),
            password: "heslo".into(),
            role: "worker".into(),
        }
    }

    #[test]
    fn register_then_login() {
        let (mut store, _) = seeded_store();
        let mut session = Session::anonymous();

        let user = store
            .register_user(&session, new_user("dvorak@stavba.cz"))
            .unwrap();
        assert!(!session.is_logged_in());

        let logged = store.login(&mut session, "dvorak@stavba.cz", "heslo").unwrap();
        assert_eq!(logged.id, user.id);
        assert_eq!(session.current_user(), Some(&user));
        assert_eq!(store.load_session().unwrap().current_user(), Some(&user));
    }

    #[test]
    fn duplicate_email_is_rejected_once() {
        let (mut store, _) = seeded_store();
        let session = Session::anonymous();
        let before = store.users().unwrap().len();

        store.register_user(&session, new_user("x@stavba.cz")).unwrap();
        let err = store
            .register_user(&session, new_user("x@stavba.cz"))
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateUser(ref e) if e == "x@stavba.cz"));
        assert_eq!(store.users().unwrap().len(), before + 1);
    }

    #[test]
    fn email_comparison_is_case_sensitive() {
        let (mut store, _) = seeded_store();
        let session = Session::anonymous();
        store
            .register_user(&session, new_user("ADMIN@stavba.cz"))
            .unwrap();
    }

    #[test]
    fn registration_requires_every_field() {
        let (mut store, _) = seeded_store();
        let session = Session::anonymous();
        let mut input = new_user("y@stavba.cz");
        input.password = "   ".into();

        assert!(matches!(
            store.register_user(&session, input),
            Err(StoreError::MissingField("password"))
        ));

        let mut input = new_user("y@stavba.cz");
        input.role = "owner".into();
        assert!(matches!(
            store.register_user(&session, input),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn registration_is_audited_as_system_when_anonymous() {
        let (mut store, _) = seeded_store();
        store
            .register_user(&Session::anonymous(), new_user("z@stavba.cz"))
            .unwrap();
        let log = store.audit_log().unwrap();
        assert_eq!(log.last().unwrap().user, "System");
    }

    #[test]
    fn bad_credentials_do_not_set_session() {
        let (mut store, _) = seeded_store();
        let mut session = Session::anonymous();

        assert!(matches!(
            store.login(&mut session, "admin@stavba.cz", "wrong"),
            Err(StoreError::InvalidCredentials)
        ));
        assert!(matches!(
            store.login(&mut session, "nobody@stavba.cz", "admin123"),
            Err(StoreError::InvalidCredentials)
        ));
        assert!(matches!(
            store.login(&mut session, " ", "admin123"),
            Err(StoreError::MissingCredentials)
        ));
        assert!(!session.is_logged_in());
        assert!(!store.load_session().unwrap().is_logged_in());
    }

    #[test]
    fn login_overwrites_previous_session() {
        let (mut store, _) = seeded_store();
        let mut session = Session::anonymous();
        store.login(&mut session, "admin@stavba.cz", "admin123").unwrap();
        store.login(&mut session, "svoboda@stavba.cz", "worker123").unwrap();
        assert_eq!(session.current_user().unwrap().name, "Petr Svoboda");
    }

    #[test]
    fn logout_audits_outgoing_user_and_is_idempotent() {
        let (mut store, _) = seeded_store();
        let mut session = Session::anonymous();
        store.login(&mut session, "novak@stavba.cz", "super123").unwrap();

        let out = store.logout(&mut session).unwrap();
        assert_eq!(out.unwrap().name, "Jan Novák");
        assert_eq!(store.audit_log().unwrap().last().unwrap().user, "Jan Novák");
        assert!(!store.load_session().unwrap().is_logged_in());

        let audit_len = store.audit_log().unwrap().len();
        assert!(store.logout(&mut session).unwrap().is_none());
        assert_eq!(store.audit_log().unwrap().len(), audit_len);
    }

    #[test]
    fn delete_user_by_id() {
        let (mut store, _) = seeded_store();
        let removed = store
            .delete_user(&mut Session::anonymous(), &UserId::from("3"))
            .unwrap();
        assert_eq!(removed.role, Role::Worker);
        assert!(store.find_user(&UserId::from("3")).unwrap().is_none());
        assert!(matches!(
            store.delete_user(&mut Session::anonymous(), &UserId::from("3")),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn deleting_logged_in_user_ends_session() {
        let (mut store, _) = seeded_store();
        let mut session = Session::anonymous();
        let worker = store
            .login(&mut session, "svoboda@stavba.cz", "worker123")
            .unwrap();

        store.delete_user(&mut session, &worker.id).unwrap();

        assert!(!session.is_logged_in());
        assert!(store.load_session().unwrap().current_user().is_none());
        assert!(matches!(
            store.send_chat_message(&session, "ahoj", None),
            Err(StoreError::NotLoggedIn)
        ));
    }

    #[test]
    fn deleting_someone_else_keeps_session() {
        let (mut store, _) = seeded_store();
        let mut session = Session::anonymous();
        store
            .login(&mut session, "admin@stavba.cz", "admin123")
            .unwrap();

        store.delete_user(&mut session, &UserId::from("3")).unwrap();

        assert!(session.is_logged_in());
        assert!(store.load_session().unwrap().is_logged_in());
    }

    #[test]
    fn failed_write_leaves_users_untouched() {
        let mut store = DomainStore::new(MemoryKv::with_quota(4096), Arc::new(SystemClock));
        store.seed_defaults().unwrap();
        let before = store.users().unwrap();

        let mut input = new_user("big@stavba.cz");
        input.name = "x".repeat(8192);
        let err = store
            .register_user(&Session::anonymous(), input)
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::StorageFailure(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(store.users().unwrap(), before);
    }
}
