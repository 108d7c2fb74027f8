//! Login sessions
//!
//! There is one current session per store, shared by every client.

use pt_core::error::{PtError, PtResult};
use pt_models::{actions, User};
use pt_store::RecordStore;
use tracing::info;

use crate::base::record_activity;

pub struct SessionService<'a> {
    store: &'a RecordStore,
}

impl<'a> SessionService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Username matches ignoring case; the password must match exactly
    pub fn login(&self, username: &str, password: &str) -> PtResult<User> {
        let user = self
            .store
            .users()?
            .into_iter()
            .find(|u| u.has_username(username) && u.password == password)
            .ok_or_else(|| PtError::unauthorized("Invalid username or password"))?;

        self.store.set_session(Some(&user))?;
        info!(id = %user.id, "Logged in");
        record_activity(self.store, &user, actions::LOGIN, "Logged in".to_string());
        Ok(user)
    }

    pub fn logout(&self) -> PtResult<()> {
        if let Some(user) = self.store.session()? {
            record_activity(self.store, &user, actions::LOGOUT, "Logged out".to_string());
        }
        self.store.set_session(None)
    }

    pub fn current(&self) -> PtResult<Option<User>> {
        self.store.session()
    }

    /// The logged-in user as currently stored.
    ///
    /// A session whose user has since been deleted is cleared.
    pub fn require_user(&self) -> PtResult<User> {
        let session = self
            .store
            .session()?
            .ok_or_else(|| PtError::unauthorized("Not logged in"))?;

        match self.store.users()?.into_iter().find(|u| u.id == session.id) {
            Some(user) => Ok(user),
            None => {
                self.store.set_session(None)?;
                Err(PtError::unauthorized("Session user no longer exists"))
            }
        }
    }
}
