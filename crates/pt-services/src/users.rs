//! User management

use pt_contracts::users::{ChangePassword, ChangePasswordContract, CreateUserContract};
use pt_contracts::Contract;
use pt_core::error::{PtError, PtResult};
use pt_models::{actions, NewUser, Permission, PublicUser, Role, User};
use pt_store::RecordStore;
use tracing::info;

use crate::base::{authorize, record_activity};

pub struct UserService<'a> {
    store: &'a RecordStore,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn list(&self, actor: &User) -> PtResult<Vec<PublicUser>> {
        authorize(actor, Permission::ManageUsers)?;
        Ok(self.store.users()?.iter().map(User::public).collect())
    }

    /// Create a user; usernames are unique ignoring case
    pub fn create(&self, actor: &User, params: NewUser) -> PtResult<PublicUser> {
        authorize(actor, Permission::ManageUsers)?;

        let (created, _mirror) = self.store.update_users(|users| {
            CreateUserContract::new(users).validate(&params)?;
            let user = User::from(params);
            users.push(user.clone());
            Ok(user)
        })?;

        info!(id = %created.id, role = created.role.as_str(), "User created");
        record_activity(
            self.store,
            actor,
            actions::ADD_USER,
            format!("Added user {} ({})", created.username, created.role.as_str()),
        );
        Ok(created.public())
    }

    /// Delete a user. Users cannot delete themselves and the last admin
    /// cannot be removed.
    pub fn delete(&self, actor: &User, id: &str) -> PtResult<PublicUser> {
        authorize(actor, Permission::ManageUsers)?;
        if actor.id.matches(id) {
            return Err(PtError::invalid("You cannot delete your own account."));
        }

        let (removed, _mirror) = self.store.update_users(|users| {
            let index = users
                .iter()
                .position(|u| u.id.matches(id))
                .ok_or_else(|| PtError::not_found("User", "id", id))?;
            let admins = users.iter().filter(|u| u.role == Role::Admin).count();
            if users[index].role == Role::Admin && admins <= 1 {
                return Err(PtError::invalid("Cannot delete last admin"));
            }
            Ok(users.remove(index))
        })?;

        info!(id = %removed.id, "User deleted");
        record_activity(
            self.store,
            actor,
            actions::DELETE_USER,
            format!("Deleted user {}", removed.username),
        );
        Ok(removed.public())
    }

    /// Change the actor's own password
    pub fn change_password(&self, actor: &User, params: ChangePassword) -> PtResult<()> {
        let (updated, _mirror) = self.store.update_users(|users| {
            let user = users
                .iter_mut()
                .find(|u| u.id == actor.id)
                .ok_or_else(|| PtError::not_found("User", "id", &actor.id))?;
            ChangePasswordContract::new(user).validate(&params)?;
            user.password = params.new_password.clone();
            Ok(user.clone())
        })?;

        if self
            .store
            .session()?
            .is_some_and(|session| session.id == updated.id)
        {
            self.store.set_session(Some(&updated))?;
        }

        info!(id = %updated.id, "Password changed");
        record_activity(
            self.store,
            actor,
            actions::CHANGE_PASSWORD,
            "Changed own password".to_string(),
        );
        Ok(())
    }
}
