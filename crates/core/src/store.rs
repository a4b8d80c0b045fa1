//! In-memory user collection.
//!
//! [`UserStore`] holds every user record for the lifetime of the process, in insertion order.
//! It starts empty and is discarded on exit.
//!
//! The store is a cheaply cloneable handle; clones share the same collection. Each operation
//! takes a single lock for its whole duration, so a lookup and the mutation that follows it
//! inside one operation cannot interleave with another request. Independent stores (for
//! example, one per test) never share state.

use crate::{CoreError, CoreResult, User, UserFields};
use std::sync::{Arc, Mutex, MutexGuard};
use users_uuid::UserId;

#[derive(Clone, Debug, Default)]
pub struct UserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl UserStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CoreResult<MutexGuard<'_, Vec<User>>> {
        self.users.lock().map_err(|_| CoreError::StorePoisoned)
    }

    /// Returns a snapshot of every record, in insertion order.
    pub fn list_all(&self) -> CoreResult<Vec<User>> {
        Ok(self.lock()?.clone())
    }

    /// Returns the record with a matching `id`, or `None`.
    ///
    /// Identifiers are compared as exact strings.
    pub fn find_by_id(&self, id: &UserId) -> CoreResult<Option<User>> {
        Ok(self.lock()?.iter().find(|u| &u.id == id).cloned())
    }

    /// Appends `user` to the end of the collection.
    ///
    /// The caller guarantees `user.id` is not already present.
    pub fn insert(&self, user: User) -> CoreResult<()> {
        self.lock()?.push(user);
        Ok(())
    }

    /// Allocates a fresh identifier, stores a record built from `fields` and returns it.
    pub fn create(&self, fields: UserFields) -> CoreResult<User> {
        let user = User::from_fields(UserId::generate(), fields);
        self.insert(user.clone())?;
        tracing::debug!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Replaces the record with a matching `id` in place, keeping its position and identity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UserNotFound`] if no record matches; nothing is changed.
    pub fn replace(&self, id: &UserId, fields: UserFields) -> CoreResult<User> {
        let mut users = self.lock()?;
        let slot = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| CoreError::UserNotFound(id.clone()))?;

        *slot = User::from_fields(id.clone(), fields);
        tracing::debug!(user_id = %id, "user replaced");
        Ok(slot.clone())
    }

    /// Removes the record with a matching `id`, preserving the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UserNotFound`] if no record matches.
    pub fn remove(&self, id: &UserId) -> CoreResult<User> {
        let mut users = self.lock()?;
        let index = users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| CoreError::UserNotFound(id.clone()))?;

        let removed = users.remove(index);
        tracing::debug!(user_id = %id, "user removed");
        Ok(removed)
    }
}
