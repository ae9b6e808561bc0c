//! A [`Storage`] kept entirely in process memory.
//!
//! Mirrors the MongoDB implementation closely enough to exercise the API
//! without a server: ids are assigned on insert, listing returns insertion
//! order, and nothing enforces email uniqueness.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::{
    models::{DbEvent, DbUser},
    storage::{EventStore, Storage, StoreError, UserStore},
};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    events: RwLock<Vec<DbEvent>>,
    users: RwLock<Vec<DbUser>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a stored user, as if it had been deleted out from under the API.
    pub async fn remove_user(&self, id: ObjectId) -> Option<DbUser> {
        let mut users = self.users.write().await;
        let index = users.iter().position(|u| u.id == Some(id))?;
        Some(users.remove(index))
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryStorage {
    async fn list(&self) -> Result<Vec<DbEvent>, StoreError> {
        Ok(self.events.read().await.clone())
    }

    async fn create(&self, mut event: DbEvent) -> Result<DbEvent, StoreError> {
        let mut events = self.events.write().await;
        let id = *event.id.get_or_insert_with(ObjectId::new);

        if events.iter().any(|e| e.id == Some(id)) {
            return Err(StoreError::internal(format!("duplicate key: {id}")));
        }

        events.push(event.clone());
        Ok(event)
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn get(&self, id: ObjectId) -> Result<Option<DbUser>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id == Some(id))
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<DbUser>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, mut user: DbUser) -> Result<DbUser, StoreError> {
        let mut users = self.users.write().await;
        let id = *user.id.get_or_insert_with(ObjectId::new);

        if users.iter().any(|u| u.id == Some(id)) {
            return Err(StoreError::internal(format!("duplicate key: {id}")));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn append_created_event(
        &self,
        user: &mut DbUser,
        event_id: ObjectId,
    ) -> Result<(), StoreError> {
        let id = user.id.ok_or(StoreError::NotFound)?;

        let mut users = self.users.write().await;
        let stored = users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or(StoreError::NotFound)?;

        stored.created_events.push(event_id);
        user.created_events.push(event_id);
        Ok(())
    }
}
