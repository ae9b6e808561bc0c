use std::fmt::Debug;

use async_trait::async_trait;
use ::mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::{DbEvent, DbUser};

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod mongodb;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    MongoDB(#[from] ::mongodb::error::Error),

    #[error("Record not found")]
    NotFound,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into().into())
    }
}

/// Parse the hex form of a store id.
pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// A document store holding every collection eventbook needs.
#[async_trait]
pub trait Storage: EventStore + UserStore + Debug + Send + Sync + 'static {
    /// Round-trip to the store to confirm it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait EventStore {
    /// Every stored event, in whatever order the store returns them.
    async fn list(&self) -> Result<Vec<DbEvent>, StoreError>;

    /// Persist a new event. An event without an id is given one by the store.
    async fn create(&self, event: DbEvent) -> Result<DbEvent, StoreError>;
}

#[async_trait]
pub trait UserStore {
    async fn get(&self, id: ObjectId) -> Result<Option<DbUser>, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<DbUser>, StoreError>;

    /// Persist a new user. A user without an id is given one by the store.
    async fn create(&self, user: DbUser) -> Result<DbUser, StoreError>;

    /// Record `event_id` at the end of the user's `created_events`, both on
    /// `user` and in the store. Fails with [`StoreError::NotFound`] if the
    /// user is no longer stored.
    async fn append_created_event(
        &self,
        user: &mut DbUser,
        event_id: ObjectId,
    ) -> Result<(), StoreError>;
}
