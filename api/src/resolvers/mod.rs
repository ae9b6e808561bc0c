//! The operations behind the GraphQL schema.
//!
//! Each operation is a straight run of fallible steps against the store;
//! the first failing step ends the operation and nothing already written is
//! undone.

pub mod events;
pub mod users;

pub use events::{create_event, list_events, parse_date};
pub use users::create_user;

#[cfg(test)]
pub(crate) mod testing {
    use eventbook_db::{
        bson::oid::ObjectId,
        models::DbUser,
        storage::{UserStore, memory::MemoryStorage},
    };

    use crate::config::DEFAULT_CREATOR_ID;

    pub(crate) fn creator_id() -> ObjectId {
        ObjectId::parse_str(DEFAULT_CREATOR_ID).unwrap()
    }

    /// Store the user that events are attributed to by default.
    pub(crate) async fn seed_creator(stg: &MemoryStorage) -> DbUser {
        let mut user = DbUser::new("creator@example.com".into(), "not-a-real-digest".into());
        user.id = Some(creator_id());
        UserStore::create(stg, user).await.unwrap()
    }
}
