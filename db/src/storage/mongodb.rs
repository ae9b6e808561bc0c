use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
};
use tracing::{debug, instrument};

use crate::{
    models::{DbEvent, DbUser},
    storage::{EventStore, Storage, StoreError, UserStore},
};

pub const MONGODB_COLLECTION_EVENTS: &str = "events";
pub const MONGODB_COLLECTION_USERS: &str = "users";

const MONGODB_DEFAULT_DATABASE: &str = "eventbook";
const MONGODB_APP_NAME: &str = "eventbook";

/// Everything needed to reach the store, resolved once at startup.
#[derive(Clone, Default)]
pub struct MongoDBConfig {
    /// Connection string for the deployment, e.g. `mongodb://localhost:27017`
    /// or `mongodb+srv://cluster0.example.mongodb.net`.
    pub uri: String,

    /// Overrides any credentials named in `uri`. `password` is only used
    /// alongside a username.
    pub username: Option<String>,

    pub password: Option<String>,

    /// Overrides any database named in `uri`.
    pub database: Option<String>,
}

impl std::fmt::Debug for MongoDBConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoDBConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Debug)]
pub struct MongoDBStorage(Client);

impl MongoDBStorage {
    pub async fn new(uri: &str) -> Result<Self, mongodb::error::Error> {
        Self::connect(&MongoDBConfig {
            uri: uri.to_string(),
            ..Default::default()
        })
        .await
    }

    /// Build a client for `config`. The driver connects lazily, so callers
    /// should [`Storage::ping`] before relying on the handle.
    pub async fn connect(config: &MongoDBConfig) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(MONGODB_APP_NAME.into());

        if let Some(username) = &config.username {
            let mut credential = options.credential.take().unwrap_or_default();
            credential.username = Some(username.clone());
            credential.password = config.password.clone();
            options.credential = Some(credential);
        }

        if let Some(database) = &config.database {
            options.default_database = Some(database.clone());
        }

        let client = Client::with_options(options)?;
        Ok(Self(client))
    }

    fn get_db(&self) -> Database {
        self.0
            .default_database()
            .unwrap_or_else(|| self.0.database(MONGODB_DEFAULT_DATABASE))
    }

    fn events(&self) -> Collection<DbEvent> {
        self.get_db().collection::<DbEvent>(MONGODB_COLLECTION_EVENTS)
    }

    fn users(&self) -> Collection<DbUser> {
        self.get_db().collection::<DbUser>(MONGODB_COLLECTION_USERS)
    }
}

#[async_trait]
impl Storage for MongoDBStorage {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), StoreError> {
        self.get_db().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for MongoDBStorage {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<DbEvent>, StoreError> {
        self.events()
            .find(doc! {})
            .await?
            .try_collect()
            .await
            .map_err(StoreError::MongoDB)
    }

    #[instrument(skip(self, event), fields(title = %event.title))]
    async fn create(&self, mut event: DbEvent) -> Result<DbEvent, StoreError> {
        let result = self.events().insert_one(&event).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::internal("Inserted event has no ObjectId"))?;

        debug!(event_id = %id, "Event stored");
        event.id = Some(id);
        Ok(event)
    }
}

#[async_trait]
impl UserStore for MongoDBStorage {
    #[instrument(skip(self))]
    async fn get(&self, id: ObjectId) -> Result<Option<DbUser>, StoreError> {
        self.users()
            .find_one(doc! { "_id": id })
            .await
            .map_err(StoreError::MongoDB)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> Result<Option<DbUser>, StoreError> {
        self.users()
            .find_one(doc! { "email": email })
            .await
            .map_err(StoreError::MongoDB)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, mut user: DbUser) -> Result<DbUser, StoreError> {
        let result = self.users().insert_one(&user).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::internal("Inserted user has no ObjectId"))?;

        debug!(user_id = %id, "User stored");
        user.id = Some(id);
        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_id = ?user.id))]
    async fn append_created_event(
        &self,
        user: &mut DbUser,
        event_id: ObjectId,
    ) -> Result<(), StoreError> {
        let id = user.id.ok_or(StoreError::NotFound)?;

        let result = self
            .users()
            .update_one(
                doc! { "_id": id },
                doc! { "$push": { "createdEvents": event_id } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }

        user.created_events.push(event_id);
        Ok(())
    }
}
