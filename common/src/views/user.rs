use async_graphql::{ComplexObject, ID, SimpleObject};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct User {
    /// The unique identifier for this user.
    pub id: ID,

    /// The user's email address.
    pub email: String,

    /// Always empty. The stored digest never leaves the storage layer.
    pub password: String,
}

#[ComplexObject]
impl User {
    /// The identifier under the document store's field name.
    #[graphql(name = "_id")]
    async fn store_id(&self) -> ID {
        self.id.clone()
    }
}
