use std::sync::Arc;

use eventbook_common::caller::Caller;
use eventbook_db::storage::Storage;

use crate::schema::ApiSchema;

#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<dyn Storage>,
    pub schema: ApiSchema,

    /// Identity attached to every GraphQL request.
    pub caller: Caller,

    pub graphiql: bool,
}

impl ApiContext {
    pub fn new(db: Arc<dyn Storage>, caller: Caller, graphiql: bool) -> Self {
        let schema = crate::schema::build(db.clone());
        Self {
            db,
            schema,
            caller,
            graphiql,
        }
    }
}
