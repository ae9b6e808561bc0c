//! The GraphQL surface: one query and two mutations.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result, Schema};
use eventbook_common::{
    caller::Caller,
    params::{EventInput, UserInput},
    views::{Event, User},
};
use eventbook_db::storage::Storage;

use crate::{error::ApiError, resolvers};

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema around a connected store. The request's [`Caller`] is
/// expected as per-request data.
pub fn build(db: Arc<dyn Storage>) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .finish()
}

/// The schema in SDL form.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

fn storage<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn Storage>> {
    ctx.data::<Arc<dyn Storage>>()
}

fn caller<'a>(ctx: &Context<'a>) -> Result<&'a Caller> {
    ctx.data::<Caller>()
}

/// Settle a mutation's outcome inside its own field: a failure is recorded
/// against the field and resolves to `null`, leaving the rest of `data` intact.
fn nullable_field<T>(ctx: &Context<'_>, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            ctx.add_error(e.extend().into_server_error(ctx.item.pos));
            None
        }
    }
}

fn required<T>(input: Option<T>, name: &str) -> Result<T, ApiError> {
    input.ok_or_else(|| ApiError::bad_user_input(format!("Argument \"{name}\" is required.")))
}

pub struct QueryRoot;

#[Object(name = "RootQuery")]
impl QueryRoot {
    /// Every event, in store order.
    async fn events(&self, ctx: &Context<'_>) -> Result<Vec<Event>> {
        let db = storage(ctx)?;
        resolvers::list_events(db.as_ref())
            .await
            .map_err(|e: ApiError| e.extend())
    }
}

pub struct MutationRoot;

#[Object(name = "RootMutation")]
impl MutationRoot {
    /// Create an event attributed to the requesting user.
    async fn create_event(
        &self,
        ctx: &Context<'_>,
        event_input: Option<EventInput>,
    ) -> Result<Option<Event>> {
        let db = storage(ctx)?;
        let caller = caller(ctx)?;

        let result = match required(event_input, "eventInput") {
            Ok(input) => resolvers::create_event(db.as_ref(), caller, input).await,
            Err(e) => Err(e),
        };
        Ok(nullable_field(ctx, result))
    }

    /// Register a user. The returned password is always empty.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        user_input: Option<UserInput>,
    ) -> Result<Option<User>> {
        let db = storage(ctx)?;

        let result = match required(user_input, "userInput") {
            Ok(input) => resolvers::create_user(db.as_ref(), input).await,
            Err(e) => Err(e),
        };
        Ok(nullable_field(ctx, result))
    }
}
