use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::instrument;

use crate::context::ApiContext;

pub const GRAPHQL_PATH: &str = "/graphql";

/// POST /graphql
///
/// Execute a query or mutation on behalf of the configured caller.
#[instrument(skip_all)]
pub async fn graphql_handler(
    State(ctx): State<ApiContext>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner().data(ctx.caller.clone());
    ctx.schema.execute(request).await.into()
}

/// GET /graphql
///
/// The GraphiQL console, pointed back at this endpoint.
pub async fn graphiql(State(ctx): State<ApiContext>) -> Response {
    if !ctx.graphiql {
        return StatusCode::NOT_FOUND.into_response();
    }

    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response()
}
