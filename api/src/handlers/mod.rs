use axum::extract::State;
use eventbook_db::storage::Storage;

use crate::{context::ApiContext, error::ApiError};

pub mod graphql;

#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "The store is reachable", body = String),
        (status = 503, description = "The store is unreachable"),
    )
)]
pub async fn health_check(State(ctx): State<ApiContext>) -> Result<&'static str, ApiError> {
    ctx.db
        .ping()
        .await
        .map_err(|e| ApiError::unavailable(e.to_string()))?;
    Ok("Healthy")
}
