//! Output views for the various operations within eventbook.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod event;
pub use event::*;

mod user;
pub use user::*;

/// An error response for a REST endpoint. This is used to return errors to
/// the client in a consistent format.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// An optional error code that can be used to identify the type of error
    /// that occurred.
    pub code: Option<String>,

    /// A human-readable message describing the error that occurred.
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
