//! Input parameters for the various operations within eventbook.

use async_graphql::InputObject;
use serde::{Deserialize, Serialize};

/// The fields supplied when creating an event.
#[derive(Debug, Clone, Deserialize, Serialize, InputObject)]
pub struct EventInput {
    pub title: String,
    pub description: String,

    /// Ticket price. No range check is applied, so negative prices are kept.
    pub price: f64,

    /// When the event takes place. Parsed leniently; text that is not a
    /// recognisable date is stored as an invalid date rather than rejected.
    pub date: String,
}

/// The fields supplied when registering a user.
#[derive(Debug, Clone, Deserialize, Serialize, InputObject)]
pub struct UserInput {
    pub email: String,

    /// Plaintext password. Only ever persisted as a bcrypt digest.
    pub password: String,
}
