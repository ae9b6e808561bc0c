use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallerError {
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },
}

impl CallerError {
    pub fn unauthorized(reason: Option<String>) -> Self {
        Self::Unauthorized {
            reason: reason.unwrap_or_else(|| "No reason provided".to_string()),
        }
    }
}

/// The identity a request acts on behalf of.
///
/// There is no login flow, so every request is currently handed the same
/// configured user. Operations that attribute records to somebody take a
/// `Caller` rather than reaching for that constant themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// A user, identified by the string form of their store id.
    User { id: String },
    Unauthenticated,
}

impl Caller {
    /// Build the caller for a configured identity. A blank id yields an
    /// unauthenticated caller.
    pub fn from_identity(id: &str) -> Self {
        let id = id.trim();
        if id.is_empty() {
            Caller::Unauthenticated
        } else {
            Caller::User { id: id.to_string() }
        }
    }

    /// The id of the user behind this caller.
    #[tracing::instrument(skip(self))]
    pub fn user_id(&self) -> Result<&str, CallerError> {
        match self {
            Caller::User { id } => Ok(id),
            Caller::Unauthenticated => Err(CallerError::unauthorized(Some(
                "Caller is not authenticated".into(),
            ))),
        }
    }
}
