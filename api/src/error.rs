use async_graphql::ErrorExtensions;
use axum::{Json, response::IntoResponse};
use eventbook_common::{caller::CallerError, views::ApiErrorResponse};
use eventbook_db::{password::BcryptError, storage::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User not found.")]
    UserNotFound,

    #[error("User exists already.")]
    UserExists,

    #[error("{0}")]
    BadUserInput(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] BcryptError),

    #[error(transparent)]
    CallerError(#[from] CallerError),

    #[error(transparent)]
    InternalAnyhow(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_user_input(message: impl Into<String>) -> Self {
        Self::BadUserInput(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Machine readable error code, shared by the GraphQL and REST surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UserNotFound => "NOT_FOUND",
            ApiError::UserExists => "CONFLICT",
            ApiError::BadUserInput(_) => "BAD_USER_INPUT",
            ApiError::Unavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::Storage(se) => match se {
                StoreError::NotFound => "NOT_FOUND",
                StoreError::InvalidId(_) => "BAD_USER_INPUT",
                _ => "STORE_FAILURE",
            },
            ApiError::CallerError(_) => "UNAUTHENTICATED",
            ApiError::Password(_) | ApiError::InternalAnyhow(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        ApiErrorResponse {
            code: Some(err.code().into()),

            message: match &err {
                ApiError::UserNotFound => "The requested resource was not found.".into(),
                ApiError::UserExists => "The resource already exists.".into(),
                ApiError::BadUserInput(message) => message.clone(),
                ApiError::Unavailable(_) => {
                    "The service is not ready to handle requests.".into()
                }
                ApiError::CallerError(_) => {
                    "You are not authenticated to perform this action.".into()
                }
                ApiError::Storage(_) | ApiError::Password(_) | ApiError::InternalAnyhow(_) => {
                    "Something went wrong on our end. Please try again later.".into()
                }
            },

            #[cfg(debug_assertions)]
            details: Some(err.to_string()),

            #[cfg(not(debug_assertions))]
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Error returned by handler: {self}");

        let status_code = match &self {
            Self::UserNotFound => axum::http::StatusCode::NOT_FOUND,
            Self::UserExists => axum::http::StatusCode::CONFLICT,
            Self::BadUserInput(_) => axum::http::StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(se) => match se {
                StoreError::NotFound => axum::http::StatusCode::NOT_FOUND,
                StoreError::InvalidId(_) => axum::http::StatusCode::BAD_REQUEST,
                _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::CallerError(_) => axum::http::StatusCode::UNAUTHORIZED,
            Self::Password(_) | Self::InternalAnyhow(_) => {
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status_code, Json(Into::<ApiErrorResponse>::into(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_graphql_error_carries_code() {
        let err = ApiError::UserExists.extend();
        assert_eq!(err.message, "User exists already.");

        let extensions = err.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("CONFLICT"))
        );
    }

    #[test]
    fn test_store_errors_keep_their_message() {
        let err = ApiError::from(StoreError::InvalidId("nope".into()));
        assert_eq!(err.to_string(), "Invalid id: nope");
        assert_eq!(err.code(), "BAD_USER_INPUT");

        let err = ApiError::from(StoreError::internal("write conflict"));
        assert_eq!(err.to_string(), "write conflict");
        assert_eq!(err.code(), "STORE_FAILURE");
    }

    #[test]
    fn test_not_found_codes() {
        assert_eq!(ApiError::UserNotFound.code(), "NOT_FOUND");
        assert_eq!(ApiError::from(StoreError::NotFound).code(), "NOT_FOUND");
    }

    #[test]
    fn test_unavailable_response_status() {
        let response = ApiError::unavailable("store unreachable").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_error_response_body() {
        let body: ApiErrorResponse = ApiError::UserNotFound.into();
        assert_eq!(body.code.as_deref(), Some("NOT_FOUND"));
        assert_eq!(body.message, "The requested resource was not found.");
    }
}
