//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The remote dataset could not be fetched, or it was not a JSON array.
    ///
    /// The string holds the underlying transport or decoding error.
    #[error("could not fetch the seed data: {0}")]
    FetchError(String),

    /// A seed document could not be turned into a transaction record.
    ///
    /// `index` is the position of the document in the seed array.
    #[error("invalid transaction document at index {index}: {reason}")]
    InvalidDocument {
        /// Position of the offending document in the seed array.
        index: usize,
        /// Why the document was rejected.
        reason: String,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The blocking task that runs a database query panicked or was cancelled.
    #[error("the database task did not complete: {0}")]
    BlockingTaskFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::FetchError(value.to_string())
    }
}

/// The JSON body sent with every error response.
#[derive(Debug, Serialize)]
struct ErrorMessage<'a> {
    message: &'a str,
}

/// Build a 500 response with a JSON body of the form `{"message": ...}`.
pub(crate) fn internal_server_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorMessage { message }),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_message_response("Something went wrong")
    }
}

impl Error {
    /// Log the error and convert it into a 500 response carrying `message`.
    ///
    /// The error details only go to the server logs, the client only ever
    /// sees `message`.
    pub fn into_message_response(self, message: &str) -> Response {
        tracing::error!("{message}: {self}");
        internal_server_error(message)
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    async fn get_json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");

        serde_json::from_slice(&body).expect("Response body is not JSON")
    }

    #[tokio::test]
    async fn message_response_is_500_with_message() {
        let response = Error::FetchError("connection refused".to_owned())
            .into_message_response("Error seeding database");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            get_json_body(response).await,
            serde_json::json!({"message": "Error seeding database"})
        );
    }

    #[tokio::test]
    async fn error_details_are_not_sent_to_the_client() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = get_json_body(response).await;
        assert_eq!(body, serde_json::json!({"message": "Something went wrong"}));
    }
}
