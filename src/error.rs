//! Error handling.

use axum::{
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{event, Level};

/// Climate API error type
///
/// This type encapsulates the various errors that may occur while opening or querying the
/// climate database.
#[derive(Debug, Error)]
pub enum ClimateApiError {
    /// The database file does not exist
    #[error("climate database not found at {path}")]
    DatabaseNotFound { path: String },

    /// A table expected by the service is absent
    #[error("climate database has no {table} table")]
    MissingTable { table: &'static str },

    /// A column expected by the service is absent
    #[error("climate database table {table} has no {column} column")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    /// Error acquiring a database session from the pool
    #[error("failed to acquire a database session")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// Error executing a database query
    #[error("database query failed")]
    Query(#[from] diesel::result::Error),

    /// A date read from the database is not an ISO date
    #[error("invalid date {date} in climate database")]
    StoredDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Error joining a blocking query task
    #[error("query task failed")]
    Task(#[from] JoinError),
}

impl IntoResponse for ClimateApiError {
    /// Convert from a `ClimateApiError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// Body of error response
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorBody {
    /// Main error message
    message: String,

    /// Optional list of causes
    #[serde(skip_serializing_if = "Option::is_none")]
    caused_by: Option<Vec<String>>,
}

impl ErrorBody {
    /// Return a new ErrorBody
    ///
    /// # Arguments
    ///
    /// * `error`: The error that occurred
    fn new<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        let message = error.to_string();
        let mut causes = Vec::new();
        let mut current = error.source();
        while let Some(source) = current {
            causes.push(source.to_string());
            current = source.source();
        }
        causes.dedup();
        let caused_by = (!causes.is_empty()).then_some(causes);
        ErrorBody { message, caused_by }
    }
}

/// A response to send in error cases
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorResponse {
    /// HTTP status of the response
    #[serde(skip)]
    status: StatusCode,

    /// Response body
    error: ErrorBody,
}

impl ErrorResponse {
    /// Return a 500 internal server error ErrorResponse
    fn internal_server_error<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        ErrorResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ErrorBody::new(error),
        }
    }
}

impl From<ClimateApiError> for ErrorResponse {
    /// Convert from a `ClimateApiError` into an `ErrorResponse`.
    ///
    /// Every failure is a store failure from the caller's point of view, so all variants map to
    /// an internal server error.
    fn from(error: ClimateApiError) -> Self {
        let response = Self::internal_server_error(&error);

        event!(Level::ERROR, "{}", error.to_string());
        let mut current = error.source();
        while let Some(source) = current {
            event!(Level::ERROR, "Caused by: {}", source.to_string());
            current = source.source();
        }

        response
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Renders the response as JSON.
    fn into_response(self) -> Response {
        let json_body = serde_json::to_string_pretty(&self);
        match json_body {
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialise error response: {}", err),
            )
                .into_response(),
            Ok(json_body) => (
                self.status,
                [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                json_body,
            )
                .into_response(),
        }
    }
}
