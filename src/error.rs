//! Defines the app level error type and its conversion to HTTP responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::not_found::get_404_not_found_response;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month in a report query is not an English month name or a number
    /// from 1 to 12.
    ///
    /// Month names are case-sensitive, e.g. "March" is valid but "march" is not.
    #[error("invalid month \"{0}\": expected an English month name (e.g. \"March\") or 1-12")]
    InvalidMonth(String),

    /// The year in a report query cannot be used to build a date range.
    #[error("invalid year {0}")]
    InvalidYear(i32),

    /// The page or page size of a listing query is out of bounds.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The seed data could not be downloaded.
    ///
    /// Covers network failures and non-success HTTP status codes.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// The seed data was downloaded or read but is not a JSON array of
    /// transactions.
    #[error("could not parse seed data: {0}")]
    SeedFormat(String),

    /// A request or response body could not be read in full.
    #[error("could not read body: {0}")]
    BodyRead(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code the client should see for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidYear(_) | Error::InvalidPagination(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidMonth(_) | Error::InvalidYear(_) | Error::InvalidPagination(_) => {
                (self.status_code(), self.to_string()).into_response()
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (error.status_code(), error.to_string()).into_response()
            }
        }
    }
}
