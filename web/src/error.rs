use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::Error as DomainError;

extern crate log;
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

/// Failures surfaced by the HTTP facade. Each maps to a fixed client-facing
/// message; details stay in the server log.
#[derive(Debug)]
pub enum Error {
    FetchRecordings(DomainError),
    DeleteRecording,
    DeleteMeetingRecordings,
    MissingRecordingIds,
    MissingMeetingId,
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Error::FetchRecordings(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch recordings",
            ),
            Error::DeleteRecording => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete recording")
            }
            Error::DeleteMeetingRecordings => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete meeting recordings",
            ),
            Error::MissingRecordingIds => (
                StatusCode::BAD_REQUEST,
                "meetingId and recordId are required",
            ),
            Error::MissingMeetingId => (StatusCode::BAD_REQUEST, "meetingId is required"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if let Error::FetchRecordings(ref domain_error) = self {
            error!("Error fetching recordings: {domain_error}");
        }

        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Error::FetchRecordings(err)
    }
}
