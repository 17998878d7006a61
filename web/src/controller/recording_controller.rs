//! Controller for Zoom cloud recording operations.
//!
//! Lists every recording of the account and deletes single recordings or a
//! meeting's whole recording set.

use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use domain::gateway::zoom::{Recording, RecordingFile};
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IndexParams {
    /// Earliest meeting date to include (YYYY-MM-DD). Defaults to the configured start date.
    pub from: Option<NaiveDate>,
}

/// A recorded meeting as returned to clients: only its MP4 files are listed.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordingSummary {
    pub id: u64,
    /// Meeting duration in minutes.
    pub duration: i64,
    /// MP4 recording files with every attribute Zoom reports for them.
    #[schema(value_type = Vec<Object>)]
    pub recordings: Vec<RecordingFile>,
}

impl From<Recording> for RecordingSummary {
    fn from(recording: Recording) -> Self {
        Self {
            id: recording.id,
            duration: recording.duration,
            recordings: recording
                .recording_files
                .into_iter()
                .filter(RecordingFile::is_mp4)
                .collect(),
        }
    }
}

/// Identifies one recording file. Ids may be sent as strings or numbers.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordingParams {
    #[schema(value_type = Option<String>, example = "85012345678")]
    meeting_id: Option<Value>,
    #[schema(value_type = Option<String>)]
    record_id: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMeetingRecordingsParams {
    #[schema(value_type = Option<String>, example = "85012345678")]
    meeting_id: Option<Value>,
}

/// Non-empty string or non-zero numeric id, as text.
fn identifier(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.is_empty() => Some(id),
        Value::Number(id) if id.as_f64() != Some(0.0) => Some(id.to_string()),
        _ => None,
    }
}

/// GET all recordings of the account
#[utoipa::path(
    get,
    path = "/getRecordings",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved all recordings", body = [RecordingSummary]),
        (status = 400, description = "Malformed from date"),
        (status = 500, description = "Failed to fetch recordings")
    )
)]
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all recordings from: {:?}", params.from);

    let recordings = app_state.recordings.list_all_recordings(params.from).await?;

    let summaries: Vec<RecordingSummary> = recordings
        .into_iter()
        .map(RecordingSummary::from)
        .collect();

    debug!("Found {} recordings", summaries.len());

    Ok(Json(summaries))
}

/// DELETE a single recording file of a meeting
#[utoipa::path(
    delete,
    path = "/deleteRecording",
    request_body = DeleteRecordingParams,
    responses(
        (status = 200, description = "Recording deleted"),
        (status = 400, description = "meetingId and recordId are required"),
        (status = 500, description = "Failed to delete recording")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    body: Option<Json<DeleteRecordingParams>>,
) -> Result<impl IntoResponse, Error> {
    let params = body.map(|Json(params)| params).unwrap_or_default();

    let (Some(meeting_id), Some(record_id)) =
        (identifier(params.meeting_id), identifier(params.record_id))
    else {
        warn!("DELETE recording rejected: meetingId and recordId are required");
        return Err(Error::MissingRecordingIds);
    };

    debug!("DELETE recording {record_id} of meeting {meeting_id}");

    if app_state
        .recordings
        .delete_recording(&meeting_id, &record_id)
        .await
    {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(Error::DeleteRecording)
    }
}

/// DELETE every recording of a meeting (moved to trash)
#[utoipa::path(
    delete,
    path = "/deleteMeetingRecordings",
    request_body = DeleteMeetingRecordingsParams,
    responses(
        (status = 200, description = "Meeting recordings moved to trash"),
        (status = 400, description = "meetingId is required"),
        (status = 500, description = "Failed to delete meeting recordings")
    )
)]
pub async fn delete_all(
    State(app_state): State<AppState>,
    body: Option<Json<DeleteMeetingRecordingsParams>>,
) -> Result<impl IntoResponse, Error> {
    let params = body.map(|Json(params)| params).unwrap_or_default();

    let Some(meeting_id) = identifier(params.meeting_id) else {
        warn!("DELETE meeting recordings rejected: meetingId is required");
        return Err(Error::MissingMeetingId);
    };

    debug!("DELETE all recordings of meeting {meeting_id}");

    if app_state
        .recordings
        .delete_all_meeting_recordings(&meeting_id)
        .await
    {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(Error::DeleteMeetingRecordings)
    }
}
