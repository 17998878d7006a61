use crate::controller::{health_check_controller, recording_controller};
use crate::AppState;
use axum::{
    routing::{delete, get},
    Json, Router,
};

use utoipa::OpenApi;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Zoom Recordings Manager API"
        ),
        paths(
            health_check_controller::health_check,
            recording_controller::index,
            recording_controller::delete,
            recording_controller::delete_all,
        ),
        components(
            schemas(
                recording_controller::RecordingSummary,
                recording_controller::DeleteRecordingParams,
                recording_controller::DeleteMeetingRecordingsParams,
            )
        ),
        tags(
            (name = "recordings_manager", description = "Zoom cloud recording listing and cleanup")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(recording_routes(app_state))
        .merge(api_doc_routes())
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn recording_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/getRecordings", get(recording_controller::index))
        .route("/deleteRecording", delete(recording_controller::delete))
        .route(
            "/deleteMeetingRecordings",
            delete(recording_controller::delete_all),
        )
        .with_state(app_state)
}

fn api_doc_routes() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
