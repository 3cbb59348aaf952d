//! `POST /generate`: relative offsets in, Litchi CSV attachment out.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use wpgen_core::{
    export, parse_generate_request, project, to_csv_string, write_csv_file, Error, OutputTarget,
};

use crate::state::AppState;

/// JSON body returned with every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub field: Option<String>,
    pub waypoint_index: Option<usize>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
            waypoint_index: None,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorBody>);

pub async fn generate_csv(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::message(format!("Invalid JSON body: {}", err))),
        )
    })?;

    let request = parse_generate_request(&payload).map_err(|err| reject(err.into()))?;
    if !request.skipped.is_empty() {
        tracing::warn!(
            "Skipped {} unrecognized waypoint entries at {:?}",
            request.skipped.len(),
            request.skipped
        );
    }

    let waypoints = project(&request.initial, &request.waypoints).map_err(reject)?;
    let rows = export(&request.initial, &waypoints, &request.config)
        .map_err(|err| reject(err.into()))?;
    let csv = to_csv_string(&rows).map_err(|err| reject(err.into()))?;

    let namer = state.namer();
    let target = tokio::task::spawn_blocking(move || -> Result<OutputTarget, Error> {
        let target = namer.next_destination()?;
        write_csv_file(&target, &rows)?;
        Ok(target)
    })
    .await
    .map_err(|err| {
        tracing::error!("CSV writer task failed: {}", err);
        write_failed()
    })?
    .map_err(reject)?;

    tracing::info!(
        "Run #{} ({:?} mode): saved '{}' ({} waypoints)",
        target.label,
        state.config().output_mode,
        target.path.display(),
        waypoints.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", target.file_name());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

fn write_failed() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::message("Failed to write CSV")),
    )
}

fn reject(err: Error) -> ApiError {
    match err {
        Error::Validation(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                error: err.to_string(),
                field: Some(err.field),
                waypoint_index: err.waypoint_index,
            }),
        ),
        Error::Geodesic {
            waypoint_index,
            source,
        } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                error: source.to_string(),
                field: None,
                waypoint_index: Some(waypoint_index),
            }),
        ),
        Error::Output(err) => {
            tracing::error!("Failed to write CSV: {}", err);
            write_failed()
        }
    }
}
