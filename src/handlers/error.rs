use axum::http::StatusCode;
use axum::{response::IntoResponse, Json};
use serde::Serialize;

use crate::errors::docker::DockerError;
use crate::errors::{DocksideError, HasErrorCode};

#[derive(Serialize)]
struct Problem<'a> {
    title: &'a str,
    detail: String,
    code: &'a str,
}

fn map_error(err: &DocksideError) -> StatusCode {
    use DocksideError::*;
    match err {
        Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Docker(e) => map_docker_error(e),
        Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn map_docker_error(err: &DockerError) -> StatusCode {
    use DockerError::*;
    match err {
        InvalidArgument { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Canceled { .. } => StatusCode::GATEWAY_TIMEOUT,
        // The daemon was unreachable, refused the operation, or answered
        // with something unparseable; all are upstream failures here.
        Transport { .. } | Daemon { .. } | Decode { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for DocksideError {
    fn into_response(self) -> axum::response::Response {
        let status = map_error(&self);
        let problem = Problem {
            title: status.canonical_reason().unwrap_or("error"),
            detail: self.to_string(),
            code: self.error_code(),
        };
        (status, Json(problem)).into_response()
    }
}
