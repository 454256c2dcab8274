use thiserror::Error;

/// Failure modes of the direct-to-socket Docker client.
///
/// `Daemon` keeps the raw response body verbatim; daemon error bodies are
/// JSON objects with a `message` field but are not reparsed here.
#[derive(Debug, Error)]
pub enum DockerError {
    #[error("Docker socket '{path}' unreachable: {reason}")]
    Transport { path: String, reason: String },

    #[error("Invalid container identifier: {reason}")]
    InvalidArgument { reason: String },

    #[error("Docker daemon returned HTTP {status}: {body}")]
    Daemon { status: u16, body: String },

    #[error("Failed to decode daemon response: {reason}")]
    Decode { reason: String },

    #[error("Docker request canceled after {timeout_secs}s")]
    Canceled { timeout_secs: u64 },
}

impl DockerError {
    pub fn error_code(&self) -> &'static str {
        use crate::errors::codes::ErrorCode;

        match self {
            DockerError::Transport { .. } => ErrorCode::DOCKER_SOCKET_UNREACHABLE,
            DockerError::InvalidArgument { .. } => ErrorCode::DOCKER_INVALID_CONTAINER_ID,
            DockerError::Daemon { .. } => ErrorCode::DOCKER_DAEMON_REJECTED,
            DockerError::Decode { .. } => ErrorCode::DOCKER_RESPONSE_DECODE_FAILED,
            DockerError::Canceled { .. } => ErrorCode::DOCKER_REQUEST_CANCELED,
        }
    }
}
