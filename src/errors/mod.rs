pub mod codes;
pub mod docker;

use thiserror::Error;

use crate::config::ConfigError;
use crate::errors::docker::DockerError;

pub type DocksideResult<T> = Result<T, DocksideError>;

pub trait HasErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, Error)]
pub enum DocksideError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Docker(#[from] DockerError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HasErrorCode for DocksideError {
    fn error_code(&self) -> &'static str {
        use crate::errors::codes::ErrorCode;

        match self {
            DocksideError::Config(e) => match e {
                ConfigError::Io(_) => ErrorCode::CONFIG_READ_FAILED,
                ConfigError::Yaml(_) => ErrorCode::CONFIG_PARSE_FAILED,
            },
            DocksideError::Docker(e) => e.error_code(),
            DocksideError::Internal(_) => "E000",
        }
    }
}
