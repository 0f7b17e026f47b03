use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("hook input has no target file path")]
    MissingTargetPath,

    #[error("invalid hook input: {0}")]
    InvalidInput(String),

    #[error("invalid settings file {path}: {reason}")]
    InvalidSettings { path: String, reason: String },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
