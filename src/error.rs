use thiserror::Error;

use crate::report::FailureKind;

#[derive(Error, Debug)]
pub enum MigratorError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitLab API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to migrate {kind} {path}: {source}")]
    Item {
        kind: FailureKind,
        path: String,
        source: Box<MigratorError>,
    },
}

impl MigratorError {
    /// True when the remote answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// True when a create call was rejected because the resource is already there.
    ///
    /// GitLab answers 409 for most conflicts, but project creation reports a taken
    /// name or path as a 400 validation error.
    pub fn is_already_exists(&self) -> bool {
        match self {
            Self::ApiError { status: 409, .. } => true,
            Self::ApiError {
                status: 400,
                message,
            } => message.contains("has already been taken"),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MigratorError>;
