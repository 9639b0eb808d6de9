//! Error handling primitives shared across the core.

use std::path::PathBuf;

use thiserror::Error;

/// Stable error codes surfaced in logs and JSON error bodies.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    /// A required artifact is absent from local storage.
    ArtifactMissing = 1,
    /// The remote artifact source could not be reached or refused the request.
    FetchFailed = 2,
    /// An artifact exists but could not be read or decoded.
    ArtifactInvalid = 3,
    /// The encoded row does not fit the classifier's expected input.
    ShapeMismatch = 4,
    /// Input failed a presence check.
    InvalidInput = 5,
}

/// Canonical error type for the core.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("feature list not found at {}", .0.display())]
    FeaturesMissing(PathBuf),

    #[error("model download failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("model download from {url} returned status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid feature list: {0}")]
    InvalidFeatures(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("classifier expects {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("column {index} should be `{expected}`, got `{got}`")]
    ColumnOrder {
        index: usize,
        expected: String,
        got: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used throughout the crate.
pub type DashResult<T> = Result<T, DashError>;

impl DashError {
    /// Machine parsable code for the error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DashError::FeaturesMissing(_) => ErrorCode::ArtifactMissing,
            DashError::Fetch(_) | DashError::FetchStatus { .. } => ErrorCode::FetchFailed,
            DashError::Io { .. }
            | DashError::Decode { .. }
            | DashError::InvalidFeatures(_)
            | DashError::InvalidModel(_) => ErrorCode::ArtifactInvalid,
            DashError::ShapeMismatch { .. } | DashError::ColumnOrder { .. } => {
                ErrorCode::ShapeMismatch
            }
            DashError::InvalidInput(_) => ErrorCode::InvalidInput,
        }
    }

    /// IO error helper binding the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DashError::Io {
            path: path.into(),
            source,
        }
    }

    /// Validation helper.
    pub fn invalid(msg: impl Into<String>) -> Self {
        DashError::InvalidInput(msg.into())
    }

    /// Model structure helper.
    pub fn invalid_model(msg: impl Into<String>) -> Self {
        DashError::InvalidModel(msg.into())
    }
}
