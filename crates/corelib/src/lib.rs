//! Shared types: model-loading error taxonomy and math re-exports.

pub use glam::{Vec2, Vec3, vec2, vec3};

use std::path::PathBuf;

use thiserror::Error;

/// Failure modes of the model-loading pipeline.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("file unreadable: {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("mesh '{0}' has no vertex or index data")]
    EmptyMeshData(String),
    #[error("device resource creation failed: {0}")]
    DeviceResourceCreationFailed(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

impl LoadError {
    /// Classify an open/read failure for `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.into())
        } else {
            Self::FileUnreadable {
                path: path.into(),
                source,
            }
        }
    }
}
