//! Rendering error types

use crate::source::SourceError;
use thiserror::Error;

/// Errors that abort a render pass
#[derive(Error, Debug)]
pub enum ScopeError {
    /// The pixel surface cannot hold a plot area
    #[error("Invalid plot geometry: {0}")]
    Geometry(String),

    /// The source could not supply a sample inside the visible range
    #[error("Audio source failed during render: {0}")]
    Source(#[from] SourceError),
}

/// Result type for scope operations
pub type ScopeResult<T> = Result<T, ScopeError>;
