//! User-facing edit errors.
//!
//! Every variant is recovered where the edit was started. None of them end the session,
//! and none of them touch the edit history.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Camera or library access refused.
    #[error("permission denied: {resource}")]
    PermissionDenied { resource: String },

    #[error("no image selected")]
    NoImageSelected,

    #[error("no filter selected")]
    NoFilterSelected,

    /// The filter service answered with a non-2xx status.
    #[error("filter service returned status {status}: {body}")]
    ServiceUnavailable { status: u16, body: String },

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response from filter service: {0}")]
    InvalidResponse(String),

    #[error("transform failed: {0}")]
    Transform(String),

    #[error("invalid image payload: {0}")]
    InvalidImage(String),
}

impl EditError {
    /// Errors that came from talking to the remote service rather than from user input.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            EditError::ServiceUnavailable { .. }
                | EditError::Network(_)
                | EditError::InvalidResponse(_)
        )
    }
}
