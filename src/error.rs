//! Error types for the capture lifecycle

use thiserror::Error;

/// Reasons a screenshot could not be taken.
///
/// Every variant is recovered inside the form: the previous screenshot is
/// kept and the user sees a transient notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// No capture collaborator was configured for this form
    #[error("screen capture is not available")]
    Unavailable,

    /// The collaborator cannot capture in the current environment
    #[error("screen capture is not supported: {0}")]
    Unsupported(String),

    /// The collaborator tried and failed
    #[error("screen capture failed: {0}")]
    Failed(String),
}

impl CaptureError {
    /// Short message suitable for a transient notice
    pub fn notice_message(&self) -> String {
        match self {
            CaptureError::Unavailable => "Screenshots are not available here".to_string(),
            CaptureError::Unsupported(reason) => format!("Cannot take screenshot: {reason}"),
            CaptureError::Failed(reason) => format!("Screenshot failed: {reason}"),
        }
    }
}
