//! Trait abstraction for screen capture to enable mocking in tests

use super::CaptureConfig;
use crate::error::CaptureError;
use async_trait::async_trait;

/// Renders the current screen into an image buffer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptureClientTrait: Send + Sync {
    /// Capture the screen. Either returns the complete image or an error;
    /// never a partial buffer.
    async fn capture(&self, config: &CaptureConfig) -> Result<Vec<u8>, CaptureError>;
}
