//! Screenshot capture collaborators

mod screen;
mod traits;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use screen::{FrameSnapshot, ScreenCapture};
pub use traits::CaptureClientTrait;

#[cfg(test)]
pub use traits::MockCaptureClientTrait;

/// Options passed to the capture collaborator on every capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Wait this long before grabbing the frame
    pub delay_ms: u64,
    /// Strip trailing blanks from each captured row
    pub trim_trailing_whitespace: bool,
}

impl CaptureConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            trim_trailing_whitespace: true,
        }
    }
}
