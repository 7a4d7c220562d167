//! Trait abstraction for the submission sink to enable mocking in tests

use crate::feedback::Extras;
use anyhow::Result;
use async_trait::async_trait;

/// Receives finalized feedback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackSinkTrait: Send + Sync {
    /// Deliver one submission. Called exactly once per submit action; the
    /// form never retries on its own.
    async fn submit(&self, text: String, extras: Extras) -> Result<()>;
}
