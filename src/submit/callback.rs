//! Sink that forwards to a caller-supplied async closure

use super::FeedbackSinkTrait;
use crate::feedback::Extras;
use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

/// Wraps a submission callback so it can be handed to the form
pub struct CallbackSink<F> {
    callback: F,
}

impl<F, Fut> CallbackSink<F>
where
    F: Fn(String, Extras) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

#[async_trait]
impl<F, Fut> FeedbackSinkTrait for CallbackSink<F>
where
    F: Fn(String, Extras) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn submit(&self, text: String, extras: Extras) -> Result<()> {
        (self.callback)(text, extras).await
    }
}
