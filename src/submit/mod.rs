//! Submission sinks

mod callback;
mod file_sink;
mod traits;

pub use callback::CallbackSink;
pub use file_sink::{FileSink, StoredSubmission};
pub use traits::FeedbackSinkTrait;

#[cfg(test)]
pub use traits::MockFeedbackSinkTrait;
