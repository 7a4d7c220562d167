//! Feedback form core
//!
//! Collects a feedback category, free-form text, an optional rating and an
//! optional terminal screenshot, then hands the assembled payload to a
//! submission sink.

pub mod capture;
pub mod config;
pub mod error;
pub mod feedback;
pub mod input;
pub mod platform;
pub mod submit;

pub use capture::{CaptureClientTrait, CaptureConfig, ScreenCapture};
pub use config::FeedbackConfig;
pub use error::CaptureError;
pub use feedback::{
    Category, ExtraValue, Extras, FeedbackDraft, FormController, FormView, Notice, NoticeLevel,
    Rating, SubmissionPayload, SubmitOutcome,
};
pub use input::{map_key, FormAction, FormFocus, InputEvent};
pub use submit::{CallbackSink, FeedbackSinkTrait, FileSink};
