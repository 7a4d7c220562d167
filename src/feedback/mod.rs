//! Feedback form domain layer
//!
//! The draft being edited, the payload handed to the sink, and the
//! controller that owns both along with the capture lifecycle.

mod controller;
mod draft;
mod notice;
mod payload;

pub use controller::{
    CaptureState, FormController, FormView, PendingCapture, PendingSubmission, SubmitOutcome,
};
pub use draft::{
    Category, ExtraValue, Extras, FeedbackDraft, Rating, FEEDBACK_TEXT_KEY, FEEDBACK_TYPE_KEY,
    RATING_KEY, SCREENSHOT_KEY, UNSET_CATEGORY,
};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use payload::SubmissionPayload;
