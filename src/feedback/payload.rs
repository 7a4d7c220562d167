//! Finalized submission payload

use super::draft::{ExtraValue, Extras, FeedbackDraft, SCREENSHOT_KEY};
use serde::Serialize;

/// What the submission sink receives. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    text: String,
    extras: Extras,
}

impl SubmissionPayload {
    /// Assemble a payload from the draft and the current screenshot.
    ///
    /// Draft extras go in first and the screenshot is inserted last so it
    /// always wins a key collision.
    pub(crate) fn assemble(draft: &FeedbackDraft, screenshot: Option<&[u8]>) -> Self {
        let mut extras = draft.to_extras();
        if let Some(bytes) = screenshot {
            extras.insert(SCREENSHOT_KEY.to_string(), ExtraValue::Bytes(bytes.to_vec()));
        }
        Self {
            text: draft.text().to_string(),
            extras,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    pub fn screenshot(&self) -> Option<&[u8]> {
        self.extras.get(SCREENSHOT_KEY).and_then(ExtraValue::as_bytes)
    }

    pub fn into_parts(self) -> (String, Extras) {
        (self.text, self.extras)
    }
}
