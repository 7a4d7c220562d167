//! Feedback form controller
//!
//! Owns the draft and the screenshot state, guards the capture and submit
//! lifecycles, and republishes derived view state after every mutation.

use super::draft::{Category, FeedbackDraft, Rating};
use super::notice::{Notice, NoticeBoard};
use super::payload::SubmissionPayload;
use crate::capture::{CaptureClientTrait, CaptureConfig};
use crate::config::FeedbackConfig;
use crate::error::CaptureError;
use crate::input::FormAction;
use crate::submit::FeedbackSinkTrait;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Screenshot held by the form plus the in-flight flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureState {
    screenshot: Option<Vec<u8>>,
    is_capturing: bool,
}

impl CaptureState {
    pub fn screenshot(&self) -> Option<&[u8]> {
        self.screenshot.as_deref()
    }

    pub fn is_capturing(&self) -> bool {
        self.is_capturing
    }

    pub fn has_screenshot(&self) -> bool {
        self.screenshot.is_some()
    }
}

/// Derived state the UI binds its enabled/disabled flags to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormView {
    /// A category is chosen
    pub can_submit: bool,
    /// `can_submit` and no submission in flight
    pub submit_enabled: bool,
    pub capture_enabled: bool,
    pub retake_enabled: bool,
    pub clear_enabled: bool,
    pub preview_open: bool,
    pub is_capturing: bool,
    pub is_submitting: bool,
    pub has_screenshot: bool,
}

/// Result of a submit action that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The sink accepted the payload
    Submitted,
    /// Submit was not available (no category, or a submission in flight)
    Unavailable,
}

/// A capture that has been started but not yet run
pub struct PendingCapture {
    client: Arc<dyn CaptureClientTrait>,
    config: CaptureConfig,
}

impl PendingCapture {
    pub async fn run(self) -> Result<Vec<u8>, CaptureError> {
        self.client.capture(&self.config).await
    }
}

/// A submission that has been started but not yet delivered
pub struct PendingSubmission {
    sink: Arc<dyn FeedbackSinkTrait>,
    payload: SubmissionPayload,
}

impl PendingSubmission {
    pub fn payload(&self) -> &SubmissionPayload {
        &self.payload
    }

    pub async fn run(self) -> Result<()> {
        let (text, extras) = self.payload.into_parts();
        self.sink.submit(text, extras).await
    }
}

/// Interaction state machine of the feedback form
pub struct FormController {
    draft: FeedbackDraft,
    capture_state: CaptureState,
    is_submitting: bool,
    preview_open: bool,
    capture: Option<Arc<dyn CaptureClientTrait>>,
    capture_config: CaptureConfig,
    sink: Arc<dyn FeedbackSinkTrait>,
    notices: NoticeBoard,
    view_tx: watch::Sender<FormView>,
}

impl FormController {
    /// Create a form with an empty draft and no capture collaborator
    pub fn new(sink: Arc<dyn FeedbackSinkTrait>) -> Self {
        let (view_tx, _) = watch::channel(FormView::default());
        let mut controller = Self {
            draft: FeedbackDraft::new(),
            capture_state: CaptureState::default(),
            is_submitting: false,
            preview_open: false,
            capture: None,
            capture_config: CaptureConfig::default(),
            sink,
            notices: NoticeBoard::default(),
            view_tx,
        };
        controller.publish();
        controller
    }

    /// Create a form using the capture options and notice lifetime from config
    pub fn from_config(config: &FeedbackConfig, sink: Arc<dyn FeedbackSinkTrait>) -> Self {
        let mut controller = Self::new(sink);
        controller.capture_config = config.capture.clone();
        controller.notices = NoticeBoard::new(config.notice_ttl());
        controller
    }

    pub fn with_capture(mut self, capture: Arc<dyn CaptureClientTrait>) -> Self {
        self.capture = Some(capture);
        self.publish();
        self
    }

    pub fn with_capture_config(mut self, config: CaptureConfig) -> Self {
        self.capture_config = config;
        self
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notices = NoticeBoard::new(ttl);
        self
    }

    pub fn draft(&self) -> &FeedbackDraft {
        &self.draft
    }

    pub fn capture_state(&self) -> &CaptureState {
        &self.capture_state
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Watch the derived view state
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.view_tx.subscribe()
    }

    /// Current derived view state
    pub fn view(&self) -> FormView {
        let capturing = self.capture_state.is_capturing;
        let has_screenshot = self.capture_state.has_screenshot();
        let capture_enabled = self.capture.is_some() && !capturing;
        let can_submit = self.can_submit();
        FormView {
            can_submit,
            submit_enabled: can_submit && !self.is_submitting,
            capture_enabled,
            retake_enabled: capture_enabled && has_screenshot,
            clear_enabled: !capturing && has_screenshot,
            preview_open: self.preview_open,
            is_capturing: capturing,
            is_submitting: self.is_submitting,
            has_screenshot,
        }
    }

    fn publish(&mut self) {
        let view = self.view();
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }

    // Notices

    /// Latest notice that has not yet expired
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn prune_notices(&mut self) {
        self.notices.prune();
    }

    // Draft mutations

    pub fn set_category(&mut self, category: Option<Category>) {
        self.draft.set_category(category);
        self.publish();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.set_text(text);
        self.publish();
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) {
        self.draft.set_rating(rating);
        self.publish();
    }

    pub fn cycle_category(&mut self) {
        self.draft.cycle_category();
        self.publish();
    }

    pub fn cycle_rating(&mut self) {
        self.draft.cycle_rating();
        self.publish();
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.push_char(c);
        self.publish();
    }

    pub fn pop_char(&mut self) {
        self.draft.pop_char();
        self.publish();
    }

    // Capture lifecycle

    /// Start a capture. Returns `None` when one is already in flight or no
    /// capture collaborator is configured.
    pub fn begin_capture(&mut self) -> Option<PendingCapture> {
        if self.capture_state.is_capturing {
            tracing::debug!("Capture already in flight, ignoring request");
            return None;
        }
        let Some(client) = self.capture.clone() else {
            let err = CaptureError::Unavailable;
            tracing::warn!("{err}");
            self.notices.push(Notice::error(err.notice_message()));
            return None;
        };

        self.capture_state.is_capturing = true;
        self.publish();
        Some(PendingCapture {
            client,
            config: self.capture_config.clone(),
        })
    }

    /// Apply the result of a capture started with [`begin_capture`].
    ///
    /// Success replaces the screenshot; failure keeps the previous one.
    ///
    /// [`begin_capture`]: FormController::begin_capture
    pub fn finish_capture(&mut self, result: Result<Vec<u8>, CaptureError>) {
        if !self.capture_state.is_capturing {
            tracing::warn!("Capture result arrived with no capture in flight, dropping it");
            return;
        }
        self.capture_state.is_capturing = false;

        match result {
            Ok(bytes) => {
                tracing::info!("Captured screenshot ({} bytes)", bytes.len());
                self.capture_state.screenshot = Some(bytes);
                self.notices.push(Notice::info("Screenshot captured"));
            }
            Err(err) => {
                tracing::warn!("Screenshot capture failed: {err}");
                self.notices.push(Notice::error(err.notice_message()));
            }
        }
        self.publish();
    }

    /// Take a screenshot
    pub async fn request_capture(&mut self) {
        if let Some(pending) = self.begin_capture() {
            let result = pending.run().await;
            self.finish_capture(result);
        }
    }

    /// Replace the current screenshot with a new one
    pub async fn retake(&mut self) {
        tracing::debug!("Retaking screenshot");
        self.request_capture().await;
    }

    /// Drop the screenshot. Ignored while a capture is in flight.
    pub fn clear_screenshot(&mut self) {
        if self.capture_state.is_capturing {
            tracing::debug!("Capture in flight, ignoring clear");
            return;
        }
        if self.capture_state.screenshot.take().is_some() {
            self.preview_open = false;
            self.publish();
        }
    }

    /// Open or close the screenshot preview
    pub fn toggle_preview(&mut self) {
        self.preview_open = !self.preview_open
            && self.capture_state.has_screenshot()
            && !self.capture_state.is_capturing;
        self.publish();
    }

    /// Captured screenshot decoded for display
    pub fn screenshot_preview(&self) -> Option<String> {
        self.capture_state
            .screenshot()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    // Submission

    /// True iff a category has been chosen
    pub fn can_submit(&self) -> bool {
        self.draft.category().is_some()
    }

    /// Assemble the payload, or `None` when the form cannot be submitted
    pub fn build_payload(&self) -> Option<SubmissionPayload> {
        if !self.can_submit() {
            return None;
        }
        Some(SubmissionPayload::assemble(
            &self.draft,
            self.capture_state.screenshot(),
        ))
    }

    /// Start a submission. Returns `None` when submit is unavailable.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if self.is_submitting {
            tracing::debug!("Submission already in flight, ignoring request");
            return None;
        }
        let payload = self.build_payload()?;

        self.is_submitting = true;
        self.publish();
        Some(PendingSubmission {
            sink: self.sink.clone(),
            payload,
        })
    }

    /// Apply the result of a submission started with [`begin_submit`].
    ///
    /// The draft is kept either way, so a failed submission can be retried.
    ///
    /// [`begin_submit`]: FormController::begin_submit
    pub fn finish_submit(&mut self, result: Result<()>) -> Result<()> {
        if !self.is_submitting {
            tracing::warn!("Submission result arrived with no submission in flight, dropping it");
            return result;
        }
        self.is_submitting = false;
        match &result {
            Ok(()) => {
                tracing::info!("Feedback submitted");
                self.notices.push(Notice::info("Feedback sent, thank you!"));
            }
            Err(err) => {
                tracing::error!("Feedback submission failed: {err:#}");
                self.notices
                    .push(Notice::error(format!("Could not send feedback: {err}")));
            }
        }
        self.publish();
        result
    }

    /// Build the payload and hand it to the sink
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let Some(pending) = self.begin_submit() else {
            return Ok(SubmitOutcome::Unavailable);
        };
        let result = pending.run().await;
        self.finish_submit(result)?;
        Ok(SubmitOutcome::Submitted)
    }

    /// Dispatch an input action. Returns the outcome when the action was a
    /// submit. Closing the form is left to the caller.
    pub async fn apply(&mut self, action: FormAction) -> Result<Option<SubmitOutcome>> {
        match action {
            FormAction::CycleCategory => self.cycle_category(),
            FormAction::CycleRating => self.cycle_rating(),
            FormAction::InsertChar(c) => self.push_char(c),
            FormAction::Newline => self.push_char('\n'),
            FormAction::Backspace => self.pop_char(),
            FormAction::Capture => self.request_capture().await,
            FormAction::Retake => self.retake().await,
            FormAction::ClearScreenshot => self.clear_screenshot(),
            FormAction::TogglePreview => self.toggle_preview(),
            FormAction::Submit => return self.submit().await.map(Some),
            FormAction::Cancel => {}
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MockCaptureClientTrait;
    use crate::feedback::{ExtraValue, Extras, NoticeLevel};
    use crate::submit::MockFeedbackSinkTrait;
    use anyhow::anyhow;

    fn idle_sink() -> Arc<MockFeedbackSinkTrait> {
        let mut sink = MockFeedbackSinkTrait::new();
        sink.expect_submit().never();
        Arc::new(sink)
    }

    fn capture_returning(results: Vec<Result<Vec<u8>, CaptureError>>) -> Arc<MockCaptureClientTrait> {
        let mut capture = MockCaptureClientTrait::new();
        let mut results = results.into_iter();
        let count = results.len();
        capture
            .expect_capture()
            .times(count)
            .returning(move |_| results.next().unwrap());
        Arc::new(capture)
    }

    fn form_with_capture(results: Vec<Result<Vec<u8>, CaptureError>>) -> FormController {
        FormController::new(idle_sink()).with_capture(capture_returning(results))
    }

    mod eligibility {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_form_cannot_submit() {
            let form = FormController::new(idle_sink());
            assert!(!form.can_submit());
            assert!(form.build_payload().is_none());
        }

        #[derive(Debug, Clone, Copy)]
        enum Edit {
            Category(Option<Category>),
            Text,
            Rating,
        }

        const EDITS: [Edit; 5] = [
            Edit::Category(None),
            Edit::Category(Some(Category::BugReport)),
            Edit::Category(Some(Category::FeatureRequest)),
            Edit::Text,
            Edit::Rating,
        ];

        /// Every edit sequence up to `len` long
        fn edit_sequences(len: usize) -> Vec<Vec<Edit>> {
            let mut all = vec![Vec::new()];
            let mut frontier = vec![Vec::new()];
            for _ in 0..len {
                frontier = frontier
                    .iter()
                    .flat_map(|seq: &Vec<Edit>| {
                        EDITS.iter().map(move |edit| {
                            let mut next = seq.clone();
                            next.push(*edit);
                            next
                        })
                    })
                    .collect();
                all.extend(frontier.iter().cloned());
            }
            all
        }

        #[test]
        fn test_can_submit_tracks_latest_category() {
            let sequences = edit_sequences(4);
            assert_eq!(sequences.len(), 1 + 5 + 25 + 125 + 625);

            for sequence in sequences {
                let mut form = FormController::new(idle_sink());
                let mut latest: Option<Category> = None;
                assert!(!form.can_submit());

                for edit in &sequence {
                    match *edit {
                        Edit::Category(category) => {
                            form.set_category(category);
                            latest = category;
                        }
                        Edit::Text => form.set_text("some words"),
                        Edit::Rating => form.cycle_rating(),
                    }
                    assert_eq!(form.can_submit(), latest.is_some(), "after {sequence:?}");
                    assert_eq!(form.view().can_submit, latest.is_some(), "after {sequence:?}");
                    assert_eq!(
                        form.build_payload().is_some(),
                        latest.is_some(),
                        "after {sequence:?}"
                    );
                }
            }
        }

        #[test]
        fn test_can_submit_ignores_capture_state() {
            let mut form = form_with_capture(vec![]);
            form.set_category(Some(Category::BugReport));
            let pending = form.begin_capture();
            assert!(pending.is_some());
            assert!(form.can_submit());
            assert!(form.view().submit_enabled);
        }

        #[test]
        fn test_subscribers_see_category_change() {
            let mut form = FormController::new(idle_sink());
            let mut rx = form.subscribe();
            assert!(!rx.borrow_and_update().can_submit);

            form.set_category(Some(Category::FeatureRequest));
            assert!(rx.has_changed().unwrap());
            assert!(rx.borrow_and_update().can_submit);
        }

        #[test]
        fn test_text_edit_does_not_notify_unchanged_view() {
            let mut form = FormController::new(idle_sink());
            let mut rx = form.subscribe();
            let _ = rx.borrow_and_update();

            form.push_char('a');
            assert!(!rx.has_changed().unwrap());
        }
    }

    mod payload {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_full_payload() {
            let mut form = form_with_capture(vec![Ok(vec![0x1, 0x2])]);
            tokio_test::block_on(form.request_capture());
            form.set_category(Some(Category::BugReport));
            form.set_text("crash on launch");
            form.set_rating(Some(Rating::Bad));

            let payload = form.build_payload().unwrap();

            let mut expected = Extras::new();
            expected.insert("feedback_type".to_string(), "bugReport".into());
            expected.insert("feedback_text".to_string(), "crash on launch".into());
            expected.insert("rating".to_string(), "bad".into());
            expected.insert("screenshot".to_string(), ExtraValue::Bytes(vec![0x1, 0x2]));
            assert_eq!(payload.extras(), &expected);
            assert_eq!(payload.text(), "crash on launch");
        }

        #[test]
        fn test_minimal_payload() {
            let mut form = FormController::new(idle_sink());
            form.set_category(Some(Category::FeatureRequest));

            let payload = form.build_payload().unwrap();

            let mut expected = Extras::new();
            expected.insert("feedback_type".to_string(), "featureRequest".into());
            expected.insert("feedback_text".to_string(), "".into());
            assert_eq!(payload.extras(), &expected);
            assert_eq!(payload.text(), "");
        }

        #[test]
        fn test_cleared_screenshot_is_not_in_payload() {
            let mut form = form_with_capture(vec![Ok(vec![9, 9])]);
            form.set_category(Some(Category::BugReport));
            tokio_test::block_on(form.request_capture());
            form.clear_screenshot();

            let payload = form.build_payload().unwrap();
            assert!(!payload.extras().contains_key("screenshot"));
        }
    }

    mod capture {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_successful_capture_stores_bytes() {
            let mut form = form_with_capture(vec![Ok(vec![1, 2, 3])]);
            form.request_capture().await;

            assert!(!form.capture_state().is_capturing());
            assert_eq!(form.capture_state().screenshot(), Some(&[1u8, 2, 3][..]));
            assert_eq!(form.current_notice().unwrap().level, NoticeLevel::Info);
        }

        #[tokio::test]
        async fn test_capture_overwrites_previous_bytes() {
            let mut form = form_with_capture(vec![Ok(vec![1]), Ok(vec![2])]);
            form.request_capture().await;
            form.request_capture().await;
            assert_eq!(form.capture_state().screenshot(), Some(&[2u8][..]));
        }

        #[tokio::test]
        async fn test_failed_capture_keeps_previous_bytes() {
            let mut form = form_with_capture(vec![
                Ok(vec![7, 7]),
                Err(CaptureError::Failed("render failed".to_string())),
            ]);
            form.request_capture().await;
            form.request_capture().await;

            assert!(!form.capture_state().is_capturing());
            assert_eq!(form.capture_state().screenshot(), Some(&[7u8, 7][..]));
            let notice = form.current_notice().unwrap();
            assert_eq!(notice.level, NoticeLevel::Error);
            assert_eq!(notice.message, "Screenshot failed: render failed");
        }

        #[tokio::test]
        async fn test_failed_first_capture_leaves_none() {
            let mut form = form_with_capture(vec![Err(CaptureError::Unsupported(
                "headless".to_string(),
            ))]);
            form.request_capture().await;
            assert!(form.capture_state().screenshot().is_none());
            assert!(!form.view().is_capturing);
        }

        #[tokio::test]
        async fn test_request_while_capturing_is_noop() {
            let mut form = form_with_capture(vec![Ok(vec![5])]);
            let pending = form.begin_capture().unwrap();

            form.request_capture().await;
            form.retake().await;
            assert!(form.capture_state().is_capturing());
            assert!(form.capture_state().screenshot().is_none());
            assert!(form.begin_capture().is_none());

            let result = pending.run().await;
            form.finish_capture(result);
            assert_eq!(form.capture_state().screenshot(), Some(&[5u8][..]));
        }

        #[tokio::test]
        async fn test_clear_while_capturing_is_rejected() {
            let mut form = form_with_capture(vec![Ok(vec![1]), Ok(vec![2])]);
            form.request_capture().await;

            let pending = form.begin_capture().unwrap();
            form.clear_screenshot();
            assert_eq!(form.capture_state().screenshot(), Some(&[1u8][..]));
            assert!(!form.view().clear_enabled);

            form.finish_capture(pending.run().await);
            assert_eq!(form.capture_state().screenshot(), Some(&[2u8][..]));
        }

        #[tokio::test]
        async fn test_retake_twice_keeps_second_result() {
            let mut form = form_with_capture(vec![Ok(vec![0xA]), Ok(vec![0xB])]);
            form.retake().await;
            form.retake().await;
            assert_eq!(form.capture_state().screenshot(), Some(&[0xBu8][..]));
        }

        #[tokio::test]
        async fn test_capture_without_collaborator_is_unavailable() {
            let mut form = FormController::new(idle_sink());
            form.request_capture().await;

            assert!(!form.capture_state().is_capturing());
            assert!(form.capture_state().screenshot().is_none());
            assert!(!form.view().capture_enabled);
            assert_eq!(
                form.current_notice().unwrap().message,
                "Screenshots are not available here"
            );
        }

        #[test]
        fn test_stale_finish_is_ignored() {
            let mut form = form_with_capture(vec![]);
            form.finish_capture(Ok(vec![1]));
            assert!(form.capture_state().screenshot().is_none());
        }

        #[test]
        fn test_clear_without_screenshot_is_noop() {
            let mut form = FormController::new(idle_sink());
            form.clear_screenshot();
            assert!(!form.view().has_screenshot);
        }

        #[tokio::test]
        async fn test_view_flags_follow_lifecycle() {
            let mut form = form_with_capture(vec![Ok(vec![1])]);
            let view = form.view();
            assert!(view.capture_enabled);
            assert!(!view.retake_enabled);
            assert!(!view.clear_enabled);

            let pending = form.begin_capture().unwrap();
            let view = form.view();
            assert!(view.is_capturing);
            assert!(!view.capture_enabled);

            form.finish_capture(pending.run().await);
            let view = form.view();
            assert!(view.retake_enabled);
            assert!(view.clear_enabled);
            assert!(view.has_screenshot);
        }

        #[tokio::test]
        async fn test_capture_receives_configured_options() {
            let mut capture = MockCaptureClientTrait::new();
            capture
                .expect_capture()
                .withf(|config| config.delay_ms == 5 && !config.trim_trailing_whitespace)
                .times(1)
                .returning(|_| Ok(vec![1]));
            let mut form = FormController::new(idle_sink())
                .with_capture(Arc::new(capture))
                .with_capture_config(CaptureConfig {
                    delay_ms: 5,
                    trim_trailing_whitespace: false,
                });
            form.request_capture().await;
            assert!(form.capture_state().has_screenshot());
        }
    }

    mod preview {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_preview_needs_screenshot() {
            let mut form = FormController::new(idle_sink());
            form.toggle_preview();
            assert!(!form.view().preview_open);
            assert!(form.screenshot_preview().is_none());
        }

        #[tokio::test]
        async fn test_preview_toggles_and_closes_on_clear() {
            let mut form = form_with_capture(vec![Ok(b"frame".to_vec())]);
            form.request_capture().await;

            form.toggle_preview();
            assert!(form.view().preview_open);
            assert_eq!(form.screenshot_preview().as_deref(), Some("frame"));

            form.clear_screenshot();
            assert!(!form.view().preview_open);
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_submit_without_category_is_unavailable() {
            let mut form = FormController::new(idle_sink());
            form.set_text("no category");
            let outcome = form.submit().await.unwrap();
            assert_eq!(outcome, SubmitOutcome::Unavailable);
        }

        #[tokio::test]
        async fn test_submit_hands_payload_to_sink_once() {
            let mut sink = MockFeedbackSinkTrait::new();
            sink.expect_submit()
                .withf(|text, extras| {
                    text == "dark mode"
                        && extras.get("feedback_type") == Some(&ExtraValue::from("featureRequest"))
                        && extras.get("rating") == Some(&ExtraValue::from("good"))
                })
                .times(1)
                .returning(|_, _| Ok(()));

            let mut form = FormController::new(Arc::new(sink));
            form.set_category(Some(Category::FeatureRequest));
            form.set_text("dark mode");
            form.set_rating(Some(Rating::Good));

            let outcome = form.submit().await.unwrap();
            assert_eq!(outcome, SubmitOutcome::Submitted);
            assert!(!form.is_submitting());
            assert_eq!(form.current_notice().unwrap().level, NoticeLevel::Info);
        }

        #[tokio::test]
        async fn test_failed_submit_propagates_and_keeps_draft() {
            let mut sink = MockFeedbackSinkTrait::new();
            sink.expect_submit()
                .times(2)
                .returning(|_, _| Err(anyhow!("network down")));

            let mut form = FormController::new(Arc::new(sink));
            form.set_category(Some(Category::BugReport));
            form.set_text("still here");

            let err = form.submit().await.unwrap_err();
            assert_eq!(err.to_string(), "network down");
            assert!(!form.is_submitting());
            assert!(form.view().submit_enabled);
            assert_eq!(form.draft().text(), "still here");
            assert_eq!(form.current_notice().unwrap().level, NoticeLevel::Error);

            // The user can try again
            assert!(form.submit().await.is_err());
        }

        #[tokio::test]
        async fn test_double_submit_is_guarded() {
            let mut sink = MockFeedbackSinkTrait::new();
            sink.expect_submit().times(1).returning(|_, _| Ok(()));

            let mut form = FormController::new(Arc::new(sink));
            form.set_category(Some(Category::BugReport));

            let pending = form.begin_submit().unwrap();
            assert!(!form.view().submit_enabled);
            assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Unavailable);

            let result = pending.run().await;
            form.finish_submit(result).unwrap();
            assert!(form.view().submit_enabled);
        }

        #[test]
        fn test_stale_finish_submit_is_ignored() {
            let mut form = FormController::new(idle_sink());
            form.set_category(Some(Category::BugReport));
            let mut rx = form.subscribe();
            let _ = rx.borrow_and_update();
            let before = form.view();

            assert!(form.finish_submit(Ok(())).is_ok());
            assert!(form.finish_submit(Err(anyhow!("late failure"))).is_err());

            assert!(form.current_notice().is_none());
            assert!(!form.is_submitting());
            assert_eq!(form.view(), before);
            assert!(!rx.has_changed().unwrap());
        }

        #[tokio::test]
        async fn test_finish_submit_after_completion_is_ignored() {
            let mut sink = MockFeedbackSinkTrait::new();
            sink.expect_submit().times(1).returning(|_, _| Ok(()));

            let mut form = FormController::new(Arc::new(sink));
            form.set_category(Some(Category::BugReport));
            assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Submitted);
            let notices = form.notices().all().len();

            let _ = form.finish_submit(Err(anyhow!("duplicate result")));
            assert_eq!(form.notices().all().len(), notices);
            assert_eq!(form.current_notice().unwrap().level, NoticeLevel::Info);
        }

        #[tokio::test]
        async fn test_pending_submission_exposes_payload() {
            let mut form = FormController::new(idle_sink());
            form.set_category(Some(Category::BugReport));
            form.set_text("peek");
            let pending = form.begin_submit().unwrap();
            assert_eq!(pending.payload().text(), "peek");
        }
    }

    mod actions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_apply_edits_draft() {
            let mut form = FormController::new(idle_sink());
            form.apply(FormAction::CycleCategory).await.unwrap();
            form.apply(FormAction::CycleRating).await.unwrap();
            form.apply(FormAction::InsertChar('h')).await.unwrap();
            form.apply(FormAction::InsertChar('i')).await.unwrap();
            form.apply(FormAction::Newline).await.unwrap();
            form.apply(FormAction::InsertChar('x')).await.unwrap();
            form.apply(FormAction::Backspace).await.unwrap();

            assert_eq!(form.draft().category(), Some(Category::BugReport));
            assert_eq!(form.draft().rating(), Some(Rating::Bad));
            assert_eq!(form.draft().text(), "hi\n");
        }

        #[tokio::test]
        async fn test_apply_capture_and_clear() {
            let mut form = form_with_capture(vec![Ok(vec![1]), Ok(vec![2])]);
            form.apply(FormAction::Capture).await.unwrap();
            form.apply(FormAction::Retake).await.unwrap();
            assert_eq!(form.capture_state().screenshot(), Some(&[2u8][..]));

            form.apply(FormAction::ClearScreenshot).await.unwrap();
            assert!(!form.capture_state().has_screenshot());
        }

        #[tokio::test]
        async fn test_apply_submit_returns_outcome() {
            let mut form = FormController::new(idle_sink());
            let outcome = form.apply(FormAction::Submit).await.unwrap();
            assert_eq!(outcome, Some(SubmitOutcome::Unavailable));

            let outcome = form.apply(FormAction::Cancel).await.unwrap();
            assert!(outcome.is_none());
        }
    }

    mod config {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_config_uses_notice_ttl() {
            let config = FeedbackConfig {
                notice_ttl_ms: 0,
                ..Default::default()
            };
            let mut form = FormController::from_config(&config, idle_sink());
            assert!(form.begin_capture().is_none());
            assert!(form.current_notice().is_none());
            assert_eq!(form.notices().all().len(), 1);
        }
    }
}
