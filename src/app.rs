//! Application state and key handling

use anyhow::{anyhow, Result};
use crossterm::event::KeyEvent;
use feedback_form::{
    map_key, CaptureError, FeedbackConfig, FileSink, FormAction, FormController, FormFocus,
    InputEvent, ScreenCapture,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of background work started from a key press
enum Completion {
    Capture(Result<Vec<u8>, CaptureError>),
    Submit(Result<()>),
}

/// Main application struct
pub struct App {
    /// The feedback form
    pub form: FormController,
    /// Section receiving key input
    pub focus: FormFocus,
    /// Frame store the draw loop records into
    pub screen: ScreenCapture,
    /// Where submissions are written
    pub submissions_dir: PathBuf,
    /// Whether the feedback was sent
    pub submitted: bool,
    quit: bool,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &FeedbackConfig) -> Result<Self> {
        let submissions_dir = config
            .submissions_dir
            .clone()
            .or_else(FileSink::default_dir)
            .ok_or_else(|| anyhow!("Could not determine a submissions directory"))?;

        let screen = ScreenCapture::new();
        let sink = Arc::new(FileSink::new(submissions_dir.clone()));
        let form = FormController::from_config(config, sink).with_capture(Arc::new(screen.clone()));
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Ok(Self {
            form,
            focus: FormFocus::default(),
            screen,
            submissions_dir,
            submitted: false,
            quit: false,
            completions_tx,
            completions_rx,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press.
    ///
    /// Captures and submissions run in the background; their results are
    /// applied by [`App::poll_completions`].
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match map_key(self.focus, &key) {
            Some(InputEvent::NextField) => self.focus = self.focus.next(),
            Some(InputEvent::PrevField) => self.focus = self.focus.prev(),
            Some(InputEvent::Action(FormAction::Cancel)) => {
                // A started submission runs to completion
                if !self.form.is_submitting() {
                    self.quit = true;
                }
            }
            Some(InputEvent::Action(FormAction::Capture | FormAction::Retake)) => {
                self.start_capture()
            }
            Some(InputEvent::Action(FormAction::Submit)) => self.start_submit(),
            Some(InputEvent::Action(action)) => {
                self.form.apply(action).await?;
            }
            None => {}
        }
        Ok(())
    }

    fn start_capture(&mut self) {
        if let Some(pending) = self.form.begin_capture() {
            let tx = self.completions_tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(Completion::Capture(pending.run().await));
            });
        }
    }

    fn start_submit(&mut self) {
        if let Some(pending) = self.form.begin_submit() {
            let tx = self.completions_tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(Completion::Submit(pending.run().await));
            });
        }
    }

    /// Apply every finished capture or submission
    pub fn poll_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.complete(completion);
        }
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Capture(result) => self.form.finish_capture(result),
            Completion::Submit(result) => match self.form.finish_submit(result) {
                Ok(()) => {
                    self.submitted = true;
                    self.quit = true;
                }
                // Already logged and shown; the draft stays for another try
                Err(err) => tracing::debug!("Submission not sent: {err:#}"),
            },
        }
    }

    /// Per-frame housekeeping
    pub fn tick(&mut self) {
        self.poll_completions();
        self.form.prune_notices();
    }
}
