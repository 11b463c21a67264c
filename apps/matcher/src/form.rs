#![allow(dead_code)]

//! Match form state: the inputs, the in-flight flag and the last result.
//!
//! Lifecycle per submission: idle → submitting → (scored | alert) → idle.
//! The form never validates its inputs; empty fields go to the service as-is.

use tracing::{debug, info};

use crate::client::MatchService;
use crate::errors::MatchError;
use crate::models::{MatchRequest, MatchResult, ResumeFile};

pub const IDLE_LABEL: &str = "Get Match Score";
pub const BUSY_LABEL: &str = "Scoring…";

/// How a call to `MatchForm::submit` ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A request was already in flight; nothing was sent.
    Busy,
    /// The result is stored and readable through `MatchForm::result`.
    Scored,
    /// The request failed; the string is the alert shown to the user.
    Alert(String),
}

#[derive(Debug, Default)]
pub struct MatchForm {
    resume_text: String,
    file: Option<ResumeFile>,
    job_text: String,
    loading: bool,
    result: Option<MatchResult>,
}

impl MatchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resume_text(&mut self, text: impl Into<String>) {
        self.resume_text = text.into();
    }

    pub fn set_file(&mut self, file: ResumeFile) {
        self.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    pub fn set_job_text(&mut self, text: impl Into<String>) {
        self.job_text = text.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn file(&self) -> Option<&ResumeFile> {
        self.file.as_ref()
    }

    pub fn job_text(&self) -> &str {
        &self.job_text
    }

    pub fn is_busy(&self) -> bool {
        self.loading
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.loading
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Enters the submitting state and snapshots the inputs into a request.
    ///
    /// Clears the previous result so it is never shown next to an in-flight
    /// request. Returns `None` while a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<MatchRequest> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.result = None;
        Some(MatchRequest::new(
            &self.resume_text,
            self.file.as_ref(),
            &self.job_text,
        ))
    }

    /// Leaves the submitting state. Returns the alert text on failure.
    pub fn finish_submit(&mut self, outcome: Result<MatchResult, MatchError>) -> Option<String> {
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                None
            }
            Err(e) => {
                debug!("Match request failed: {e}");
                Some(e.alert_message())
            }
        }
    }

    /// Runs one full submission against `service`.
    ///
    /// `on_busy` sees the form after it entered the submitting state and
    /// before the request is sent.
    pub async fn submit<F>(&mut self, service: &dyn MatchService, on_busy: F) -> SubmitOutcome
    where
        F: FnOnce(&MatchForm),
    {
        let Some(request) = self.begin_submit() else {
            info!("Submission ignored: a match request is already in flight");
            return SubmitOutcome::Busy;
        };
        on_busy(self);

        let outcome = service.submit_match(request).await;
        match self.finish_submit(outcome) {
            Some(alert) => SubmitOutcome::Alert(alert),
            None => SubmitOutcome::Scored,
        }
    }
}
