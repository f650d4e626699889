use std::time::Duration;

use crate::view_model::AppViewModel;
use crate::{FormSnapshot, ValidationError};

pub type RequestSeq = u64;

/// How long an error banner stays up before it clears itself.
pub const ERROR_DISPLAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("generation timed out ({} seconds)", .after.as_secs())]
    Timeout { after: Duration },
    #[error("{}", .message.as_deref().unwrap_or("server error"))]
    Server {
        status: Option<u16>,
        message: Option<String>,
    },
    #[error("network error: {0}")]
    Transport(String),
    /// The backend answered, but not with anything usable.
    #[error("invalid response from server: {0}")]
    BadResponse(String),
    #[error("request failed: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GeneratedOutput {
    script: String,
    storyboard: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ErrorBanner {
    seq: RequestSeq,
    failure: Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    form: FormSnapshot,
    ui: UiState,
    last_seq: RequestSeq,
    in_flight: Option<RequestSeq>,
    output: Option<GeneratedOutput>,
    error: Option<ErrorBanner>,
    error_display: Duration,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            form: FormSnapshot::default(),
            ui: UiState::Idle,
            last_seq: 0,
            in_flight: None,
            output: None,
            error: None,
            error_display: ERROR_DISPLAY,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as `new`, with a custom error banner lifetime.
    pub fn with_error_display(error_display: Duration) -> Self {
        Self {
            error_display,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(
            self.ui,
            self.output
                .as_ref()
                .map(|out| (out.script.as_str(), out.storyboard.as_deref())),
            self.error.as_ref().map(|banner| &banner.failure),
            self.last_seq,
            self.dirty,
        )
    }

    pub fn form(&self) -> &FormSnapshot {
        &self.form
    }

    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    pub fn in_flight(&self) -> Option<RequestSeq> {
        self.in_flight
    }

    pub fn error_display(&self) -> Duration {
        self.error_display
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormSnapshot {
        &mut self.form
    }

    pub(crate) fn next_seq(&mut self) -> RequestSeq {
        self.last_seq += 1;
        self.last_seq
    }

    /// True when `seq` is the request whose outcome the UI is waiting for.
    pub(crate) fn is_awaiting(&self, seq: RequestSeq) -> bool {
        self.ui == UiState::Loading && self.in_flight == Some(seq)
    }

    pub(crate) fn begin_loading(&mut self, seq: RequestSeq) {
        self.output = None;
        self.error = None;
        self.in_flight = Some(seq);
        self.ui = UiState::Loading;
        self.dirty = true;
    }

    pub(crate) fn finish_success(&mut self, script: String, storyboard: Option<String>) {
        self.in_flight = None;
        self.error = None;
        self.output = Some(GeneratedOutput {
            script,
            storyboard: storyboard.filter(|text| !text.is_empty()),
        });
        self.ui = UiState::Success;
        self.dirty = true;
    }

    pub(crate) fn finish_error(&mut self, seq: RequestSeq, failure: Failure) {
        self.in_flight = None;
        self.output = None;
        self.error = Some(ErrorBanner { seq, failure });
        self.ui = UiState::Error;
        self.dirty = true;
    }

    /// Rejected before any request went out; whatever result is on screen stays.
    pub(crate) fn fail_validation(&mut self, seq: RequestSeq, err: ValidationError) {
        self.error = Some(ErrorBanner {
            seq,
            failure: Failure::Validation(err),
        });
        self.ui = UiState::Error;
        self.dirty = true;
    }

    /// Clears the banner only if it still belongs to `seq`.
    pub(crate) fn dismiss_error(&mut self, seq: RequestSeq) {
        if self.error.as_ref().is_some_and(|banner| banner.seq == seq) {
            self.error = None;
            if self.ui == UiState::Error {
                self.ui = UiState::Idle;
            }
            self.dirty = true;
        }
    }
}
