//! Reelscript core: pure submission state machine and view-model helpers.
mod effect;
mod form;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{FormSnapshot, GenerationRequest, ValidationError, MAX_PROMPT_CHARS};
pub use msg::Msg;
pub use state::{AppState, Failure, RequestSeq, UiState, ERROR_DISPLAY};
pub use update::update;
pub use view_model::{
    AppViewModel, ERROR_PREFIX, SCRIPT_FALLBACK, SUBMIT_BUSY_CAPTION, SUBMIT_CAPTION,
};
