use crate::{Failure, RequestSeq, UiState};

/// Resting caption of the submit control.
pub const SUBMIT_CAPTION: &str = "Generate video";
/// Caption while a request is in flight.
pub const SUBMIT_BUSY_CAPTION: &str = "Generating...";
/// Label in front of every displayed failure message.
pub const ERROR_PREFIX: &str = "Error: ";
/// Shown when the backend reports success with an empty script.
pub const SCRIPT_FALLBACK: &str = "Script generated successfully!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub ui_state: UiState,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub loading_visible: bool,
    pub result_visible: bool,
    pub script_text: String,
    pub storyboard_visible: bool,
    pub storyboard_text: String,
    pub error_visible: bool,
    pub error_text: String,
    pub last_request: Option<RequestSeq>,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn build(
        ui_state: UiState,
        output: Option<(&str, Option<&str>)>,
        error: Option<&Failure>,
        last_seq: RequestSeq,
        dirty: bool,
    ) -> Self {
        let loading = ui_state == UiState::Loading;

        let (script_text, storyboard_text) = match output {
            Some((script, storyboard)) => {
                let script = if script.is_empty() {
                    SCRIPT_FALLBACK
                } else {
                    script
                };
                (script.to_string(), storyboard.unwrap_or_default().to_string())
            }
            None => (String::new(), String::new()),
        };

        Self {
            ui_state,
            submit_enabled: !loading,
            submit_label: if loading {
                SUBMIT_BUSY_CAPTION
            } else {
                SUBMIT_CAPTION
            },
            loading_visible: loading,
            result_visible: output.is_some(),
            storyboard_visible: !storyboard_text.is_empty(),
            script_text,
            storyboard_text,
            error_visible: error.is_some(),
            error_text: error
                .map(|failure| format!("{ERROR_PREFIX}{failure}"))
                .unwrap_or_default(),
            last_request: (last_seq > 0).then_some(last_seq),
            dirty,
        }
    }
}
