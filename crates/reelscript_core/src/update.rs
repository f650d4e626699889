use crate::{AppState, Effect, Msg, UiState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PromptChanged(text) => {
            state.form_mut().prompt = text;
            Vec::new()
        }
        Msg::VideoTypeChanged(value) => {
            state.form_mut().video_type = value;
            Vec::new()
        }
        Msg::DurationChanged(value) => {
            state.form_mut().duration = value;
            Vec::new()
        }
        Msg::StoryboardToggled(checked) => {
            state.form_mut().generate_storyboard = checked;
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One request at a time; the control is disabled while loading.
            if state.ui_state() == UiState::Loading {
                return (state, Vec::new());
            }

            let seq = state.next_seq();
            match state.form().validate() {
                Ok(request) => {
                    state.begin_loading(seq);
                    vec![Effect::SendGeneration { seq, request }]
                }
                Err(err) => {
                    state.fail_validation(seq, err);
                    vec![Effect::ScheduleErrorDismiss {
                        seq,
                        after: state.error_display(),
                    }]
                }
            }
        }
        Msg::GenerationSucceeded {
            seq,
            script,
            storyboard,
        } => {
            if !state.is_awaiting(seq) {
                return (state, Vec::new());
            }
            state.finish_success(script, storyboard);
            Vec::new()
        }
        Msg::GenerationFailed { seq, failure } => {
            if !state.is_awaiting(seq) {
                return (state, Vec::new());
            }
            state.finish_error(seq, failure);
            vec![Effect::ScheduleErrorDismiss {
                seq,
                after: state.error_display(),
            }]
        }
        Msg::ErrorDismissDue { seq } => {
            state.dismiss_error(seq);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
