use reelscript_core::AppViewModel;

/// One change to a section of the screen. `Screen` is the only consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    SetSubmitControl { enabled: bool, label: &'static str },
    SetLoading(bool),
    ShowResult { script: String },
    HideResult,
    ShowStoryboard { text: String },
    HideStoryboard,
    ShowError { text: String },
    HideError,
}

/// Translates the full view model into screen commands, one per section.
pub fn render(view: &AppViewModel) -> Vec<ScreenCommand> {
    let mut cmds = Vec::with_capacity(5);

    cmds.push(ScreenCommand::SetSubmitControl {
        enabled: view.submit_enabled,
        label: view.submit_label,
    });
    cmds.push(ScreenCommand::SetLoading(view.loading_visible));

    cmds.push(if view.result_visible {
        ScreenCommand::ShowResult {
            script: view.script_text.clone(),
        }
    } else {
        ScreenCommand::HideResult
    });

    cmds.push(if view.storyboard_visible {
        ScreenCommand::ShowStoryboard {
            text: view.storyboard_text.clone(),
        }
    } else {
        ScreenCommand::HideStoryboard
    });

    cmds.push(if view.error_visible {
        ScreenCommand::ShowError {
            text: view.error_text.clone(),
        }
    } else {
        ScreenCommand::HideError
    });

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelscript_core::{update, AppState, Effect, Msg, SUBMIT_CAPTION};

    fn loading_state() -> (AppState, u64) {
        let state = AppState::new();
        let (state, _) = update(state, Msg::PromptChanged("cats".to_string()));
        let (state, _) = update(state, Msg::VideoTypeChanged("funny".to_string()));
        let (state, _) = update(state, Msg::DurationChanged("30".to_string()));
        let (state, effects) = update(state, Msg::SubmitClicked);
        match effects.as_slice() {
            [Effect::SendGeneration { seq, .. }] => (state, *seq),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn loading_disables_control_and_hides_sections() {
        let (state, _) = loading_state();
        let cmds = render(&state.view());

        assert_eq!(
            cmds,
            vec![
                ScreenCommand::SetSubmitControl {
                    enabled: false,
                    label: "Generating...",
                },
                ScreenCommand::SetLoading(true),
                ScreenCommand::HideResult,
                ScreenCommand::HideStoryboard,
                ScreenCommand::HideError,
            ]
        );
    }

    #[test]
    fn success_with_storyboard_shows_both_sections() {
        let (state, seq) = loading_state();
        let (state, _) = update(
            state,
            Msg::GenerationSucceeded {
                seq,
                script: "S".to_string(),
                storyboard: Some("B".to_string()),
            },
        );
        let cmds = render(&state.view());

        assert!(cmds.contains(&ScreenCommand::SetSubmitControl {
            enabled: true,
            label: SUBMIT_CAPTION,
        }));
        assert!(cmds.contains(&ScreenCommand::SetLoading(false)));
        assert!(cmds.contains(&ScreenCommand::ShowResult {
            script: "S".to_string()
        }));
        assert!(cmds.contains(&ScreenCommand::ShowStoryboard {
            text: "B".to_string()
        }));
        assert!(cmds.contains(&ScreenCommand::HideError));
    }
}
