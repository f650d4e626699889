use crate::{Failure, RequestSeq};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the prompt text.
    PromptChanged(String),
    /// User picked a video type.
    VideoTypeChanged(String),
    /// User picked a duration (raw selected value).
    DurationChanged(String),
    /// User toggled the storyboard checkbox.
    StoryboardToggled(bool),
    /// User submitted the form.
    SubmitClicked,
    /// Backend produced a script for request `seq`.
    GenerationSucceeded {
        seq: RequestSeq,
        script: String,
        storyboard: Option<String>,
    },
    /// Request `seq` failed or timed out.
    GenerationFailed { seq: RequestSeq, failure: Failure },
    /// The display timer for the error banner of request `seq` ran out.
    ErrorDismissDue { seq: RequestSeq },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
