use std::time::Duration;

use crate::{GenerationRequest, RequestSeq};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Dispatch one request to the generation backend.
    SendGeneration {
        seq: RequestSeq,
        request: GenerationRequest,
    },
    /// Deliver `Msg::ErrorDismissDue { seq }` once `after` has elapsed.
    ScheduleErrorDismiss { seq: RequestSeq, after: Duration },
}
