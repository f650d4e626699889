use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_debug, engine_info, engine_warn};
use reelscript_core::{Effect, Failure, GenerationRequest, Msg};
use reelscript_engine::{
    EngineEvent, EngineHandle, FailureKind, GenerateError, GeneratorSettings,
};

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: GeneratorSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, GenerateError> {
        let engine = EngineHandle::new(settings)?;
        Ok(Self { engine, msg_tx })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendGeneration { seq, request } => {
                    engine_info!(
                        "SendGeneration seq={} prompt_len={} prompt={}",
                        seq,
                        request.prompt.chars().count(),
                        engine_logging::preview(&request.prompt, 50)
                    );
                    self.engine.generate(seq, to_wire(request));
                }
                Effect::ScheduleErrorDismiss { seq, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::ErrorDismissDue { seq });
                    });
                }
            }
        }
    }

    /// Drains finished requests from the engine and turns them into messages.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::Completed { seq, result, late } => {
                    if late {
                        engine_debug!("request {} answered after its deadline", seq);
                    }
                    inbox.push(match result {
                        Ok(generated) => Msg::GenerationSucceeded {
                            seq,
                            script: generated.script,
                            storyboard: generated.storyboard,
                        },
                        Err(err) => {
                            engine_warn!("request {} failed: {}", seq, err);
                            Msg::GenerationFailed {
                                seq,
                                failure: map_failure(err),
                            }
                        }
                    });
                }
            }
        }
        inbox
    }
}

fn to_wire(request: GenerationRequest) -> reelscript_engine::GenerationRequest {
    reelscript_engine::GenerationRequest {
        prompt: request.prompt,
        video_type: request.video_type,
        duration: request.duration_secs,
        generate_storyboard: request.generate_storyboard,
    }
}

fn map_failure(err: GenerateError) -> Failure {
    match err.kind {
        FailureKind::Timeout { after } => Failure::Timeout { after },
        FailureKind::Server { status, message } => Failure::Server {
            status: Some(status),
            message,
        },
        FailureKind::Network => Failure::Transport(err.message),
        FailureKind::MalformedBody | FailureKind::TooLarge { .. } => {
            Failure::BadResponse(err.kind.to_string())
        }
        FailureKind::InvalidEndpoint | FailureKind::Cancelled | FailureKind::Runtime => {
            Failure::Internal(err.to_string())
        }
    }
}
