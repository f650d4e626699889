use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use tokio::task::JoinError;

use crate::generate::{Generator, GeneratorSettings, ReqwestGenerator};
use crate::race::{race_deadline, RaceOutcome};
use crate::{EngineEvent, FailureKind, GenerateError, GeneratedScript, GenerationRequest, RequestSeq};

enum EngineCommand {
    Generate {
        seq: RequestSeq,
        request: GenerationRequest,
    },
}

/// Runs generation requests on a background tokio runtime and reports their
/// outcomes as `EngineEvent`s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenerateError> {
        let deadline = settings.response_timeout;
        let generator = Arc::new(ReqwestGenerator::new(settings)?);
        Self::with_generator(generator, deadline)
    }

    pub fn with_generator(
        generator: Arc<dyn Generator>,
        deadline: Duration,
    ) -> Result<Self, GenerateError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|err| GenerateError::new(FailureKind::Runtime, err.to_string()))?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let generator = generator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(generator, deadline, command, event_tx).await;
                });
            }
            engine_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn generate(&self, seq: RequestSeq, request: GenerationRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Generate { seq, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    generator: Arc<dyn Generator>,
    deadline: Duration,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate { seq, request } => {
            let worker = tokio::spawn(async move { generator.generate(&request).await });

            match race_deadline(worker, deadline).await {
                RaceOutcome::Settled(joined) => {
                    let result = flatten(seq, joined);
                    engine_info!("request {} settled ok={}", seq, result.is_ok());
                    let _ = event_tx.send(EngineEvent::Completed {
                        seq,
                        result,
                        late: false,
                    });
                }
                RaceOutcome::TimedOut(worker) => {
                    engine_warn!("request {} exceeded {}s", seq, deadline.as_secs());
                    let _ = event_tx.send(EngineEvent::Completed {
                        seq,
                        result: Err(GenerateError::timeout(deadline)),
                        late: false,
                    });

                    // The request is not aborted; its result is still reported, tagged late.
                    let result = flatten(seq, worker.await);
                    engine_debug!("request {} finished late ok={}", seq, result.is_ok());
                    let _ = event_tx.send(EngineEvent::Completed {
                        seq,
                        result,
                        late: true,
                    });
                }
            }
        }
    }
}

fn flatten(
    seq: RequestSeq,
    joined: Result<Result<GeneratedScript, GenerateError>, JoinError>,
) -> Result<GeneratedScript, GenerateError> {
    match joined {
        Ok(result) => result,
        Err(err) => {
            engine_error!("request {} task failed: {}", seq, err);
            Err(GenerateError::new(FailureKind::Cancelled, err.to_string()))
        }
    }
}
