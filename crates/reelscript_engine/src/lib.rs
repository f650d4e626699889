//! Reelscript engine: HTTP client for the generation backend and effect execution.
mod engine;
mod generate;
mod race;
mod types;

pub use engine::EngineHandle;
pub use generate::{interpret_response, Generator, GeneratorSettings, ReqwestGenerator};
pub use race::{race_deadline, RaceOutcome};
pub use types::{
    EngineEvent, FailureKind, GenerateError, GeneratedScript, GenerationRequest,
    GenerationResponse, HealthReport, RequestSeq,
};
