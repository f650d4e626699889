use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub type RequestSeq = u64;

/// JSON body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub video_type: String,
    pub duration: u32,
    pub generate_storyboard: bool,
}

/// Body returned by `/generate`, success or failure alike.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub storyboard: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    pub script: String,
    pub storyboard: Option<String>,
}

/// Body returned by `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Outcome of request `seq`. `late` marks a result that arrived after the
    /// deadline already produced a timeout for the same `seq`.
    Completed {
        seq: RequestSeq,
        result: Result<GeneratedScript, GenerateError>,
        late: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn timeout(after: Duration) -> Self {
        Self::new(
            FailureKind::Timeout { after },
            format!("no response within {} seconds", after.as_secs()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    /// Non-2xx status, or a body carrying `error`. `message` is the server's own text.
    Server {
        status: u16,
        message: Option<String>,
    },
    Timeout {
        after: Duration,
    },
    MalformedBody,
    TooLarge {
        max_bytes: u64,
        actual: Option<u64>,
    },
    Cancelled,
    Runtime,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Server { status, .. } => write!(f, "server error (status {status})"),
            FailureKind::Timeout { after } => write!(f, "timeout after {}s", after.as_secs()),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Runtime => write!(f, "runtime error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
