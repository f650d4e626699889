use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};

use crate::{FailureKind, GenerateError, GeneratedScript, GenerationRequest, GenerationResponse, HealthReport};

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Base URL of the backend; `/generate` and `/health` are resolved against it.
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// How long the engine waits for `/generate` before reporting a timeout.
    pub response_timeout: Duration,
    /// Longest silence tolerated on an open connection. Bounds how long a
    /// request keeps running after `response_timeout` has already fired.
    pub read_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            response_timeout: Duration::from_secs(60),
            read_timeout: Duration::from_secs(120),
            max_response_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedScript, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerator {
    settings: GeneratorSettings,
    client: reqwest::Client,
}

impl ReqwestGenerator {
    /// No overall request timeout is set on the client; the engine races
    /// each call against `response_timeout` instead. `read_timeout` only
    /// stops a stalled connection from being awaited forever.
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Probes `GET /health`. A failing backend that still answers with a JSON
    /// report is returned as `Ok`; check `HealthReport::is_healthy`.
    pub async fn check_health(&self) -> Result<HealthReport, GenerateError> {
        let url = self.endpoint_url("health")?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(self.settings.response_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;
        match serde_json::from_slice::<HealthReport>(&body) {
            Ok(report) => Ok(report),
            Err(_) if !status.is_success() => Err(GenerateError::new(
                FailureKind::Server {
                    status: status.as_u16(),
                    message: None,
                },
                status.to_string(),
            )),
            Err(err) => Err(GenerateError::new(FailureKind::MalformedBody, err.to_string())),
        }
    }

    fn endpoint_url(&self, route: &str) -> Result<Url, GenerateError> {
        let base = self.settings.endpoint.trim_end_matches('/');
        Url::parse(&format!("{base}/{route}"))
            .map_err(|err| GenerateError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, GenerateError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Generator for ReqwestGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedScript, GenerateError> {
        let url = self.endpoint_url("generate")?;
        let body = serde_json::to_vec(request)
            .map_err(|err| GenerateError::new(FailureKind::MalformedBody, err.to_string()))?;

        engine_info!(
            "POST {} prompt_len={} video_type={} duration={} storyboard={}",
            url,
            request.prompt.chars().count(),
            request.video_type,
            request.duration,
            request.generate_storyboard
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        engine_debug!("/generate answered {} with {} bytes", status, bytes.len());
        interpret_response(status, &bytes)
    }
}

/// Maps a `/generate` status and body onto a script or a failure.
///
/// A non-2xx status or an `error` field both mean failure; the server's own
/// message is kept when the body has one.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<GeneratedScript, GenerateError> {
    match serde_json::from_slice::<GenerationResponse>(body) {
        Ok(parsed) if !status.is_success() || parsed.error.is_some() => {
            engine_warn!(
                "backend reported failure status={} error={:?}",
                status,
                parsed.error
            );
            Err(server_error(status, parsed.error))
        }
        Ok(parsed) => Ok(GeneratedScript {
            script: parsed.script.unwrap_or_default(),
            storyboard: parsed.storyboard,
        }),
        Err(_) if !status.is_success() => Err(server_error(status, None)),
        Err(err) => Err(GenerateError::new(FailureKind::MalformedBody, err.to_string())),
    }
}

fn server_error(status: StatusCode, message: Option<String>) -> GenerateError {
    let text = message.clone().unwrap_or_else(|| status.to_string());
    GenerateError::new(
        FailureKind::Server {
            status: status.as_u16(),
            message,
        },
        text,
    )
}

fn too_large(max_bytes: u64, actual: u64) -> GenerateError {
    GenerateError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_builder() {
        return GenerateError::new(FailureKind::InvalidEndpoint, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_wins_over_ok_status() {
        let err = interpret_response(StatusCode::OK, br#"{"script":"S","error":"quota"}"#)
            .unwrap_err();
        assert_eq!(
            err.kind,
            FailureKind::Server {
                status: 200,
                message: Some("quota".to_string())
            }
        );
    }

    #[test]
    fn null_storyboard_is_absent() {
        let script =
            interpret_response(StatusCode::OK, br#"{"script":"S","storyboard":null}"#).unwrap();
        assert_eq!(script.storyboard, None);
    }

    #[test]
    fn html_error_page_falls_back_to_status() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>")
            .unwrap_err();
        assert_eq!(
            err.kind,
            FailureKind::Server {
                status: 502,
                message: None
            }
        );
    }

    #[test]
    fn garbage_success_body_is_malformed() {
        let err = interpret_response(StatusCode::OK, b"not json").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedBody);
    }
}
