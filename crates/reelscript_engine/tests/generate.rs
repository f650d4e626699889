use std::time::Duration;

use pretty_assertions::assert_eq;
use reelscript_engine::{
    FailureKind, GeneratedScript, GenerationRequest, Generator, GeneratorSettings,
    ReqwestGenerator,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GenerationRequest {
    GenerationRequest {
        prompt: "morning coffee".to_string(),
        video_type: "entertaining".to_string(),
        duration: 30,
        generate_storyboard: false,
    }
}

fn generator_for(server: &MockServer) -> ReqwestGenerator {
    ReqwestGenerator::new(GeneratorSettings {
        endpoint: server.uri(),
        ..GeneratorSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn posts_json_payload_and_returns_script() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "prompt": "morning coffee",
            "video_type": "entertaining",
            "duration": 30,
            "generate_storyboard": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "script": "S" })))
        .expect(1)
        .mount(&server)
        .await;

    let script = generator_for(&server)
        .generate(&request())
        .await
        .expect("generate ok");

    assert_eq!(
        script,
        GeneratedScript {
            script: "S".to_string(),
            storyboard: None,
        }
    );
}

#[tokio::test]
async fn returns_storyboard_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "script": "S", "storyboard": "B" })),
        )
        .mount(&server)
        .await;

    let script = generator_for(&server).generate(&request()).await.unwrap();
    assert_eq!(script.storyboard.as_deref(), Some("B"));
}

#[tokio::test]
async fn server_error_keeps_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&request())
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::Server {
            status: 500,
            message: Some("boom".to_string()),
        }
    );
    assert_eq!(err.message, "boom");
}

#[tokio::test]
async fn status_without_json_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&request())
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::Server {
            status: 503,
            message: None,
        }
    );
}

#[tokio::test]
async fn rejects_oversized_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0123456789abcdef"))
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(GeneratorSettings {
        endpoint: server.uri(),
        max_response_bytes: 10,
        ..GeneratorSettings::default()
    })
    .unwrap();

    let err = generator.generate(&request()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(16),
        }
    );
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let generator = ReqwestGenerator::new(GeneratorSettings {
        endpoint: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        ..GeneratorSettings::default()
    })
    .unwrap();

    let err = generator.generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn stalled_backend_hits_read_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "script": "too slow" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(GeneratorSettings {
        endpoint: server.uri(),
        read_timeout: Duration::from_millis(200),
        ..GeneratorSettings::default()
    })
    .unwrap();

    let started = std::time::Instant::now();
    let err = generator.generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn invalid_endpoint_is_reported() {
    let generator = ReqwestGenerator::new(GeneratorSettings {
        endpoint: "not a url".to_string(),
        ..GeneratorSettings::default()
    })
    .unwrap();

    let err = generator.generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[tokio::test]
async fn health_reports_backend_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "model": "flash-lite",
            "timestamp": 1.5
        })))
        .mount(&server)
        .await;

    let report = generator_for(&server).check_health().await.unwrap();
    assert!(report.is_healthy());
    assert_eq!(report.model.as_deref(), Some("flash-lite"));
}

#[tokio::test]
async fn unhealthy_backend_still_returns_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "message": "api key missing"
        })))
        .mount(&server)
        .await;

    let report = generator_for(&server).check_health().await.unwrap();
    assert!(!report.is_healthy());
    assert_eq!(report.message.as_deref(), Some("api key missing"));
}
