use std::time::Duration;

use enhancer_engine::{EnhanceError, EnhanceSettings, Enhancer, ReqwestEnhancer};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";
// Multipart body matchers only see valid UTF-8 bodies.
const ASCII_IMAGE: &[u8] = b"fake-image";

fn enhancer_for(server: &MockServer) -> ReqwestEnhancer {
    ReqwestEnhancer::new(EnhanceSettings::with_endpoint(format!(
        "{}/enhance",
        server.uri()
    )))
    .expect("valid settings")
}

#[tokio::test]
async fn posts_multipart_and_returns_enhanced_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\"; filename=\"reef.png\""))
        .and(body_string_contains("fake-image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "enhanced": "data:image/png;base64,AAAA",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = enhancer_for(&server)
        .enhance("reef.png", ASCII_IMAGE)
        .await
        .expect("enhance ok");

    assert_eq!(image.src, "data:image/png;base64,AAAA");
}

#[tokio::test]
async fn relative_result_path_is_resolved_against_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Enhancement successful",
            "enhanced_path": "/static/outputs/reef_enhanced.png",
        })))
        .mount(&server)
        .await;

    let image = enhancer_for(&server).enhance("reef.png", PNG).await.unwrap();

    assert_eq!(
        image.src,
        format!("{}/static/outputs/reef_enhanced.png", server.uri())
    );
}

#[tokio::test]
async fn custom_field_name_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .and(body_string_contains("name=\"image\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "enhanced": "data:image/png;base64,AA" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = EnhanceSettings {
        field_name: "image".to_string(),
        ..EnhanceSettings::with_endpoint(format!("{}/enhance", server.uri()))
    };
    let enhancer = ReqwestEnhancer::new(settings).unwrap();
    enhancer.enhance("reef.png", ASCII_IMAGE).await.unwrap();
}

#[tokio::test]
async fn server_error_message_comes_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "bad image" })),
        )
        .mount(&server)
        .await;

    let err = enhancer_for(&server)
        .enhance("reef.png", PNG)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EnhanceError::Server {
            status: 500,
            message: "bad image".to_string(),
        }
    );
    assert_eq!(err.to_string(), "bad image");
}

#[tokio::test]
async fn server_error_without_json_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = enhancer_for(&server)
        .enhance("reef.png", PNG)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Server responded with status: 502");
}

#[tokio::test]
async fn server_error_with_empty_error_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "" })))
        .mount(&server)
        .await;

    let err = enhancer_for(&server)
        .enhance("reef.png", PNG)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Server responded with status: 500");
}

#[tokio::test]
async fn server_error_without_error_field_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({ "detail": 1 })))
        .mount(&server)
        .await;

    let err = enhancer_for(&server)
        .enhance("reef.png", PNG)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Server responded with status: 400");
}

#[tokio::test]
async fn success_without_image_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&server)
        .await;

    let err = enhancer_for(&server)
        .enhance("reef.png", PNG)
        .await
        .unwrap_err();

    assert!(matches!(err, EnhanceError::MalformedResponse(_)));
}

#[tokio::test]
async fn success_with_invalid_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = enhancer_for(&server)
        .enhance("reef.png", PNG)
        .await
        .unwrap_err();

    assert!(matches!(err, EnhanceError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    // Bind then drop a listener so the port is very likely closed.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let enhancer = ReqwestEnhancer::new(EnhanceSettings::with_endpoint(format!("{uri}/enhance")))
        .unwrap();

    let err = enhancer.enhance("reef.png", PNG).await.unwrap_err();

    assert!(matches!(err, EnhanceError::Transport(_)));
    assert!(err.to_string().starts_with("error sending request"), "{err}");
}

#[tokio::test]
async fn request_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(serde_json::json!({ "enhanced": "data:," })),
        )
        .mount(&server)
        .await;

    let settings = EnhanceSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..EnhanceSettings::with_endpoint(format!("{}/enhance", server.uri()))
    };
    let err = ReqwestEnhancer::new(settings)
        .unwrap()
        .enhance("reef.png", PNG)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("request timed out"));
}
