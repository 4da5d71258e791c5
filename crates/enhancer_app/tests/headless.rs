use std::time::Duration;

use enhancer_app::platform::effects::EffectRunner;
use enhancer_app::platform::headless::HeadlessApp;
use enhancer_app::Slot;
use enhancer_core::{PickedFile, STATUS_SUCCESS};
use enhancer_engine::EnhanceSettings;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SETTLE: Duration = Duration::from_secs(10);
const PNG: &[u8] = b"\x89PNG\r\n\x1a\nreef";

fn app_for(endpoint: String) -> HeadlessApp {
    engine_logging::initialize_for_tests();
    let runner = EffectRunner::new(EnhanceSettings::with_endpoint(endpoint)).expect("engine");
    HeadlessApp::new(runner).expect("attach")
}

async fn server_replying(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enhance"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn select_and_submit(app: &mut HeadlessApp) {
    app.select_file(Some(PickedFile::new("reef.png", PNG.to_vec())));
    app.click_enhance();
    assert!(app.settle(Some(SETTLE)));
}

#[test]
fn preview_shows_selected_bytes() {
    let mut app = app_for("http://127.0.0.1:9/enhance".to_string());
    app.select_file(Some(PickedFile::new("reef.png", PNG.to_vec())));
    assert!(app.settle(Some(SETTLE)));

    let sources = app.document().image_sources(Slot::OriginalBox);
    assert_eq!(sources.len(), 1);
    assert!(sources[0].starts_with("data:image/png;base64,"));
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_enhancement_renders_result() {
    let server = server_replying(
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "enhanced": "data:image/png;base64,AAAA" })),
    )
    .await;
    let mut app = app_for(format!("{}/enhance", server.uri()));

    tokio::task::block_in_place(|| select_and_submit(&mut app));

    let doc = app.document();
    assert_eq!(
        doc.image_sources(Slot::EnhancedBox),
        vec!["data:image/png;base64,AAAA".to_string()]
    );
    assert_eq!(doc.text(Slot::Log).as_deref(), Some(STATUS_SUCCESS));
    assert!(!doc.is_visible(Slot::Spinner));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_message_reaches_status_log() {
    let server = server_replying(
        ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "bad image" })),
    )
    .await;
    let mut app = app_for(format!("{}/enhance", server.uri()));

    tokio::task::block_in_place(|| select_and_submit(&mut app));

    let doc = app.document();
    assert_eq!(doc.text(Slot::Log).as_deref(), Some("Error: bad image"));
    assert!(!doc.is_visible(Slot::Spinner));
    assert!(doc.image_sources(Slot::EnhancedBox).is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn network_failure_inserts_no_image() {
    let endpoint = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/enhance", listener.local_addr().unwrap())
    };
    let mut app = app_for(endpoint);

    tokio::task::block_in_place(|| select_and_submit(&mut app));

    let doc = app.document();
    let status = doc.text(Slot::Log).unwrap();
    assert!(
        status.starts_with("Error: error sending request"),
        "unexpected status: {status}"
    );
    assert!(doc.image_sources(Slot::EnhancedBox).is_empty());
    assert!(!doc.is_visible(Slot::Spinner));
}
