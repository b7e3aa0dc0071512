//! End-to-end session flows against a fake HTTP backend

use serde_json::json;
use stepview_client::{render, Dispatcher, Frontend, HttpTransport, Notice, Outcome, Phase, View};
use stepview_common::types::Snapshot;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[derive(Default)]
struct Recorder {
    views: Vec<View>,
    notices: Vec<Notice>,
}

impl Frontend for Recorder {
    fn render(&mut self, source_lines: &[String], snapshot: &Snapshot) {
        self.views.push(render(source_lines, snapshot));
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

const BYTESHOW: [&str; 7] = [
    "#include <stdio.h>",
    "int main(){",
    "  int num = 0x12345678;",
    "  char *c = (char *)&num;",
    "  int lilendian = (*c == 0x78);",
    "  return 0;",
    "}",
];

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start"))
        .and(body_json(json!({ "program_name": "byteshow" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "abc",
            "source_code": BYTESHOW,
            "line": "3",
            "file": "byteshow.c",
            "frame_name": "main",
            "stack": [{ "name": "num", "value": "0" }],
            "heap": {}
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_start_step_run_to_end() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/step"))
        .and(body_json(json!({ "session_id": "abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "line": "4",
            "file": "byteshow.c",
            "frame_name": "main",
            "stack": [
                { "name": "num", "value": "305419896" },
                { "name": "c", "value": "0x7ffd5c1c \"xV4\\022\"" }
            ],
            "heap": { "0x7ffd5c1c": "78 56 34 12" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/run_to_end"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Done." })))
        .expect(1)
        .mount(&server)
        .await;

    let mut dispatcher = Dispatcher::new(HttpTransport::new(&server.uri()).unwrap());
    let mut ui = Recorder::default();

    assert_eq!(dispatcher.start(None, &mut ui).await, Outcome::Rendered);
    assert_eq!(dispatcher.phase(), Phase::Active);
    assert_eq!(ui.views[0].highlighted_line().unwrap().number, 3);
    assert_eq!(ui.views[0].location.as_deref(), Some("main @ byteshow.c"));

    assert_eq!(dispatcher.step(&mut ui).await, Outcome::Rendered);
    let view = &ui.views[1];
    assert_eq!(view.highlighted_line().unwrap().text, "  char *c = (char *)&num;");
    assert_eq!(view.stack.len(), 3);
    assert_eq!(view.heap[0].label(), "0x7ffd5c1c : 78 56 34 12");

    assert_eq!(dispatcher.run_to_end(&mut ui).await, Outcome::Finished);
    assert_eq!(dispatcher.phase(), Phase::Inactive);
    assert_eq!(ui.notices, vec![Notice::Finished("Done.".to_string())]);
    assert_eq!(ui.views.len(), 2);
}

#[tokio::test]
async fn test_expired_session_is_reported_and_closed() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/step"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "Invalid or missing session ID" })),
        )
        .mount(&server)
        .await;

    let mut dispatcher = Dispatcher::new(HttpTransport::new(&server.uri()).unwrap());
    let mut ui = Recorder::default();

    dispatcher.start(Some("byteshow"), &mut ui).await;
    assert_eq!(dispatcher.step(&mut ui).await, Outcome::Failed);

    assert_eq!(dispatcher.phase(), Phase::Inactive);
    assert_eq!(ui.notices[0].to_string(), "Error: Invalid or missing session ID");

    // Nothing left to step
    assert_eq!(dispatcher.step(&mut ui).await, Outcome::Ignored);
}

#[tokio::test]
async fn test_stop_terminates_session() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/stop"))
        .and(body_json(json!({ "session_id": "abc" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Session terminated." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut dispatcher = Dispatcher::new(HttpTransport::new(&server.uri()).unwrap());
    let mut ui = Recorder::default();

    dispatcher.start(Some("byteshow"), &mut ui).await;
    assert_eq!(dispatcher.stop(&mut ui).await, Outcome::Finished);

    assert_eq!(dispatcher.phase(), Phase::Inactive);
    assert!(dispatcher.session().source_lines().is_empty());
    assert_eq!(ui.notices, vec![Notice::Finished("Session terminated.".to_string())]);
}

#[tokio::test]
async fn test_stop_with_broken_backend_still_closes() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/stop"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let mut dispatcher = Dispatcher::new(HttpTransport::new(&server.uri()).unwrap());
    let mut ui = Recorder::default();

    dispatcher.start(Some("byteshow"), &mut ui).await;
    assert_eq!(dispatcher.stop(&mut ui).await, Outcome::Failed);

    assert_eq!(dispatcher.phase(), Phase::Inactive);
    assert!(ui.notices[0].is_error());
}
