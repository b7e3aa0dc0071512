// stepview - Step-Through Debugger Client
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Command dispatcher
//!
//! Maps user intents onto backend calls and decides, from the envelope that
//! comes back, whether the session continues, finishes, or fails. The
//! dispatcher is the only writer of [`Session`]; frontends observe the
//! result through the [`Frontend`] trait and the returned [`Outcome`].

use serde_json::Value;
use std::fmt;
use stepview_common::types::{Envelope, SessionRequest, Snapshot, StartRequest, Started};
use tracing::{debug, info, warn};

use crate::{
    render::line_in_range,
    session::Session,
    transport::{Endpoint, Transport, TransportError},
};

/// Program started when the caller does not name one
pub const DEFAULT_PROGRAM: &str = "byteshow";

/// Completion text used when the backend sends none
pub const DEFAULT_FINISHED_MESSAGE: &str = "Execution finished.";

/// Fields of a stop reply that may carry its message, in order of preference
const STOP_MESSAGE_FIELDS: &[&str] = &["message", "status", "statusMessage"];

/// Something the user has to be told about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A logical error or a transport fault, verbatim
    Error(String),
    /// Execution or the session ended normally
    Finished(String),
}

impl Notice {
    fn finished(message: Option<String>) -> Self {
        Self::Finished(message.unwrap_or_else(|| DEFAULT_FINISHED_MESSAGE.to_string()))
    }

    fn fault(err: &TransportError) -> Self {
        Self::Error(err.to_string())
    }

    /// Whether this notice reports a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The message without its prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Error(message) | Self::Finished(message) => message,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(message) => write!(f, "Error: {message}"),
            Self::Finished(message) => f.write_str(message),
        }
    }
}

/// The surface the dispatcher draws on
pub trait Frontend {
    /// Draw a snapshot against the session's source listing
    fn render(&mut self, source_lines: &[String], snapshot: &Snapshot);

    /// Tell the user about an error or a completion
    fn notify(&mut self, notice: Notice);
}

/// Whether a session is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session
    Inactive,
    /// A session is open and can be stepped
    Active,
}

/// What a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A snapshot was rendered
    Rendered,
    /// A completion notice was shown
    Finished,
    /// An error notice was shown
    Failed,
    /// Nothing to act on
    Ignored,
}

/// Drives a single debugging session over a [`Transport`]
#[derive(Debug)]
pub struct Dispatcher<T> {
    transport: T,
    session: Session,
    default_program: String,
}

impl<T: Transport> Dispatcher<T> {
    /// Create a dispatcher with no session
    pub fn new(transport: T) -> Self {
        Self { transport, session: Session::new(), default_program: DEFAULT_PROGRAM.to_string() }
    }

    /// Override the program started when none is named
    pub fn with_default_program(mut self, program: impl Into<String>) -> Self {
        self.default_program = program.into();
        self
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        if self.session.is_active() {
            Phase::Active
        } else {
            Phase::Inactive
        }
    }

    /// Read-only view of the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Program started when none is named
    pub fn default_program(&self) -> &str {
        &self.default_program
    }

    /// Open a session for `program`, or the default program when `None` or blank
    pub async fn start<F: Frontend>(&mut self, program: Option<&str>, ui: &mut F) -> Outcome {
        let program_name = program
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.default_program.as_str())
            .to_string();
        info!(program = %program_name, "Starting session");

        let request = StartRequest { program_name };
        match self.transport.post::<_, Started>(Endpoint::Start, &request).await {
            Ok(Envelope::Snapshot(started)) => {
                self.session.open(started.session_id, started.source_code);
                self.show(&started.snapshot, ui);
                Outcome::Rendered
            }
            Ok(Envelope::Error(message)) => {
                warn!(program = %request.program_name, "Backend refused to start: {}", message);
                ui.notify(Notice::Error(message));
                Outcome::Failed
            }
            Ok(Envelope::Completed { message }) => {
                info!(program = %request.program_name, "Program finished before its first stop");
                ui.notify(Notice::finished(message));
                Outcome::Finished
            }
            Err(err) => {
                warn!("Start failed: {}", err);
                ui.notify(Notice::fault(&err));
                Outcome::Failed
            }
        }
    }

    /// Execute one line
    pub async fn step<F: Frontend>(&mut self, ui: &mut F) -> Outcome {
        self.advance(Endpoint::Step, ui).await
    }

    /// Run until the program leaves `main`
    pub async fn run_to_end<F: Frontend>(&mut self, ui: &mut F) -> Outcome {
        self.advance(Endpoint::RunToEnd, ui).await
    }

    /// Terminate the session. The session is closed whatever the backend answers.
    pub async fn stop<F: Frontend>(&mut self, ui: &mut F) -> Outcome {
        let Some(session_id) = self.session.id().cloned() else {
            debug!("Stop requested with no session");
            return Outcome::Ignored;
        };

        let request = SessionRequest { session_id };
        let result = self.transport.post::<_, Value>(Endpoint::Stop, &request).await;
        self.session.close();

        match result {
            Ok(Envelope::Error(message)) => {
                warn!(session = %request.session_id, "Stop reported an error: {}", message);
                ui.notify(Notice::Error(message));
                Outcome::Failed
            }
            Err(err) => {
                warn!(session = %request.session_id, "Stop failed: {}", err);
                ui.notify(Notice::fault(&err));
                Outcome::Failed
            }
            Ok(Envelope::Completed { message }) => {
                info!(session = %request.session_id, "Session stopped");
                ui.notify(Notice::finished(message));
                Outcome::Finished
            }
            // Stop is terminal even if the backend sends a snapshot back
            Ok(Envelope::Snapshot(payload)) => {
                info!(session = %request.session_id, "Session stopped");
                let message = STOP_MESSAGE_FIELDS
                    .iter()
                    .find_map(|field| payload.get(*field).and_then(Value::as_str))
                    .filter(|message| !message.is_empty())
                    .map(str::to_string);
                ui.notify(Notice::finished(message));
                Outcome::Finished
            }
        }
    }

    /// Same as [`stop`](Self::stop)
    pub async fn reset<F: Frontend>(&mut self, ui: &mut F) -> Outcome {
        self.stop(ui).await
    }

    async fn advance<F: Frontend>(&mut self, endpoint: Endpoint, ui: &mut F) -> Outcome {
        let Some(session_id) = self.session.id().cloned() else {
            debug!(%endpoint, "No session to act on");
            return Outcome::Ignored;
        };

        let request = SessionRequest { session_id };
        match self.transport.post::<_, Snapshot>(endpoint, &request).await {
            Ok(Envelope::Snapshot(snapshot)) => {
                self.show(&snapshot, ui);
                Outcome::Rendered
            }
            Ok(Envelope::Error(message)) => {
                warn!(%endpoint, session = %request.session_id, "Backend error: {}", message);
                self.session.close();
                ui.notify(Notice::Error(message));
                Outcome::Failed
            }
            Ok(Envelope::Completed { message }) => {
                info!(%endpoint, session = %request.session_id, "Execution finished");
                self.session.close();
                ui.notify(Notice::finished(message));
                Outcome::Finished
            }
            // The session may still be alive on the backend; let the user retry
            Err(err) => {
                warn!(%endpoint, session = %request.session_id, "Request failed: {}", err);
                ui.notify(Notice::fault(&err));
                Outcome::Failed
            }
        }
    }

    fn show<F: Frontend>(&self, snapshot: &Snapshot, ui: &mut F) {
        let source_lines = self.session.source_lines();
        match snapshot.line {
            Some(line) if !line_in_range(line, source_lines.len()) => {
                warn!(line, lines = source_lines.len(), "Reported line is outside the source");
            }
            None => warn!("Snapshot has no current line"),
            Some(_) => {}
        }
        ui.render(source_lines, snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, View};
    use serde::{de::DeserializeOwned, Serialize};
    use serde_json::json;
    use std::{cell::RefCell, collections::VecDeque};

    /// Replies with canned bodies in order; `null` plays the part of a broken backend
    #[derive(Default)]
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Value>>,
        requests: RefCell<Vec<(Endpoint, Value)>>,
    }

    impl ScriptedTransport {
        fn new(replies: impl IntoIterator<Item = Value>) -> Self {
            Self { replies: RefCell::new(replies.into_iter().collect()), ..Default::default() }
        }

        fn requests(&self) -> Vec<(Endpoint, Value)> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for ScriptedTransport {
        async fn post<B, T>(
            &self,
            endpoint: Endpoint,
            body: &B,
        ) -> Result<Envelope<T>, TransportError>
        where
            B: Serialize,
            T: DeserializeOwned,
        {
            self.requests.borrow_mut().push((endpoint, serde_json::to_value(body).unwrap()));
            let reply = self.replies.borrow_mut().pop_front().expect("unexpected request");
            Envelope::from_value(reply)
                .map_err(|source| TransportError::Envelope { endpoint, source })
        }
    }

    #[derive(Default)]
    struct RecordingFrontend {
        views: Vec<View>,
        notices: Vec<Notice>,
    }

    impl Frontend for RecordingFrontend {
        fn render(&mut self, source_lines: &[String], snapshot: &Snapshot) {
            self.views.push(render(source_lines, snapshot));
        }

        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    fn byteshow_start() -> Value {
        json!({
            "sessionId": "abc",
            "sourceLines": ["int main(){", "  return 0;", "}"],
            "currentLine": 2,
            "stackFrames": [],
            "heapEntries": {}
        })
    }

    async fn active(replies: Vec<Value>) -> (Dispatcher<ScriptedTransport>, RecordingFrontend) {
        let mut script = vec![byteshow_start()];
        script.extend(replies);
        let mut dispatcher = Dispatcher::new(ScriptedTransport::new(script));
        let mut ui = RecordingFrontend::default();
        assert_eq!(dispatcher.start(Some("byteshow"), &mut ui).await, Outcome::Rendered);
        (dispatcher, ui)
    }

    #[tokio::test]
    async fn test_start_byteshow_renders_first_snapshot() {
        let (dispatcher, ui) = active(vec![]).await;

        assert_eq!(dispatcher.phase(), Phase::Active);
        assert_eq!(dispatcher.session().id().map(|id| id.as_str()), Some("abc"));
        assert_eq!(
            dispatcher.transport().requests(),
            vec![(Endpoint::Start, json!({ "program_name": "byteshow" }))]
        );

        let view = &ui.views[0];
        assert_eq!(view.highlighted_line().map(|l| l.text.as_str()), Some("  return 0;"));
        assert_eq!(view.stack.len(), 1);
        assert!(view.heap.is_empty());
        assert!(ui.notices.is_empty());
    }

    #[tokio::test]
    async fn test_start_substitutes_default_program() {
        let mut dispatcher =
            Dispatcher::new(ScriptedTransport::new([byteshow_start(), byteshow_start()]))
                .with_default_program("heap_test");
        let mut ui = RecordingFrontend::default();

        dispatcher.start(None, &mut ui).await;
        dispatcher.start(Some("  "), &mut ui).await;

        let names: Vec<_> =
            dispatcher.transport().requests().into_iter().map(|(_, body)| body).collect();
        assert_eq!(names, vec![json!({ "program_name": "heap_test" }); 2]);
    }

    #[tokio::test]
    async fn test_start_error_stays_inactive() {
        let mut dispatcher =
            Dispatcher::new(ScriptedTransport::new([json!({ "error": "Program not found" })]));
        let mut ui = RecordingFrontend::default();

        assert_eq!(dispatcher.start(Some("nope"), &mut ui).await, Outcome::Failed);
        assert_eq!(dispatcher.phase(), Phase::Inactive);
        assert_eq!(ui.notices, vec![Notice::Error("Program not found".to_string())]);
        assert_eq!(ui.notices[0].to_string(), "Error: Program not found");
        assert!(ui.views.is_empty());
    }

    #[tokio::test]
    async fn test_step_renders_with_session_source() {
        let (mut dispatcher, mut ui) = active(vec![json!({
            "line": "3",
            "source_code": ["something", "else"],
            "stack": [{ "name": "x", "value": "1" }],
            "heap": {}
        })])
        .await;

        assert_eq!(dispatcher.step(&mut ui).await, Outcome::Rendered);
        assert_eq!(dispatcher.phase(), Phase::Active);

        let view = ui.views.last().unwrap();
        assert_eq!(view.source.len(), 3);
        assert_eq!(view.highlighted_line().map(|l| l.text.as_str()), Some("}"));
        assert_eq!(view.stack[1].label(), "x → 1");
        assert_eq!(
            dispatcher.transport().requests()[1],
            (Endpoint::Step, json!({ "session_id": "abc" }))
        );
    }

    #[tokio::test]
    async fn test_step_done_closes_without_rendering() {
        let (mut dispatcher, mut ui) =
            active(vec![json!({ "statusMessage": "Done.", "doneFlag": true })]).await;

        assert_eq!(dispatcher.step(&mut ui).await, Outcome::Finished);
        assert_eq!(dispatcher.phase(), Phase::Inactive);
        assert_eq!(dispatcher.session(), &Session::new());
        assert_eq!(ui.views.len(), 1);
        assert_eq!(ui.notices, vec![Notice::Finished("Done.".to_string())]);
    }

    #[tokio::test]
    async fn test_step_error_closes_session() {
        let (mut dispatcher, mut ui) = active(vec![json!({ "error": "no such session" })]).await;

        assert_eq!(dispatcher.step(&mut ui).await, Outcome::Failed);
        assert_eq!(dispatcher.phase(), Phase::Inactive);
        assert!(dispatcher.session().source_lines().is_empty());
        assert_eq!(ui.notices, vec![Notice::Error("no such session".to_string())]);
    }

    #[tokio::test]
    async fn test_error_wins_over_snapshot_fields() {
        let (mut dispatcher, mut ui) = active(vec![json!({
            "error": "debugger crashed",
            "line": 2,
            "stack": [],
            "heap": {}
        })])
        .await;

        assert_eq!(dispatcher.run_to_end(&mut ui).await, Outcome::Failed);
        assert_eq!(ui.views.len(), 1);
        assert_eq!(dispatcher.phase(), Phase::Inactive);
    }

    #[tokio::test]
    async fn test_run_to_end_completion_uses_default_message() {
        let (mut dispatcher, mut ui) = active(vec![json!({ "done": true })]).await;

        assert_eq!(dispatcher.run_to_end(&mut ui).await, Outcome::Finished);
        assert_eq!(ui.notices, vec![Notice::Finished(DEFAULT_FINISHED_MESSAGE.to_string())]);
        assert_eq!(dispatcher.transport().requests()[1].0, Endpoint::RunToEnd);
    }

    #[tokio::test]
    async fn test_transport_fault_leaves_session_untouched() {
        let (mut dispatcher, mut ui) = active(vec![Value::Null]).await;
        let before = dispatcher.session().clone();

        assert_eq!(dispatcher.step(&mut ui).await, Outcome::Failed);
        assert_eq!(dispatcher.session(), &before);
        assert_eq!(dispatcher.phase(), Phase::Active);
        assert!(ui.notices[0].is_error());
    }

    #[tokio::test]
    async fn test_commands_without_session_are_ignored() {
        let mut dispatcher = Dispatcher::new(ScriptedTransport::default());
        let mut ui = RecordingFrontend::default();

        assert_eq!(dispatcher.step(&mut ui).await, Outcome::Ignored);
        assert_eq!(dispatcher.run_to_end(&mut ui).await, Outcome::Ignored);
        assert_eq!(dispatcher.stop(&mut ui).await, Outcome::Ignored);
        assert_eq!(dispatcher.reset(&mut ui).await, Outcome::Ignored);
        assert!(dispatcher.transport().requests().is_empty());
        assert!(ui.notices.is_empty());
    }

    #[tokio::test]
    async fn test_stop_is_terminal_regardless_of_payload() {
        let replies = [
            json!({ "message": "Session terminated." }),
            json!({ "line": 2, "stack": [], "heap": {} }),
            json!({ "error": "no such session" }),
            Value::Null,
        ];

        for reply in replies {
            let (mut dispatcher, mut ui) = active(vec![reply]).await;
            let outcome = dispatcher.stop(&mut ui).await;

            assert_ne!(outcome, Outcome::Rendered);
            assert_eq!(dispatcher.phase(), Phase::Inactive);
            assert_eq!(dispatcher.session(), &Session::new());
            assert_eq!(ui.views.len(), 1);
            assert_eq!(ui.notices.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_stop_reports_backend_message() {
        let (mut dispatcher, mut ui) =
            active(vec![json!({ "message": "Session terminated." })]).await;

        assert_eq!(dispatcher.reset(&mut ui).await, Outcome::Finished);
        assert_eq!(ui.notices, vec![Notice::Finished("Session terminated.".to_string())]);
        assert_eq!(
            dispatcher.transport().requests()[1],
            (Endpoint::Stop, json!({ "session_id": "abc" }))
        );
    }

    #[tokio::test]
    async fn test_stop_snapshot_reply_falls_back_to_status() {
        let (mut dispatcher, mut ui) = active(vec![json!({
            "line": 1,
            "stack": [],
            "status": "Session terminated by user"
        })])
        .await;

        assert_eq!(dispatcher.stop(&mut ui).await, Outcome::Finished);
        assert_eq!(dispatcher.phase(), Phase::Inactive);
        assert_eq!(ui.notices, vec![Notice::Finished("Session terminated by user".to_string())]);
    }

    #[tokio::test]
    async fn test_start_that_finishes_immediately_opens_nothing() {
        let mut dispatcher =
            Dispatcher::new(ScriptedTransport::new([json!({ "status": "Done.", "done": true })]));
        let mut ui = RecordingFrontend::default();

        assert_eq!(dispatcher.start(Some("byteshow"), &mut ui).await, Outcome::Finished);
        assert_eq!(dispatcher.phase(), Phase::Inactive);
        assert!(dispatcher.session().id().is_none());
        assert!(ui.views.is_empty());
        assert_eq!(ui.notices, vec![Notice::Finished("Done.".to_string())]);
    }

    #[tokio::test]
    async fn test_start_fault_keeps_open_session() {
        let (mut dispatcher, mut ui) = active(vec![Value::Null]).await;

        assert_eq!(dispatcher.start(Some("heap_test"), &mut ui).await, Outcome::Failed);
        assert_eq!(dispatcher.phase(), Phase::Active);
        assert_eq!(dispatcher.session().id().map(|id| id.as_str()), Some("abc"));
        assert_eq!(dispatcher.session().source_lines().len(), 3);
        assert_eq!(ui.views.len(), 1);
        assert!(ui.notices[0].is_error());
    }

    #[tokio::test]
    async fn test_out_of_range_line_renders_without_highlight() {
        let (mut dispatcher, mut ui) = active(vec![json!({ "line": 99, "stack": [] })]).await;

        assert_eq!(dispatcher.step(&mut ui).await, Outcome::Rendered);
        let view = ui.views.last().unwrap();
        assert!(view.highlighted_line().is_none());
        assert!(view.line_out_of_range());
        assert_eq!(dispatcher.phase(), Phase::Active);
    }
}
