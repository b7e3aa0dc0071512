//! Plain-text frontend
//!
//! Writes every view and notice as text, for scripting and for terminals
//! where the interactive client is not an option.

use eyre::{Context, Result};
use std::io::{self, Write};
use stepview_client::{render, Dispatcher, Frontend, Notice, Outcome, Phase, Transport};
use stepview_common::types::Snapshot;
use tracing::info;

/// Step budget for `trace` when none is given
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Frontend that prints to any writer
///
/// The [`Frontend`] methods cannot fail, so the first write error is kept
/// and reported by [`PlainFrontend::finish`].
#[derive(Debug)]
pub struct PlainFrontend<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> PlainFrontend<W> {
    /// Print to `out`
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and hand back the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write(&mut self, text: &str) {
        if self.error.is_none() {
            if let Err(err) = self.out.write_all(text.as_bytes()) {
                self.error = Some(err);
            }
        }
    }
}

impl<W: Write> Frontend for PlainFrontend<W> {
    fn render(&mut self, source_lines: &[String], snapshot: &Snapshot) {
        let view = render(source_lines, snapshot);
        self.write(&format!("{view}\n"));
    }

    fn notify(&mut self, notice: Notice) {
        self.write(&format!("{notice}\n"));
    }
}

/// What `trace` should do after starting the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOptions {
    /// Program to start; the dispatcher's default when `None`
    pub program: Option<String>,
    /// Stop the session after this many steps
    pub max_steps: usize,
    /// Run to the end in one request instead of stepping
    pub run_to_end: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self { program: None, max_steps: DEFAULT_MAX_STEPS, run_to_end: false }
    }
}

/// How a trace ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSummary {
    /// Step requests sent after start
    pub steps: usize,
    /// Outcome of the last start, step or run-to-end
    pub outcome: Outcome,
}

/// Start a program, drive it to completion and print every transition
///
/// A session still open when the step budget runs out is stopped.
pub async fn run_trace<T: Transport, W: Write>(
    dispatcher: &mut Dispatcher<T>,
    options: &TraceOptions,
    out: W,
) -> Result<TraceSummary> {
    let mut ui = PlainFrontend::new(out);
    let mut steps = 0;

    let mut outcome = dispatcher.start(options.program.as_deref(), &mut ui).await;
    if outcome == Outcome::Rendered {
        if options.run_to_end {
            outcome = dispatcher.run_to_end(&mut ui).await;
        } else {
            while steps < options.max_steps && outcome == Outcome::Rendered {
                outcome = dispatcher.step(&mut ui).await;
                steps += 1;
            }
        }
    }

    if dispatcher.phase() == Phase::Active {
        info!(steps, "Session still open; stopping it");
        dispatcher.stop(&mut ui).await;
    }

    ui.finish().with_context(|| "Failed to write trace output")?;
    Ok(TraceSummary { steps, outcome })
}
