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

//! Main application state and logic
//!
//! [`App`] is the terminal [`Frontend`]: the dispatcher hands it snapshots
//! and notices, and it turns key presses into [`Command`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};
use std::fmt;
use stepview_client::{render, Dispatcher, Frontend, Notice, Outcome, Phase, Transport, View};
use stepview_common::types::Snapshot;
use tracing::{debug, info};

use crate::{
    config::ProgramEntry,
    panels::{
        EventResponse, HeapPanel, PanelContext, PanelTr, PanelType, ProgramsPanel, SourcePanel,
        StackPanel,
    },
    ui::{BorderPresets, ColorScheme, Theme},
};

const KEY_HINTS: &str =
    "↑/↓ select  Enter start  s step  r run to end  x stop  R reset  t theme  q quit";

/// Debugger commands a key press can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the selected program
    Start,
    /// Execute one line
    Step,
    /// Run to the end of `main`
    RunToEnd,
    /// Stop the session
    Stop,
    /// Same as stop
    Reset,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "Starting",
            Self::Step => "Stepping",
            Self::RunToEnd => "Running to end",
            Self::Stop => "Stopping",
            Self::Reset => "Resetting",
        })
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    programs: ProgramsPanel,
    source: SourcePanel,
    stack: StackPanel,
    heap: HeapPanel,
    /// Latest rendered snapshot
    view: Option<View>,
    /// Notice waiting to be dismissed
    notice: Option<Notice>,
    /// One-line feedback shown in the status bar
    hint: Option<String>,
    /// Command currently awaiting the backend
    pending: Option<Command>,
    phase: Phase,
    session_id: Option<String>,
    server_url: String,
    theme: Theme,
    colors: ColorScheme,
    should_exit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(server_url: impl Into<String>, programs: Vec<ProgramEntry>, theme: Theme) -> Self {
        Self {
            programs: ProgramsPanel::new(programs),
            source: SourcePanel::new(),
            stack: StackPanel,
            heap: HeapPanel,
            view: None,
            notice: None,
            hint: None,
            pending: None,
            phase: Phase::Inactive,
            session_id: None,
            server_url: server_url.into(),
            theme,
            colors: theme.into(),
            should_exit: false,
        }
    }

    /// Latest rendered snapshot
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Notice waiting to be dismissed
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Phase as of the last executed command
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Active theme
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the user asked to quit
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Select a program in the picker by name
    pub fn select_program(&mut self, name: &str) -> bool {
        self.programs.select_by_name(name)
    }

    /// Name of the program selected in the picker
    pub fn selected_program(&self) -> Option<&str> {
        self.programs.selected().map(|p| p.name.as_str())
    }

    /// Mark a command as in flight so the next frame can say so
    pub fn set_pending(&mut self, command: Command) {
        self.pending = Some(command);
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) -> EventResponse {
        if key.kind != KeyEventKind::Press {
            return EventResponse::NotHandled;
        }
        debug!("Key pressed: {:?}", key);

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_exit = true;
            return EventResponse::Exit;
        }

        // Any key dismisses a notice
        if self.notice.take().is_some() {
            return EventResponse::Handled;
        }
        self.hint = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_exit = true;
                EventResponse::Exit
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.programs.select_previous();
                EventResponse::Handled
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.programs.select_next();
                EventResponse::Handled
            }
            KeyCode::Char('t') => {
                self.set_theme(self.theme.next());
                EventResponse::Handled
            }
            KeyCode::Enter => EventResponse::Command(Command::Start),
            KeyCode::Char('s') => EventResponse::Command(Command::Step),
            KeyCode::Char('r') => EventResponse::Command(Command::RunToEnd),
            KeyCode::Char('x') => EventResponse::Command(Command::Stop),
            KeyCode::Char('R') => EventResponse::Command(Command::Reset),
            _ => EventResponse::NotHandled,
        }
    }

    /// Switch the color theme
    pub fn set_theme(&mut self, theme: Theme) {
        info!("Switched to theme: {}", theme.name());
        self.theme = theme;
        self.colors = theme.into();
    }

    /// Run a command against the dispatcher, with this app as its frontend
    pub async fn execute<T: Transport>(
        &mut self,
        command: Command,
        dispatcher: &mut Dispatcher<T>,
    ) -> Outcome {
        let outcome = match command {
            Command::Start => {
                let program = self.selected_program().map(str::to_string);
                dispatcher.start(program.as_deref(), self).await
            }
            Command::Step => dispatcher.step(self).await,
            Command::RunToEnd => dispatcher.run_to_end(self).await,
            Command::Stop => dispatcher.stop(self).await,
            Command::Reset => dispatcher.reset(self).await,
        };
        debug!(?command, ?outcome, "Command finished");
        self.sync(dispatcher, outcome)
    }

    /// Start `program` by name, whether or not the picker lists it
    pub async fn start_program<T: Transport>(
        &mut self,
        program: &str,
        dispatcher: &mut Dispatcher<T>,
    ) -> Outcome {
        let outcome = dispatcher.start(Some(program), self).await;
        debug!(program, ?outcome, "Start finished");
        self.sync(dispatcher, outcome)
    }

    fn sync<T: Transport>(&mut self, dispatcher: &Dispatcher<T>, outcome: Outcome) -> Outcome {
        self.pending = None;
        self.phase = dispatcher.phase();
        self.session_id = dispatcher.session().id().map(|id| id.to_string());
        // A closed session leaves nothing to show
        if self.phase == Phase::Inactive {
            self.view = None;
        }
        if outcome == Outcome::Ignored {
            self.hint = Some("No active session; press Enter to start one".to_string());
        }
        outcome
    }

    /// Render the application
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Fill(1),   // Panels
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.render_status_bar(frame, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(22),
                Constraint::Percentage(48),
                Constraint::Percentage(30),
            ])
            .split(rows[1]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[2]);

        let focused = match self.phase {
            Phase::Inactive => PanelType::Programs,
            Phase::Active => PanelType::Source,
        };
        let ctx = PanelContext { view: self.view.as_ref(), theme: &self.colors, focused };
        self.programs.render(frame, columns[0], &ctx);
        self.source.render(frame, columns[1], &ctx);
        self.stack.render(frame, right[0], &ctx);
        self.heap.render(frame, right[1], &ctx);

        let hints =
            Paragraph::new(KEY_HINTS).style(Style::default().fg(self.colors.help_text_color));
        frame.render_widget(hints, rows[2]);

        if let Some(notice) = &self.notice {
            render_notice(frame, notice, &self.colors);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame<'_>, area: Rect) {
        let session = match (&self.phase, &self.session_id) {
            (Phase::Active, Some(id)) => Span::styled(
                format!("● Session {id}"),
                Style::default().fg(self.colors.success_color),
            ),
            _ => Span::styled("○ No session", Style::default().fg(self.colors.unfocused_border)),
        };

        let mut spans = vec![
            Span::styled("stepview", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" | "),
            session,
            Span::raw(" | "),
            Span::styled(
                format!("Server: {}", self.server_url),
                Style::default().fg(self.colors.info_color),
            ),
            Span::raw(" | "),
            Span::raw(format!("Theme: {}", self.theme.description())),
        ];
        if let Some(command) = self.pending {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{command}..."),
                Style::default().fg(self.colors.warning_color),
            ));
        } else if let Some(hint) = &self.hint {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(hint.clone(), Style::default().fg(self.colors.warning_color)));
        }

        let status =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(self.colors.status_bg));
        frame.render_widget(status, area);
    }
}

impl Frontend for App {
    fn render(&mut self, source_lines: &[String], snapshot: &Snapshot) {
        self.view = Some(render(source_lines, snapshot));
    }

    fn notify(&mut self, notice: Notice) {
        info!("Notice: {}", notice);
        self.notice = Some(notice);
    }
}

fn render_notice(frame: &mut Frame<'_>, notice: &Notice, colors: &ColorScheme) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let (title, color) = match notice {
        Notice::Error(_) => ("Error", colors.error_color),
        Notice::Finished(_) => ("Finished", colors.success_color),
    };
    let text = vec![
        Line::from(notice.message().to_string()),
        Line::from(""),
        Line::styled("Press any key to continue", Style::default().fg(colors.help_text_color)),
    ];
    let paragraph = Paragraph::new(text)
        .block(BorderPresets::notice(title.to_string(), color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
