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

//! Terminal User Interface for stepview
//!
//! This crate provides the interactive terminal client and a plain-text
//! frontend, both driving a [`Dispatcher`] from `stepview-client`.

mod app;
mod config;
mod panels;
mod plain;
mod ui;

pub use app::{App, Command};
pub use config::{Config, ProgramEntry, ServerConfig, DEFAULT_SERVER_URL};
pub use panels::{EventResponse, PanelType};
pub use plain::{run_trace, PlainFrontend, TraceOptions, TraceSummary, DEFAULT_MAX_STEPS};
pub use ui::{BorderPresets, ColorScheme, EnhancedBorder, EnhancedBorderStyle, Theme};

use crossterm::{
    event::{Event, EventStream, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::Result;
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use stepview_client::{Dispatcher, HttpTransport, Phase};
use tracing::{debug, info, warn};

/// Configuration for the TUI
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Backend URL
    pub server_url: String,
    /// Per-request timeout; none waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Program started when the picker is empty
    pub default_program: String,
    /// Programs offered by the picker
    pub programs: Vec<ProgramEntry>,
    /// Initial color theme
    pub theme: Theme,
    /// Program to start as soon as the UI is up
    pub autostart: Option<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TuiConfig {
    fn from(config: &Config) -> Self {
        Self {
            server_url: config.server.url.clone(),
            request_timeout: config.request_timeout(),
            default_program: config.default_program.clone(),
            programs: config.catalog(),
            theme: config.theme,
            autostart: None,
        }
    }
}

/// Main TUI runner that manages the terminal interface and event loop
pub struct Tui {
    /// The main application state and panel management
    app: App,
    /// Owns the session; commands run inline, one at a time
    dispatcher: Dispatcher<HttpTransport>,
    /// Terminal backend for rendering and input handling
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    /// Program to start before the first key press
    autostart: Option<String>,
}

impl Tui {
    /// Create a new TUI instance
    pub fn new(config: TuiConfig) -> Result<Self> {
        info!("Initializing TUI with config: {:?}", config);

        // Build the client before touching the terminal so errors print normally
        let transport = HttpTransport::with_timeout(&config.server_url, config.request_timeout)?;
        let dispatcher =
            Dispatcher::new(transport).with_default_program(config.default_program.clone());
        let app = App::new(config.server_url.clone(), config.programs.clone(), config.theme);

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self { app, dispatcher, terminal, autostart: config.autostart })
    }

    /// Run the main TUI event loop
    pub async fn run(mut self) -> Result<()> {
        info!("Starting TUI event loop");

        if let Some(program) = self.autostart.take() {
            if !self.app.select_program(&program) {
                warn!("Program {} is not in the catalog; asking the backend anyway", program);
            }
            self.app.set_pending(Command::Start);
            self.terminal.draw(|frame| self.app.draw(frame))?;
            self.app.start_program(&program, &mut self.dispatcher).await;
        }

        let mut event_stream = EventStream::new();
        let result = loop {
            self.terminal.draw(|frame| self.app.draw(frame))?;

            match event_stream.next().await {
                Some(Ok(Event::Key(key_event))) => {
                    if self.handle_key_event(key_event).await? {
                        break Ok(());
                    }
                }
                Some(Ok(Event::Resize(width, height))) => {
                    debug!("Terminal resized: {}x{}", width, height);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e.into()),
                None => break Ok(()),
            }

            if self.app.should_exit() {
                info!("App requested exit");
                break Ok(());
            }
        };

        // Do not leave a debugger process behind on the backend
        if self.dispatcher.phase() == Phase::Active {
            info!("Stopping open session before exit");
            self.app.execute(Command::Stop, &mut self.dispatcher).await;
        }

        info!("TUI event loop ended");
        result
    }

    // Handle a single key event, returning true if the app should exit
    async fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        match self.app.handle_key_event(key_event) {
            EventResponse::Exit => {
                info!("Exit requested");
                return Ok(true);
            }
            EventResponse::Command(command) => self.run_command(command).await?,
            EventResponse::Handled => {}
            EventResponse::NotHandled => {
                debug!("Unhandled key event: {:?}", key_event);
            }
        }

        Ok(false)
    }

    // Show the command as pending, then await it before reading more input
    async fn run_command(&mut self, command: Command) -> Result<()> {
        self.app.set_pending(command);
        self.terminal.draw(|frame| self.app.draw(frame))?;
        self.app.execute(command, &mut self.dispatcher).await;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Public API for the TUI module
pub mod api {
    use super::*;

    /// Start the TUI with the given configuration
    pub async fn start_tui(config: TuiConfig) -> Result<()> {
        let tui = Tui::new(config)?;
        tui.run().await
    }
}
