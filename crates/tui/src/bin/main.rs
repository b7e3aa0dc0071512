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

//! stepview - Step-Through Debugger Client
//!
//! Interactive terminal client by default; `stepview trace` prints every
//! step as plain text instead.

use clap::{Parser, Subcommand};
use eyre::{bail, Result};
use std::{io, path::PathBuf};
use stepview_client::{Dispatcher, HttpTransport, Outcome};
use stepview_common::logging;
use stepview_tui::{Config, TraceOptions, TuiConfig, DEFAULT_MAX_STEPS};
use tracing::Level;

/// Step-through debugger client
#[derive(Debug, Parser)]
#[command(name = "stepview")]
#[command(about = "Step-through debugger client for C programs", version)]
struct Args {
    /// Debugger backend URL (overrides the config file)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Config file path (uses ~/.stepview.toml if not specified)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start this program as soon as the interface is up
    #[arg(long)]
    program: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a program non-interactively and print every step
    Trace {
        /// Program to debug (the configured default if omitted)
        program: Option<String>,

        /// Stop the session after this many steps
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Run to the end in a single request instead of stepping
        #[arg(long)]
        run_to_end: bool,

        /// Log requests to stderr and to a rolling log file
        #[arg(short, long)]
        verbose: bool,
    },
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load().unwrap_or_default(),
    };
    if let Some(url) = &args.url {
        config.server.url = url.clone();
    }
    Ok(config)
}

async fn trace(config: &Config, options: TraceOptions) -> Result<()> {
    let transport = HttpTransport::with_timeout(&config.server.url, config.request_timeout())?;
    let mut dispatcher =
        Dispatcher::new(transport).with_default_program(config.default_program.clone());

    let summary = stepview_tui::run_trace(&mut dispatcher, &options, io::stdout().lock()).await?;
    tracing::info!(steps = summary.steps, outcome = ?summary.outcome, "Trace finished");

    if summary.outcome == Outcome::Failed {
        bail!("trace ended with an error");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    match args.command {
        Some(Commands::Trace { program, max_steps, run_to_end, verbose }) => {
            // Logs go to stderr so stdout carries only the trace
            if verbose {
                logging::init_logging("stepview-trace", true)?;
            } else {
                logging::init_simple_logging(Level::WARN)?;
            }
            trace(&config, TraceOptions { program, max_steps, run_to_end }).await
        }
        None => {
            // Setup file-only logging for TUI (logs go to file, not terminal)
            let log_dir = logging::init_file_only_logging("stepview")?;
            eprintln!("stepview logs: {}", log_dir.display());

            let mut tui_config = TuiConfig::from(&config);
            tui_config.autostart = args.program;

            tracing::info!("Connecting to debugger backend at: {}", tui_config.server_url);
            match stepview_tui::api::start_tui(tui_config).await {
                Ok(_) => {
                    tracing::info!("TUI exited normally");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("TUI error: {}", e);
                    Err(e)
                }
            }
        }
    }
}
