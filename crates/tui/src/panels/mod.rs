//! Panel framework and implementations
//!
//! Every panel draws one part of the current [`View`]; the program picker
//! additionally owns the catalog and the selection.

use ratatui::{layout::Rect, Frame};
use std::fmt::Debug;
use stepview_client::View;

use crate::{app::Command, ui::ColorScheme};

/// Panel types for identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelType {
    /// Program picker
    Programs,
    /// Source listing with the current line highlighted
    Source,
    /// Root frame and locals
    Stack,
    /// Heap cells
    Heap,
}

/// Response from key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Event was handled, no further action needed
    Handled,
    /// Event was not handled
    NotHandled,
    /// Run a debugger command
    Command(Command),
    /// Request application exit
    Exit,
}

/// What a panel needs to draw itself
#[derive(Debug, Clone, Copy)]
pub struct PanelContext<'a> {
    /// Latest rendered snapshot, if any
    pub view: Option<&'a View>,
    /// Active color scheme
    pub theme: &'a ColorScheme,
    /// Panel that currently has focus
    pub focused: PanelType,
}

/// Trait for UI panels
pub trait PanelTr: Debug {
    /// Get the panel type
    fn panel_type(&self) -> PanelType;

    /// Get panel title for display
    fn title(&self, ctx: &PanelContext<'_>) -> String;

    /// Render the panel content
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &PanelContext<'_>);

    /// Whether this panel currently has focus
    fn is_focused(&self, ctx: &PanelContext<'_>) -> bool {
        ctx.focused == self.panel_type()
    }
}

pub mod heap;
pub mod programs;
pub mod source;
pub mod stack;

pub use heap::HeapPanel;
pub use programs::ProgramsPanel;
pub use source::SourcePanel;
pub use stack::StackPanel;
