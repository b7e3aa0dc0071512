//! Program picker
//!
//! Lists the configured catalog; the selected entry is what `Enter` starts.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::{PanelContext, PanelTr, PanelType};
use crate::{config::ProgramEntry, ui::BorderPresets};

/// Program picker panel
#[derive(Debug, Default)]
pub struct ProgramsPanel {
    programs: Vec<ProgramEntry>,
    selected: usize,
}

impl ProgramsPanel {
    /// Create a picker over `programs`, with the first entry selected
    pub fn new(programs: Vec<ProgramEntry>) -> Self {
        Self { programs, selected: 0 }
    }

    /// Currently selected program
    pub fn selected(&self) -> Option<&ProgramEntry> {
        self.programs.get(self.selected)
    }

    /// Move the selection down, wrapping around
    pub fn select_next(&mut self) {
        if !self.programs.is_empty() {
            self.selected = (self.selected + 1) % self.programs.len();
        }
    }

    /// Move the selection up, wrapping around
    pub fn select_previous(&mut self) {
        if !self.programs.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.programs.len() - 1);
        }
    }

    /// Select a program by name; returns whether it is in the catalog
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.programs.iter().position(|p| p.name == name) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }
}

impl PanelTr for ProgramsPanel {
    fn panel_type(&self) -> PanelType {
        PanelType::Programs
    }

    fn title(&self, _ctx: &PanelContext<'_>) -> String {
        "Programs".to_string()
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &PanelContext<'_>) {
        let focused = self.is_focused(ctx);
        let items: Vec<ListItem<'_>> = self
            .programs
            .iter()
            .enumerate()
            .map(|(idx, program)| {
                let mut spans = vec![Span::raw(program.name.clone())];
                if !program.description.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", program.description),
                        Style::default().fg(ctx.theme.help_text_color),
                    ));
                }

                let style = if idx == self.selected {
                    Style::default().bg(ctx.theme.selection_bg).fg(ctx.theme.selection_fg)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect();

        let block = BorderPresets::programs(focused, self.title(ctx), ctx.theme);
        frame.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ProgramsPanel {
        ProgramsPanel::new(vec![
            ProgramEntry::new("byteshow", ""),
            ProgramEntry::new("heap_test", ""),
            ProgramEntry::new("fib", ""),
        ])
    }

    #[test]
    fn test_selection_wraps() {
        let mut panel = catalog();
        panel.select_previous();
        assert_eq!(panel.selected().map(|p| p.name.as_str()), Some("fib"));
        panel.select_next();
        assert_eq!(panel.selected().map(|p| p.name.as_str()), Some("byteshow"));
    }

    #[test]
    fn test_select_by_name() {
        let mut panel = catalog();
        assert!(panel.select_by_name("heap_test"));
        assert_eq!(panel.selected().map(|p| p.name.as_str()), Some("heap_test"));
        assert!(!panel.select_by_name("missing"));
        assert_eq!(panel.selected().map(|p| p.name.as_str()), Some("heap_test"));
    }

    #[test]
    fn test_empty_catalog() {
        let mut panel = ProgramsPanel::default();
        panel.select_next();
        panel.select_previous();
        assert!(panel.selected().is_none());
    }
}
