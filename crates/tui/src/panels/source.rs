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

//! Source panel
//!
//! Shows the whole listing of the open session, scrolled so the current
//! line stays in the middle of the viewport.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{PanelContext, PanelTr, PanelType};
use crate::ui::BorderPresets;

/// Source listing panel
#[derive(Debug, Default)]
pub struct SourcePanel {
    /// First visible line (0-based)
    scroll_offset: usize,
}

impl SourcePanel {
    /// Create a new source panel
    pub fn new() -> Self {
        Self::default()
    }

    /// First visible line (0-based)
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Keep `target` (0-based) centered, without scrolling past the end
    fn follow(&mut self, target: Option<usize>, total: usize, height: usize) {
        let max_offset = total.saturating_sub(height);
        if let Some(target) = target {
            self.scroll_offset = target.saturating_sub(height / 2);
        }
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

impl PanelTr for SourcePanel {
    fn panel_type(&self) -> PanelType {
        PanelType::Source
    }

    fn title(&self, ctx: &PanelContext<'_>) -> String {
        let Some(view) = ctx.view else { return "Source".to_string() };

        let mut title = match &view.location {
            Some(location) => format!("Source - {location}"),
            None => "Source".to_string(),
        };
        if view.line_out_of_range() {
            if let Some(line) = view.current_line {
                title.push_str(&format!(" [line {line} not in listing]"));
            }
        }
        title
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &PanelContext<'_>) {
        let block = BorderPresets::source(self.is_focused(ctx), self.title(ctx), ctx.theme);

        let Some(view) = ctx.view.filter(|view| !view.source.is_empty()) else {
            let paragraph = Paragraph::new("No session. Pick a program and press Enter.")
                .style(Style::default().fg(ctx.theme.help_text_color))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        let height = area.height.saturating_sub(2) as usize;
        let highlighted = view.highlighted_line().map(|line| line.number - 1);
        self.follow(highlighted, view.source.len(), height);

        let width = view.gutter_width();
        let items: Vec<ListItem<'_>> = view
            .source
            .iter()
            .skip(self.scroll_offset)
            .take(height)
            .map(|line| {
                let marker = if line.highlighted { "►" } else { " " };
                let content = Line::from(vec![
                    Span::styled(
                        format!("{:>width$} ", line.number),
                        Style::default().fg(ctx.theme.line_number_color),
                    ),
                    Span::raw(format!("{marker} │ ")),
                    Span::raw(line.text.clone()),
                ]);

                let style = if line.highlighted {
                    Style::default()
                        .bg(ctx.theme.current_line_bg)
                        .fg(ctx.theme.current_line_fg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(content).style(style)
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
