//! Heap panel

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{PanelContext, PanelTr, PanelType};
use crate::ui::BorderPresets;

/// Heap panel
#[derive(Debug, Default)]
pub struct HeapPanel;

impl PanelTr for HeapPanel {
    fn panel_type(&self) -> PanelType {
        PanelType::Heap
    }

    fn title(&self, ctx: &PanelContext<'_>) -> String {
        match ctx.view {
            Some(view) => format!("Heap ({})", view.heap.len()),
            None => "Heap".to_string(),
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &PanelContext<'_>) {
        let block = BorderPresets::display(self.is_focused(ctx), self.title(ctx), ctx.theme);

        let rows = ctx.view.map(|view| view.heap.as_slice()).unwrap_or_default();
        if rows.is_empty() {
            let paragraph = Paragraph::new("Heap is empty")
                .style(Style::default().fg(ctx.theme.help_text_color))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem<'_>> = rows
            .iter()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::styled(row.address.clone(), Style::default().fg(ctx.theme.address_color)),
                    Span::raw(" : "),
                    Span::styled(row.value.clone(), Style::default().fg(ctx.theme.value_color)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
