//! Stack panel: the synthetic root frame followed by the locals

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{PanelContext, PanelTr, PanelType};
use crate::ui::BorderPresets;

/// Stack panel
#[derive(Debug, Default)]
pub struct StackPanel;

impl PanelTr for StackPanel {
    fn panel_type(&self) -> PanelType {
        PanelType::Stack
    }

    fn title(&self, ctx: &PanelContext<'_>) -> String {
        match ctx.view {
            Some(view) => format!("Stack ({})", view.stack.len().saturating_sub(1)),
            None => "Stack".to_string(),
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &PanelContext<'_>) {
        let block = BorderPresets::display(self.is_focused(ctx), self.title(ctx), ctx.theme);

        let Some(view) = ctx.view else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let items: Vec<ListItem<'_>> = view
            .stack
            .iter()
            .map(|row| match &row.value {
                Some(value) => ListItem::new(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(row.name.clone(), Style::default().fg(ctx.theme.name_color)),
                    Span::raw(" → "),
                    Span::styled(value.clone(), Style::default().fg(ctx.theme.value_color)),
                ])),
                None => ListItem::new(Span::styled(
                    row.name.clone(),
                    Style::default().fg(ctx.theme.info_color).add_modifier(Modifier::BOLD),
                )),
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
