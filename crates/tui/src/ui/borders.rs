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

//! Panel borders
//!
//! Rounded, double and thick Unicode borders, colored by focus.

use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::ColorScheme;

/// Border styles available to panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancedBorderStyle {
    /// Rounded corners
    Rounded,
    /// Double lines, for the main panel
    Double,
    /// Thick lines
    Thick,
}

/// Border builder for panels
#[derive(Debug, Clone)]
pub struct EnhancedBorder {
    style: EnhancedBorderStyle,
    focused: bool,
    title: Option<String>,
    focused_color: Color,
    unfocused_color: Color,
}

impl EnhancedBorder {
    /// Create a new border
    pub fn new(style: EnhancedBorderStyle) -> Self {
        Self {
            style,
            focused: false,
            title: None,
            focused_color: Color::Cyan,
            unfocused_color: Color::Gray,
        }
    }

    /// Set focus state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set border title
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Take both border colors from a scheme
    pub fn colors(mut self, theme: &ColorScheme) -> Self {
        self.focused_color = theme.focused_border;
        self.unfocused_color = theme.unfocused_border;
        self
    }

    /// Build the Block widget
    pub fn build(self) -> Block<'static> {
        let border_color = if self.focused { self.focused_color } else { self.unfocused_color };

        let border_type = match self.style {
            EnhancedBorderStyle::Rounded => BorderType::Rounded,
            EnhancedBorderStyle::Double => BorderType::Double,
            EnhancedBorderStyle::Thick => BorderType::Thick,
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(border_color));

        if let Some(title) = self.title {
            let title = if self.focused { format!("▶ {title} ") } else { format!(" {title} ") };
            block = block.title(title);
        }

        block
    }
}

/// Border presets, one per panel
pub struct BorderPresets;

impl BorderPresets {
    /// Source panel: double-line
    pub fn source(focused: bool, title: String, theme: &ColorScheme) -> Block<'static> {
        EnhancedBorder::new(EnhancedBorderStyle::Double)
            .focused(focused)
            .title(title)
            .colors(theme)
            .build()
    }

    /// Stack and heap panels: rounded
    pub fn display(focused: bool, title: String, theme: &ColorScheme) -> Block<'static> {
        EnhancedBorder::new(EnhancedBorderStyle::Rounded)
            .focused(focused)
            .title(title)
            .colors(theme)
            .build()
    }

    /// Program picker: thick
    pub fn programs(focused: bool, title: String, theme: &ColorScheme) -> Block<'static> {
        EnhancedBorder::new(EnhancedBorderStyle::Thick)
            .focused(focused)
            .title(title)
            .colors(theme)
            .build()
    }

    /// Notice popup: always focused, colored by severity
    pub fn notice(title: String, color: Color) -> Block<'static> {
        let mut border =
            EnhancedBorder::new(EnhancedBorderStyle::Double).focused(true).title(title);
        border.focused_color = color;
        border.build()
    }
}
