//! Color schemes and theming system
//!
//! Each [`Theme`] maps to a [`ColorScheme`] of semantic colors; panels only
//! ever ask the scheme, never hard-code a color.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Semantic color mapping for consistent theming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    /// Border of the panel that has focus
    pub focused_border: Color,
    /// Border of every other panel
    pub unfocused_border: Color,

    /// Background of the line the debugger is paused on
    pub current_line_bg: Color,
    /// Foreground of the line the debugger is paused on
    pub current_line_fg: Color,
    /// Line-number gutter
    pub line_number_color: Color,

    /// Variable names in the stack panel
    pub name_color: Color,
    /// Values in the stack and heap panels
    pub value_color: Color,
    /// Heap addresses
    pub address_color: Color,

    /// Error notices
    pub error_color: Color,
    /// Completion notices and the active-session indicator
    pub success_color: Color,
    /// Out-of-range line warnings
    pub warning_color: Color,
    /// Informational text
    pub info_color: Color,

    /// Selected program in the picker
    pub selection_bg: Color,
    /// Selected program text
    pub selection_fg: Color,
    /// Key hints
    pub help_text_color: Color,
    /// Status bar background
    pub status_bg: Color,
}

/// Available themes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Dark theme with purples and neon accents
    #[default]
    CyberpunkDark,
    /// Classic green on black
    TerminalHacker,
    /// Soft grays and blues
    ModernIde,
    /// High contrast for accessibility
    HighContrast,
}

impl Theme {
    /// All themes, in cycle order
    pub fn all() -> &'static [Self] {
        &[Self::CyberpunkDark, Self::TerminalHacker, Self::ModernIde, Self::HighContrast]
    }

    /// Name used in the configuration file
    pub fn name(&self) -> &'static str {
        match self {
            Self::CyberpunkDark => "cyberpunk_dark",
            Self::TerminalHacker => "terminal_hacker",
            Self::ModernIde => "modern_ide",
            Self::HighContrast => "high_contrast",
        }
    }

    /// Name shown in the status bar
    pub fn description(&self) -> &'static str {
        match self {
            Self::CyberpunkDark => "Cyberpunk Dark",
            Self::TerminalHacker => "Terminal Hacker",
            Self::ModernIde => "Modern IDE",
            Self::HighContrast => "High Contrast",
        }
    }

    /// Next theme in the cycle
    pub fn next(&self) -> Self {
        match self {
            Self::CyberpunkDark => Self::TerminalHacker,
            Self::TerminalHacker => Self::ModernIde,
            Self::ModernIde => Self::HighContrast,
            Self::HighContrast => Self::CyberpunkDark,
        }
    }
}

impl From<Theme> for ColorScheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::CyberpunkDark => cyberpunk_dark(),
            Theme::TerminalHacker => terminal_hacker(),
            Theme::ModernIde => modern_ide(),
            Theme::HighContrast => high_contrast(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Theme::default().into()
    }
}

fn cyberpunk_dark() -> ColorScheme {
    ColorScheme {
        focused_border: Color::Rgb(138, 43, 226),   // Blue-violet
        unfocused_border: Color::Rgb(75, 75, 75),   // Dim gray
        current_line_bg: Color::Rgb(75, 0, 130),    // Indigo
        current_line_fg: Color::Rgb(255, 255, 255), // White
        line_number_color: Color::Rgb(108, 108, 108),
        name_color: Color::Rgb(135, 206, 250),  // Light sky blue
        value_color: Color::Rgb(255, 165, 0),   // Orange
        address_color: Color::Rgb(0, 255, 255), // Cyan
        error_color: Color::Rgb(220, 20, 60),   // Crimson
        success_color: Color::Rgb(50, 205, 50), // Lime green
        warning_color: Color::Rgb(255, 215, 0), // Gold
        info_color: Color::Rgb(30, 144, 255),   // Dodger blue
        selection_bg: Color::Rgb(72, 61, 139),  // Dark slate blue
        selection_fg: Color::Rgb(255, 255, 255),
        help_text_color: Color::Rgb(147, 112, 219), // Medium purple
        status_bg: Color::Rgb(20, 20, 30),
    }
}

fn terminal_hacker() -> ColorScheme {
    ColorScheme {
        focused_border: Color::Rgb(0, 255, 0),
        unfocused_border: Color::Rgb(0, 128, 0),
        current_line_bg: Color::Rgb(0, 64, 0),
        current_line_fg: Color::Rgb(255, 255, 255),
        line_number_color: Color::Rgb(0, 128, 0),
        name_color: Color::Rgb(255, 255, 255),
        value_color: Color::Rgb(0, 255, 127),
        address_color: Color::Rgb(0, 255, 255),
        error_color: Color::Rgb(255, 0, 0),
        success_color: Color::Rgb(0, 255, 0),
        warning_color: Color::Rgb(255, 255, 0),
        info_color: Color::Rgb(0, 255, 255),
        selection_bg: Color::Rgb(0, 128, 0),
        selection_fg: Color::Rgb(255, 255, 255),
        help_text_color: Color::Rgb(0, 192, 0),
        status_bg: Color::Rgb(0, 0, 0),
    }
}

fn modern_ide() -> ColorScheme {
    ColorScheme {
        focused_border: Color::Rgb(0, 122, 204), // VS Code blue
        unfocused_border: Color::Rgb(60, 60, 60),
        current_line_bg: Color::Rgb(0, 122, 204),
        current_line_fg: Color::Rgb(255, 255, 255),
        line_number_color: Color::Rgb(133, 133, 133),
        name_color: Color::Rgb(156, 220, 254),
        value_color: Color::Rgb(206, 145, 120),
        address_color: Color::Rgb(181, 206, 168),
        error_color: Color::Rgb(244, 71, 71),
        success_color: Color::Rgb(106, 153, 85),
        warning_color: Color::Rgb(255, 204, 102),
        info_color: Color::Rgb(86, 156, 214),
        selection_bg: Color::Rgb(0, 122, 204),
        selection_fg: Color::Rgb(255, 255, 255),
        help_text_color: Color::Rgb(204, 204, 204),
        status_bg: Color::Rgb(30, 30, 30),
    }
}

fn high_contrast() -> ColorScheme {
    ColorScheme {
        focused_border: Color::Rgb(255, 255, 255),
        unfocused_border: Color::Rgb(128, 128, 128),
        current_line_bg: Color::Rgb(255, 255, 255),
        current_line_fg: Color::Rgb(0, 0, 0),
        line_number_color: Color::Rgb(192, 192, 192),
        name_color: Color::Rgb(255, 255, 0),
        value_color: Color::Rgb(255, 255, 255),
        address_color: Color::Rgb(0, 255, 255),
        error_color: Color::Rgb(255, 0, 0),
        success_color: Color::Rgb(0, 255, 0),
        warning_color: Color::Rgb(255, 255, 0),
        info_color: Color::Rgb(0, 0, 255),
        selection_bg: Color::Rgb(255, 255, 255),
        selection_fg: Color::Rgb(0, 0, 0),
        help_text_color: Color::Rgb(255, 255, 255),
        status_bg: Color::Rgb(0, 0, 0),
    }
}
