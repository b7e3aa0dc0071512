//! UI utilities and visual components
//!
//! Color schemes and border presets shared by every panel.

pub mod borders;
pub mod colors;

pub use borders::{BorderPresets, EnhancedBorder, EnhancedBorderStyle};
pub use colors::{ColorScheme, Theme};
