//! Color palette for the wizard.
//!
//! A single immutable value constructed once at startup and passed into the
//! renderer, never read from ambient state.

use ratatui::style::Color;

const HOT_PINK: Color = Color::Rgb(0xff, 0x69, 0xb7);
const PURPLE: Color = Color::Rgb(0xbd, 0x93, 0xf9);
const RED: Color = Color::Rgb(0xff, 0x55, 0x55);
const GREY: Color = Color::Rgb(0x44, 0x47, 0x5a);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Service-generated text (detected stack, workflow preview).
    pub result: Color,
    /// User-entered text.
    pub user_input: Color,
    /// The highlighted confirmation option.
    pub selected: Color,
    pub error: Color,
    /// Help lines and placeholders.
    pub muted: Color,
    pub border: Color,
    pub spinner: Color,
}

impl Theme {
    pub fn default_dark() -> Self {
        Self {
            result: HOT_PINK,
            user_input: PURPLE,
            selected: PURPLE,
            error: RED,
            muted: GREY,
            border: GREY,
            spinner: HOT_PINK,
        }
    }
}
