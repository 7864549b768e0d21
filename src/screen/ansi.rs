//! ANSI escape sequence palette.

use super::{Color, Palette};

/// Escape character for ANSI sequences.
const ESC: char = '\x1b';

/// Palette for terminals that understand ANSI SGR sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiPalette;

impl Palette for AnsiPalette {
    fn fg(&self, color: Color) -> String {
        format!("{ESC}[{}m", color.fg_code())
    }

    fn bold(&self) -> String {
        format!("{ESC}[1m")
    }

    fn dim(&self) -> String {
        format!("{ESC}[2m")
    }

    fn reset(&self) -> String {
        format!("{ESC}[0m")
    }

    fn is_ansi_enabled(&self) -> bool {
        true
    }
}
