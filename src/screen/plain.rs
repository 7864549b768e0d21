//! Plain text palette for output without escape sequences.

use super::{Color, Palette};

/// Palette that emits no escape sequences. Used with `--no-color` and when
/// output is not a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPalette;

impl Palette for PlainPalette {
    fn fg(&self, _color: Color) -> String {
        String::new()
    }

    fn bold(&self) -> String {
        String::new()
    }

    fn dim(&self) -> String {
        String::new()
    }

    fn reset(&self) -> String {
        String::new()
    }

    fn is_ansi_enabled(&self) -> bool {
        false
    }
}
