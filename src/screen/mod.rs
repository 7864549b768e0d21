//! Screen display module.
//!
//! Text views of the upload widget, the file page and the SSH panel. Styling
//! goes through a [`Palette`], which is either ANSI escape sequences or a
//! plain-text fallback.

mod ansi;
mod file_page;
mod plain;
mod ssh;
mod upload;

pub use ansi::AnsiPalette;
pub use file_page::{render_file_info, render_file_page};
pub use plain::PlainPalette;
pub use ssh::{render_docs, render_ssh_modal, DocsTopic};
pub use upload::render_upload;

/// Terminal colors (ANSI standard 8 colors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red (color code 1).
    Red = 1,
    /// Green (color code 2).
    Green = 2,
    /// Yellow (color code 3).
    Yellow = 3,
    /// Cyan (color code 6).
    Cyan = 6,
}

impl Color {
    /// Get the ANSI color code for foreground.
    pub fn fg_code(self) -> u8 {
        30 + self as u8
    }
}

/// Text styling for rendered views.
///
/// The primitive methods return escape sequences (empty for plain output);
/// the semantic methods wrap text for a role in the view.
pub trait Palette: Send + Sync {
    /// Set foreground (text) color.
    fn fg(&self, color: Color) -> String;

    /// Enable bold text.
    fn bold(&self) -> String;

    /// Enable dim text.
    fn dim(&self) -> String;

    /// Reset all text attributes to default.
    fn reset(&self) -> String;

    /// Check if ANSI escape sequences are enabled.
    fn is_ansi_enabled(&self) -> bool;

    /// Titles.
    fn heading(&self, text: &str) -> String {
        format!("{}{}{}", self.bold(), text, self.reset())
    }

    /// Links, commands and other things the user acts on.
    fn accent(&self, text: &str) -> String {
        format!("{}{}{}", self.fg(Color::Cyan), text, self.reset())
    }

    /// Confirmations.
    fn success(&self, text: &str) -> String {
        format!("{}{}{}", self.fg(Color::Green), text, self.reset())
    }

    /// Inline error banners.
    fn error(&self, text: &str) -> String {
        format!("{}{}{}", self.fg(Color::Red), text, self.reset())
    }

    /// Secondary details.
    fn muted(&self, text: &str) -> String {
        format!("{}{}{}", self.dim(), text, self.reset())
    }

    /// In-progress notices.
    fn pending(&self, text: &str) -> String {
        format!("{}{}{}", self.fg(Color::Yellow), text, self.reset())
    }
}

/// Create a palette based on ANSI support.
///
/// # Example
///
/// ```
/// use sdrop::screen::create_palette;
///
/// let palette = create_palette(true);
/// assert!(palette.is_ansi_enabled());
/// assert_ne!(palette.error("oops"), "oops");
///
/// let plain = create_palette(false);
/// assert_eq!(plain.error("oops"), "oops");
/// ```
pub fn create_palette(ansi_enabled: bool) -> Box<dyn Palette> {
    if ansi_enabled {
        Box::new(AnsiPalette)
    } else {
        Box::new(PlainPalette)
    }
}

/// Format a byte count for display.
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.1} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{} B", size)
    }
}

/// Mask a password for display.
pub(crate) fn mask(password: &str) -> String {
    "*".repeat(password.chars().count())
}
