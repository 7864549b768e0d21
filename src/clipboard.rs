//! Clipboard sinks and the timed "copied" affordance.

use std::io::Write;
use std::time::Duration;

use base64::Engine;
use tokio::time::Instant;

use crate::Result;

/// How long the "copied" marker stays visible after a clipboard write.
pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

/// Destination for copied text.
pub trait Clipboard {
    /// Place `text` on the clipboard.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard that asks the terminal to copy via the OSC 52 escape sequence.
///
/// Works over SSH and inside tmux (with `set-clipboard on`) without any
/// platform clipboard library.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Wrap a terminal writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    /// Clipboard writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        write!(self.out, "\x1b]52;c;{encoded}\x07")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Deadline-based "copied" flag.
///
/// Nothing is scheduled; the flag reads as set until the deadline passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyFeedback {
    visible_until: Option<Instant>,
}

impl CopyFeedback {
    /// Mark a successful copy at `now`.
    pub fn mark_at(&mut self, now: Instant) {
        self.visible_until = Some(now + COPIED_FEEDBACK);
    }

    /// Mark a successful copy now.
    pub fn mark(&mut self) {
        self.mark_at(Instant::now());
    }

    /// Whether the marker is visible at `now`.
    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }

    /// Whether the marker is visible now.
    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    /// Hide the marker immediately.
    pub fn clear(&mut self) {
        self.visible_until = None;
    }
}
