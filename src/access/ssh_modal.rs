//! SSH instructions modal state.
//!
//! Independent of the access state: it only shows generated command text
//! for a file id.

use tokio::time::Instant;

use crate::clipboard::{Clipboard, CopyFeedback};
use crate::ssh::{CommandSet, DownloadOptions};
use crate::Result;

/// Tabs of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SshTab {
    /// Plain curl commands.
    #[default]
    Curl,
    /// The `sdrop` command-line tool.
    Cli,
}

/// Open/closed state, active tab and copy feedback of the modal.
#[derive(Debug, Clone, Default)]
pub struct SshModal {
    open: bool,
    tab: SshTab,
    copied: CopyFeedback,
}

impl SshModal {
    /// Create a closed modal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a modal that starts open.
    pub fn opened() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    /// Whether the modal is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Active tab.
    pub fn tab(&self) -> SshTab {
        self.tab
    }

    /// Show the modal.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the modal.
    pub fn close(&mut self) {
        self.open = false;
        self.copied.clear();
    }

    /// Flip between shown and hidden.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Switch tabs.
    pub fn select_tab(&mut self, tab: SshTab) {
        self.tab = tab;
    }

    /// Command shown on the active tab for `file_id`.
    pub fn active_command(&self, commands: &CommandSet, file_id: &str) -> String {
        match self.tab {
            SshTab::Curl => {
                commands.download_command(&DownloadOptions::default().output("filename"), file_id)
            }
            SshTab::Cli => commands.cli_download_command(file_id),
        }
    }

    /// Copy the active tab's command and show the "copied" marker.
    pub fn copy_active(
        &mut self,
        commands: &CommandSet,
        file_id: &str,
        clipboard: &mut impl Clipboard,
    ) -> Result<()> {
        clipboard.write_text(&self.active_command(commands, file_id))?;
        self.copied.mark();
        Ok(())
    }

    /// Whether the "copied" marker is visible.
    pub fn show_copied(&self) -> bool {
        self.copied.is_visible()
    }

    /// Whether the "copied" marker is visible at `now`.
    pub fn show_copied_at(&self, now: Instant) -> bool {
        self.copied.is_visible_at(now)
    }
}
