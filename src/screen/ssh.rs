//! SSH instructions panel and docs views.

use super::Palette;
use crate::access::{SshModal, SshTab};
use crate::ssh::{CommandSet, DownloadOptions, ScriptLanguage, UploadOptions};

/// Sections of the docs view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocsTopic {
    /// Uploading with curl.
    Upload,
    /// Downloading with curl.
    Download,
    /// Installing the CLI.
    Install,
    /// CLI usage examples.
    Usage,
    /// Node.js snippet.
    Node,
    /// Python snippet.
    Python,
}

impl DocsTopic {
    /// Every topic, in display order.
    pub const ALL: [DocsTopic; 6] = [
        DocsTopic::Upload,
        DocsTopic::Download,
        DocsTopic::Install,
        DocsTopic::Usage,
        DocsTopic::Node,
        DocsTopic::Python,
    ];

    fn title(self) -> &'static str {
        match self {
            DocsTopic::Upload => "Upload a file",
            DocsTopic::Download => "Download a file",
            DocsTopic::Install => "Install the CLI",
            DocsTopic::Usage => "CLI usage",
            DocsTopic::Node => "Node.js",
            DocsTopic::Python => "Python",
        }
    }
}

/// Render the SSH instructions panel. Empty when the modal is closed.
pub fn render_ssh_modal(
    modal: &SshModal,
    commands: &CommandSet,
    file_id: &str,
    palette: &dyn Palette,
) -> String {
    if !modal.is_open() {
        return String::new();
    }

    let tab_label = |tab: SshTab, label: &str| {
        if modal.tab() == tab {
            palette.accent(&format!("[{label}]"))
        } else {
            palette.muted(&format!(" {label} "))
        }
    };

    let mut out = String::new();
    out.push_str(&palette.heading("SSH Access Instructions"));
    out.push('\n');
    out.push_str(&format!(
        "{}  {}\n\n",
        tab_label(SshTab::Curl, "Using curl"),
        tab_label(SshTab::Cli, "Using SDROP CLI")
    ));

    match modal.tab() {
        SshTab::Curl => {
            out.push_str("Download this file using curl:\n");
            push_command(&mut out, &modal.active_command(commands, file_id), palette);
        }
        SshTab::Cli => {
            out.push_str("Install the SDROP CLI:\n");
            push_command(&mut out, &commands.install_command(), palette);
            out.push_str("\nThen download the file:\n");
            push_command(&mut out, &modal.active_command(commands, file_id), palette);
        }
    }

    if modal.show_copied() {
        out.push_str(&palette.success("Copied!"));
        out.push('\n');
    }
    out
}

/// Render one docs topic.
pub fn render_docs(commands: &CommandSet, topic: DocsTopic, palette: &dyn Palette) -> String {
    let mut out = String::new();
    out.push_str(&palette.heading(topic.title()));
    out.push('\n');

    match topic {
        DocsTopic::Upload => {
            push_command(&mut out, &commands.upload_command(&UploadOptions::default()), palette);
        }
        DocsTopic::Download => {
            let command = commands.download_command(&DownloadOptions::default(), "FILE_ID");
            push_command(&mut out, &command, palette);
        }
        DocsTopic::Install => {
            push_command(&mut out, &commands.install_command(), palette);
            out.push_str(&palette.muted("The installer runs:"));
            out.push('\n');
            out.push_str(&commands.install_script());
        }
        DocsTopic::Usage => {
            for example in commands.cli_usage_examples() {
                out.push_str(&palette.muted(&format!("# {}", example.title)));
                out.push('\n');
                push_command(&mut out, example.command, palette);
            }
        }
        DocsTopic::Node => out.push_str(&commands.script_example(ScriptLanguage::Node)),
        DocsTopic::Python => out.push_str(&commands.script_example(ScriptLanguage::Python)),
    }
    out
}

fn push_command(out: &mut String, command: &str, palette: &dyn Palette) {
    for line in command.lines() {
        out.push_str("  ");
        out.push_str(&palette.accent(line));
        out.push('\n');
    }
}
