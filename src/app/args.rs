//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::access::SshTab;
use crate::config::Config;
use crate::screen::DocsTopic;
use crate::upload::MAX_EXPIRY_DAYS;

/// Share files behind a password, from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "sdrop", version)]
pub struct Cli {
    /// Configuration file. A missing file means defaults.
    #[arg(long, env = "SDROP_CONFIG", default_value = "sdrop.toml")]
    pub config: PathBuf,

    /// Backend API base URL, e.g. https://sdrop.io/api
    #[arg(long)]
    pub api_url: Option<String>,

    /// Use the in-memory simulated backend.
    #[arg(long, default_value_t = false)]
    pub simulate: bool,

    /// Disable colored output.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if self.simulate {
            config.simulate.enabled = true;
        }
        if self.no_color {
            config.display.color = false;
        }
    }
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload a file and print its share link.
    Upload {
        /// File to upload.
        path: PathBuf,
        /// Password protecting the file. Prompted for when omitted.
        #[arg(long, conflicts_with = "generate_password")]
        password: Option<String>,
        /// Generate a strong password instead of asking for one.
        #[arg(long, default_value_t = false)]
        generate_password: bool,
        /// Days until the file expires.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_EXPIRY_DAYS)))]
        expiry: Option<u32>,
        /// Copy the share link to the clipboard (OSC 52).
        #[arg(long, default_value_t = false)]
        copy: bool,
    },

    /// Unlock and download a file.
    Download {
        /// File id.
        id: String,
        /// Password of the file. Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
        /// Directory to save into.
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Show a file's metadata.
    Info {
        /// File id.
        id: String,
    },

    /// Show terminal download instructions for a file.
    Ssh {
        /// File id.
        id: String,
        /// Which instructions to show.
        #[arg(long, value_enum, default_value_t = TabArg::Curl)]
        tab: TabArg,
        /// Copy the shown command to the clipboard (OSC 52).
        #[arg(long, default_value_t = false)]
        copy: bool,
    },

    /// Show API and CLI documentation.
    Docs {
        /// Only show one topic.
        #[arg(long, value_enum)]
        topic: Option<TopicArg>,
    },
}

/// `--tab` values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabArg {
    Curl,
    Cli,
}

impl From<TabArg> for SshTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Curl => SshTab::Curl,
            TabArg::Cli => SshTab::Cli,
        }
    }
}

/// `--topic` values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicArg {
    Upload,
    Download,
    Install,
    Usage,
    Node,
    Python,
}

impl From<TopicArg> for DocsTopic {
    fn from(topic: TopicArg) -> Self {
        match topic {
            TopicArg::Upload => DocsTopic::Upload,
            TopicArg::Download => DocsTopic::Download,
            TopicArg::Install => DocsTopic::Install,
            TopicArg::Usage => DocsTopic::Usage,
            TopicArg::Node => DocsTopic::Node,
            TopicArg::Python => DocsTopic::Python,
        }
    }
}
