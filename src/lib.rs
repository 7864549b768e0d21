//! SDROP - secure file sharing client
//!
//! Uploads files behind a password, produces share links, and unlocks and
//! downloads shared files, from the terminal or as a library.

pub mod access;
pub mod api;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod password;
pub mod screen;
pub mod ssh;
pub mod upload;

pub use access::{AccessError, AccessMachine, AccessState, FilePage, SshModal, SshTab};
pub use api::{
    Backend, DownloadedFile, FileApi, FileMetadata, HttpApi, SelectedFile, SimulatedApi,
    UploadResult,
};
pub use config::Config;
pub use error::{Result, SdropError};
pub use ssh::CommandSet;
pub use upload::{UploadError, UploadMachine, UploadState};
