//! File page view.

use chrono::Utc;

use super::{format_size, mask, Palette};
use crate::access::{AccessMachine, AccessState, FilePage};
use crate::api::FileMetadata;
use crate::datetime::{format_datetime_default, format_expiry};

/// Render the file page.
pub fn render_file_page(page: &FilePage, palette: &dyn Palette, timezone: &str) -> String {
    match page {
        FilePage::NotFound { .. } => render_not_found(palette),
        FilePage::Found(machine) => render_found(machine, palette, timezone),
    }
}

/// Render the metadata view used by `sdrop info`.
pub fn render_file_info(metadata: &FileMetadata, palette: &dyn Palette, timezone: &str) -> String {
    let mut out = String::new();
    out.push_str(&palette.heading(&metadata.name));
    out.push('\n');
    out.push_str(&format!("ID:        {}\n", metadata.id));
    out.push_str(&format!("Size:      {}\n", format_size(metadata.size)));
    out.push_str(&format!("Type:      {}\n", metadata.content_type));
    out.push_str(&format!(
        "Uploaded:  {}\n",
        format_datetime_default(&metadata.created_at, timezone)
    ));
    let expires = match &metadata.expires_at {
        Some(at) => format_expiry(at, &Utc::now(), timezone),
        None => "never".to_string(),
    };
    out.push_str(&format!("Expires:   {expires}\n"));
    out.push_str(&format!("Downloads: {}\n", metadata.download_count));
    out.push_str(&format!(
        "Password:  {}\n",
        if metadata.requires_password { "required" } else { "not required" }
    ));
    out
}

fn render_not_found(palette: &dyn Palette) -> String {
    let mut out = String::new();
    out.push_str(&palette.heading("File Not Found"));
    out.push('\n');
    out.push_str(&palette.muted(
        "The file you're looking for does not exist or has been removed.",
    ));
    out.push('\n');
    out
}

fn render_found(machine: &AccessMachine, palette: &dyn Palette, timezone: &str) -> String {
    let metadata = machine.metadata();
    let mut out = String::new();

    out.push_str(&palette.heading(&metadata.name));
    out.push('\n');
    out.push_str(&palette.muted(&format!(
        "{} · {}",
        format_size(metadata.size),
        metadata.content_type
    )));
    out.push('\n');
    out.push_str(&palette.muted(&format!(
        "Uploaded {}",
        format_datetime_default(&metadata.created_at, timezone)
    )));
    out.push('\n');
    if let Some(expires_at) = &metadata.expires_at {
        out.push_str(&palette.muted(&format!(
            "Expires {}",
            format_expiry(expires_at, &Utc::now(), timezone)
        )));
        out.push('\n');
    }
    out.push('\n');

    match machine.state() {
        AccessState::Locked | AccessState::Unlocking => {
            out.push_str("This file is password protected. Enter the password to access it.\n");
            out.push_str(&format!("Password: {}\n", mask(machine.password())));
            push_error(&mut out, machine, palette);
            out.push('\n');
            if machine.state() == AccessState::Unlocking {
                out.push_str(&palette.pending("Verifying..."));
            } else {
                out.push_str(&palette.accent("[ Access File ]"));
            }
        }
        AccessState::Unlocked | AccessState::Downloading => {
            out.push_str(&palette.success("File Unlocked"));
            out.push('\n');
            out.push_str(&palette.muted("Your file is ready to download."));
            out.push('\n');
            push_error(&mut out, machine, palette);
            out.push('\n');
            if machine.state() == AccessState::Downloading {
                out.push_str(&palette.pending("Downloading..."));
            } else {
                out.push_str(&palette.accent("[ Download File ]"));
            }
        }
    }
    out.push('\n');
    out
}

fn push_error(out: &mut String, machine: &AccessMachine, palette: &dyn Palette) {
    if let Some(error) = machine.error() {
        out.push_str(&palette.error(&error.to_string()));
        out.push('\n');
    }
}
