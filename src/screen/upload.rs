//! Upload widget view.

use chrono::Utc;

use super::{format_size, mask, Palette};
use crate::datetime::format_expiry;
use crate::upload::{UploadMachine, UploadState};

/// Render the upload widget.
pub fn render_upload(machine: &UploadMachine, palette: &dyn Palette, timezone: &str) -> String {
    let mut out = String::new();
    out.push_str(&palette.heading("Share files securely"));
    out.push_str("\n\n");

    if let UploadState::Succeeded(result) = machine.state() {
        out.push_str(&palette.success("File uploaded successfully!"));
        out.push('\n');
        out.push_str(&palette.muted("Share this secure link"));
        out.push('\n');
        out.push_str("  ");
        out.push_str(&palette.accent(&result.url));
        if machine.show_copied_tooltip() {
            out.push_str("  ");
            out.push_str(&palette.success("Copied!"));
        }
        out.push('\n');
        if let Some(expires_at) = &result.expires_at {
            let expiry = format_expiry(expires_at, &Utc::now(), timezone);
            out.push_str(&palette.muted(&format!("Expires: {expiry}")));
            out.push('\n');
        }
        return out;
    }

    match machine.file() {
        Some(file) => {
            out.push_str(&format!(
                "File:     {} {}\n",
                file.name,
                palette.muted(&format!("({})", format_size(file.size())))
            ));
        }
        None if machine.is_dragging() => {
            out.push_str(&palette.accent("Drop your file here"));
            out.push('\n');
        }
        None => {
            out.push_str(&palette.muted("Drag and drop your file here"));
            out.push('\n');
        }
    }

    let password = if machine.password().is_empty() {
        palette.muted("Password to protect your file")
    } else {
        mask(machine.password())
    };
    out.push_str(&format!("Password: {password}\n"));
    out.push_str(&format!(
        "Expires:  in {} day{}\n",
        machine.expiry_days(),
        if machine.expiry_days() == 1 { "" } else { "s" }
    ));

    if let Some(error) = machine.error() {
        out.push('\n');
        out.push_str(&palette.error(&error.to_string()));
        out.push('\n');
    }

    out.push('\n');
    if machine.is_loading() {
        out.push_str(&palette.pending("Uploading..."));
    } else {
        out.push_str(&palette.accent("[ Upload File ]"));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SelectedFile, UploadResult};
    use crate::clipboard::MemoryClipboard;
    use crate::screen::PlainPalette;
    use crate::SdropError;

    fn report() -> SelectedFile {
        SelectedFile::new("report.pdf", vec![0u8; 2_621_440])
    }

    #[test]
    fn test_idle() {
        let machine = UploadMachine::new(7, 16);
        let view = render_upload(&machine, &PlainPalette, "UTC");
        assert!(view.contains("Drag and drop your file here"));
        assert!(view.contains("Password to protect your file"));
        assert!(view.contains("in 7 days"));
        assert!(view.contains("[ Upload File ]"));
    }

    #[test]
    fn test_selected_with_masked_password() {
        let mut machine = UploadMachine::new(1, 16);
        machine.set_file(Some(report()));
        machine.set_password("secret");
        let view = render_upload(&machine, &PlainPalette, "UTC");
        assert!(view.contains("report.pdf (2.5 MB)"));
        assert!(view.contains("Password: ******"));
        assert!(!view.contains("secret"));
        assert!(view.contains("in 1 day\n"));
    }

    #[test]
    fn test_validation_error_banner() {
        let mut machine = UploadMachine::new(7, 16);
        machine.set_file(Some(report()));
        assert!(machine.begin_upload().is_err());
        let view = render_upload(&machine, &PlainPalette, "UTC");
        assert!(view.contains("Please provide a password"));
    }

    #[test]
    fn test_uploading_and_failure() {
        let mut machine = UploadMachine::new(7, 16);
        machine.set_file(Some(report()));
        machine.set_password("secret");
        let request = machine.begin_upload().unwrap();
        let view = render_upload(&machine, &PlainPalette, "UTC");
        assert!(view.contains("Uploading..."));
        assert!(!view.contains("[ Upload File ]"));

        machine.finish_upload(&request, Err(SdropError::Network("down".into())));
        let view = render_upload(&machine, &PlainPalette, "UTC");
        assert!(view.contains("Error uploading file. Please try again."));
        assert!(view.contains("[ Upload File ]"));
    }

    #[test]
    fn test_success_panel() {
        let mut machine = UploadMachine::new(7, 16);
        machine.set_file(Some(report()));
        machine.set_password("secret");
        let request = machine.begin_upload().unwrap();
        machine.finish_upload(
            &request,
            Ok(UploadResult {
                file_id: "k3j9x2ab".to_string(),
                url: "http://localhost:3000/k3j9x2ab".to_string(),
                expires_at: Some(Utc::now() + chrono::Duration::days(7)),
            }),
        );

        let view = render_upload(&machine, &PlainPalette, "UTC");
        assert!(view.contains("File uploaded successfully!"));
        assert!(view.contains("http://localhost:3000/k3j9x2ab"));
        assert!(view.contains("Expires: "));
        assert!(!view.contains("Copied!"));

        let mut clipboard = MemoryClipboard::new();
        assert!(machine.copy_url(&mut clipboard).unwrap());
        let view = render_upload(&machine, &PlainPalette, "UTC");
        assert!(view.contains("Copied!"));
    }
}
