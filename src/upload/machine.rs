//! Upload state machine.

use tokio::time::Instant;

use super::{UploadError, MAX_EXPIRY_DAYS};
use crate::api::{FileApi, SelectedFile, UploadResult};
use crate::clipboard::{Clipboard, CopyFeedback};
use crate::password::generate_password;
use crate::Result;

/// Where the upload widget is in its flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing selected.
    Idle,
    /// A file is selected; waiting for a password and the upload action.
    Selected,
    /// Upload request in flight.
    Uploading,
    /// Upload finished; the share link is available.
    Succeeded(UploadResult),
}

/// Ticket for an in-flight upload, produced by [`UploadMachine::begin_upload`].
#[derive(Debug, Clone)]
pub struct UploadRequest {
    generation: u64,
    /// File to send.
    pub file: SelectedFile,
    /// Password protecting it.
    pub password: String,
    /// Days until expiry.
    pub expiry_days: u32,
}

/// State behind the upload widget.
///
/// The network call can be driven by [`upload`](Self::upload), or split into
/// [`begin_upload`](Self::begin_upload) and [`finish_upload`](Self::finish_upload)
/// when the request runs elsewhere. Completions for tickets issued before the
/// last [`reset`](Self::reset) are dropped.
#[derive(Debug)]
pub struct UploadMachine {
    state: UploadState,
    file: Option<SelectedFile>,
    password: String,
    error: Option<UploadError>,
    dragging: bool,
    copied: CopyFeedback,
    expiry_days: u32,
    default_expiry_days: u32,
    password_length: usize,
    generation: u64,
}

impl UploadMachine {
    /// Create an idle machine.
    pub fn new(default_expiry_days: u32, password_length: usize) -> Self {
        Self {
            state: UploadState::Idle,
            file: None,
            password: String::new(),
            error: None,
            dragging: false,
            copied: CopyFeedback::default(),
            expiry_days: default_expiry_days.clamp(1, MAX_EXPIRY_DAYS),
            default_expiry_days: default_expiry_days.clamp(1, MAX_EXPIRY_DAYS),
            password_length,
            generation: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Selected file, if any.
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Password as typed or generated.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Inline error, if any.
    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    /// Upload outcome once succeeded.
    pub fn result(&self) -> Option<&UploadResult> {
        match &self.state {
            UploadState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Share link once succeeded.
    pub fn url(&self) -> Option<&str> {
        self.result().map(|r| r.url.as_str())
    }

    /// Whether an upload is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == UploadState::Uploading
    }

    /// Whether the upload finished successfully.
    pub fn is_success(&self) -> bool {
        matches!(self.state, UploadState::Succeeded(_))
    }

    /// Whether a drag is hovering over the drop zone.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the "copied" marker is visible.
    pub fn show_copied_tooltip(&self) -> bool {
        self.copied.is_visible()
    }

    /// Whether the "copied" marker is visible at `now`.
    pub fn show_copied_tooltip_at(&self, now: Instant) -> bool {
        self.copied.is_visible_at(now)
    }

    /// Days until the upload expires.
    pub fn expiry_days(&self) -> u32 {
        self.expiry_days
    }

    /// Whether the upload action should be offered as enabled.
    pub fn can_upload(&self) -> bool {
        self.file.is_some() && self.state == UploadState::Selected
    }

    fn is_locked(&self) -> bool {
        matches!(self.state, UploadState::Uploading | UploadState::Succeeded(_))
    }

    /// Select a file (picker) or clear the selection (`None`, "Remove").
    ///
    /// Ignored while uploading or after success; `reset` first.
    pub fn set_file(&mut self, file: Option<SelectedFile>) {
        if self.is_locked() {
            tracing::debug!("File selection ignored while {:?}", self.state);
            return;
        }
        self.state = if file.is_some() {
            UploadState::Selected
        } else {
            UploadState::Idle
        };
        self.file = file;
    }

    /// A drag entered the drop zone.
    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    /// A drag left the drop zone.
    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Files were dropped. Only the first is taken.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) {
        self.dragging = false;
        if let Some(first) = files.into_iter().next() {
            self.set_file(Some(first));
        }
    }

    /// Set the password.
    pub fn set_password(&mut self, password: impl Into<String>) {
        if self.is_locked() {
            return;
        }
        self.password = password.into();
    }

    /// Replace the password with a freshly generated one and return it.
    pub fn generate_password(&mut self) -> Result<&str> {
        let password = generate_password(self.password_length)?;
        self.set_password(password);
        Ok(&self.password)
    }

    /// Set the expiry in days, clamped to `1..=MAX_EXPIRY_DAYS`.
    pub fn set_expiry_days(&mut self, days: u32) {
        if self.is_locked() {
            return;
        }
        self.expiry_days = days.clamp(1, MAX_EXPIRY_DAYS);
    }

    /// Validate inputs and enter `Uploading`.
    ///
    /// On a validation failure the message is stored, the state is unchanged
    /// and no request should be sent.
    pub fn begin_upload(&mut self) -> std::result::Result<UploadRequest, UploadError> {
        if self.is_locked() {
            return Err(UploadError::Failed {
                detail: format!("upload not possible while {:?}", self.state),
            });
        }

        let Some(file) = self.file.clone() else {
            return Err(self.reject(UploadError::MissingFile));
        };
        if self.password.trim().is_empty() {
            return Err(self.reject(UploadError::MissingPassword));
        }

        self.error = None;
        self.state = UploadState::Uploading;
        tracing::debug!(name = %file.name, size = file.size(), "Upload started");

        Ok(UploadRequest {
            generation: self.generation,
            file,
            password: self.password.clone(),
            expiry_days: self.expiry_days,
        })
    }

    fn reject(&mut self, error: UploadError) -> UploadError {
        self.error = Some(error.clone());
        error
    }

    /// Apply the outcome of the request started by `request`.
    ///
    /// Returns `false` when the ticket is stale and the outcome was dropped.
    pub fn finish_upload(
        &mut self,
        request: &UploadRequest,
        outcome: Result<UploadResult>,
    ) -> bool {
        if request.generation != self.generation || self.state != UploadState::Uploading {
            tracing::debug!("Dropping stale upload completion");
            return false;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(file_id = %result.file_id, "Upload succeeded");
                self.state = UploadState::Succeeded(result);
            }
            Err(e) => {
                tracing::error!("Upload error: {}", e);
                self.state = UploadState::Selected;
                self.error = Some(UploadError::Failed {
                    detail: e.to_string(),
                });
            }
        }
        true
    }

    /// Validate, send, and apply the outcome.
    pub async fn upload<A: FileApi>(
        &mut self,
        api: &A,
    ) -> std::result::Result<&UploadResult, UploadError> {
        let request = self.begin_upload()?;
        let outcome = api
            .upload_file(&request.file, &request.password, request.expiry_days)
            .await;
        self.finish_upload(&request, outcome);

        match (&self.state, &self.error) {
            (UploadState::Succeeded(result), _) => Ok(result),
            (_, Some(error)) => Err(error.clone()),
            _ => Err(UploadError::Failed {
                detail: "upload did not complete".to_string(),
            }),
        }
    }

    /// Copy the share link to `clipboard` and show the "copied" marker.
    ///
    /// Returns `false` when there is no link yet.
    pub fn copy_url(&mut self, clipboard: &mut impl Clipboard) -> Result<bool> {
        let Some(url) = self.url() else {
            return Ok(false);
        };
        clipboard.write_text(url)?;
        self.copied.mark();
        Ok(true)
    }

    /// Return to `Idle`, clearing file, password, result and error.
    ///
    /// In-flight uploads started before the reset are ignored when they finish.
    pub fn reset(&mut self) {
        self.state = UploadState::Idle;
        self.file = None;
        self.password.clear();
        self.error = None;
        self.dragging = false;
        self.copied.clear();
        self.expiry_days = self.default_expiry_days;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SdropError;

    fn machine() -> UploadMachine {
        UploadMachine::new(7, 16)
    }

    fn pdf() -> SelectedFile {
        SelectedFile::new("report.pdf", vec![0u8; 2_621_440])
    }

    fn success() -> UploadResult {
        UploadResult {
            file_id: "k3j9x0ab".to_string(),
            url: "https://sdrop.io/k3j9x0ab".to_string(),
            expires_at: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let m = machine();
        assert_eq!(m.state(), &UploadState::Idle);
        assert!(m.file().is_none());
        assert_eq!(m.password(), "");
        assert!(m.url().is_none());
        assert!(m.error().is_none());
        assert!(!m.is_loading());
        assert!(!m.is_success());
        assert!(!m.can_upload());
        assert_eq!(m.expiry_days(), 7);
    }

    #[test]
    fn test_set_file_and_remove() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        assert_eq!(m.state(), &UploadState::Selected);
        assert!(m.can_upload());

        m.set_file(None);
        assert_eq!(m.state(), &UploadState::Idle);
        assert!(m.file().is_none());
    }

    #[test]
    fn test_drop_takes_first_file() {
        let mut m = machine();
        m.drag_enter();
        assert!(m.is_dragging());

        m.drop_files(vec![
            SelectedFile::new("first.txt", b"1".to_vec()),
            SelectedFile::new("second.txt", b"2".to_vec()),
        ]);
        assert!(!m.is_dragging());
        assert_eq!(m.file().unwrap().name, "first.txt");
    }

    #[test]
    fn test_empty_drop_keeps_selection() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        m.drag_enter();
        m.drop_files(Vec::new());
        assert!(!m.is_dragging());
        assert_eq!(m.file().unwrap().name, "report.pdf");
    }

    #[test]
    fn test_begin_without_file() {
        let mut m = machine();
        m.set_password("abc123");
        assert_eq!(m.begin_upload().unwrap_err(), UploadError::MissingFile);
        assert_eq!(m.error(), Some(&UploadError::MissingFile));
        assert_eq!(m.state(), &UploadState::Idle);
    }

    #[test]
    fn test_begin_with_blank_password() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        m.set_password("   \t");
        assert_eq!(m.begin_upload().unwrap_err(), UploadError::MissingPassword);
        assert_eq!(
            m.error().unwrap().to_string(),
            "Please provide a password"
        );
        assert_eq!(m.state(), &UploadState::Selected);
    }

    #[test]
    fn test_finish_success() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        m.set_password("abc123");
        let request = m.begin_upload().unwrap();
        assert!(m.is_loading());
        assert_eq!(request.password, "abc123");
        assert_eq!(request.expiry_days, 7);

        assert!(m.finish_upload(&request, Ok(success())));
        assert!(m.is_success());
        assert_eq!(m.url(), Some("https://sdrop.io/k3j9x0ab"));
    }

    #[test]
    fn test_finish_failure_keeps_inputs() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        m.set_password("abc123");
        let request = m.begin_upload().unwrap();

        m.finish_upload(&request, Err(SdropError::Network("refused".into())));
        assert_eq!(m.state(), &UploadState::Selected);
        assert_eq!(m.file().unwrap().name, "report.pdf");
        assert_eq!(m.password(), "abc123");
        assert_eq!(
            m.error().unwrap().to_string(),
            "Error uploading file. Please try again."
        );
    }

    #[test]
    fn test_stale_completion_dropped_after_reset() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        m.set_password("abc123");
        let request = m.begin_upload().unwrap();

        m.reset();
        assert!(!m.finish_upload(&request, Ok(success())));
        assert_eq!(m.state(), &UploadState::Idle);
        assert!(m.url().is_none());
    }

    #[test]
    fn test_no_second_begin_while_uploading() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        m.set_password("abc123");
        let _request = m.begin_upload().unwrap();
        assert!(matches!(m.begin_upload(), Err(UploadError::Failed { .. })));
        assert!(m.is_loading());
    }

    #[test]
    fn test_inputs_frozen_after_success() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        m.set_password("abc123");
        let request = m.begin_upload().unwrap();
        m.finish_upload(&request, Ok(success()));

        m.set_file(None);
        m.set_password("changed");
        assert!(m.is_success());
        assert_eq!(m.password(), "abc123");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut m = machine();
        m.set_file(Some(pdf()));
        m.set_password("abc123");
        m.set_expiry_days(30);
        let request = m.begin_upload().unwrap();
        m.finish_upload(&request, Ok(success()));

        m.reset();
        let once = format!("{:?}", (m.state(), m.file(), m.password(), m.url(), m.error()));
        m.reset();
        let twice = format!("{:?}", (m.state(), m.file(), m.password(), m.url(), m.error()));

        assert_eq!(once, twice);
        assert_eq!(m.state(), &UploadState::Idle);
        assert!(m.file().is_none());
        assert_eq!(m.password(), "");
        assert!(m.url().is_none());
        assert!(m.error().is_none());
        assert!(!m.is_success());
        assert!(!m.is_loading());
        assert_eq!(m.expiry_days(), 7);
    }

    #[test]
    fn test_generate_password() {
        let mut m = machine();
        let generated = m.generate_password().unwrap().to_string();
        assert_eq!(generated.len(), 16);
        assert_eq!(m.password(), generated);
    }

    #[test]
    fn test_expiry_minimum() {
        let mut m = machine();
        m.set_expiry_days(0);
        assert_eq!(m.expiry_days(), 1);
    }

    #[test]
    fn test_expiry_maximum() {
        let mut m = machine();
        m.set_expiry_days(u32::MAX);
        assert_eq!(m.expiry_days(), MAX_EXPIRY_DAYS);

        let m = UploadMachine::new(u32::MAX, 16);
        assert_eq!(m.expiry_days(), MAX_EXPIRY_DAYS);
    }
}
