//! Upload Flow Tests
//!
//! Drives `UploadMachine` against the mock backend, the scripted API and the
//! simulated backend.

mod common;

use std::time::Duration;

use common::{sample_file, MockBackend, ScriptedApi};
use sdrop::clipboard::MemoryClipboard;
use sdrop::config::SimulateConfig;
use sdrop::screen::{render_upload, PlainPalette};
use sdrop::{SdropError, SimulatedApi, UploadError, UploadMachine, UploadResult, UploadState};

fn machine() -> UploadMachine {
    UploadMachine::new(7, 16)
}

#[tokio::test]
async fn test_upload_report_end_to_end() {
    let backend = MockBackend::spawn().await;
    let api = backend.api();
    let mut machine = machine();

    machine.set_file(Some(sample_file("report.pdf", 2_621_440)));
    let view = render_upload(&machine, &PlainPalette, "UTC");
    assert!(view.contains("report.pdf (2.5 MB)"));

    machine.set_password("s3cret!");
    let result = machine.upload(&api).await.unwrap().clone();
    assert_eq!(result.file_id, "mock0001");
    assert!(result.url.contains(&result.file_id));
    assert!(machine.is_success());
    assert!(!machine.is_loading());

    let view = render_upload(&machine, &PlainPalette, "UTC");
    assert!(view.contains("File uploaded successfully!"));
    assert!(view.contains("http://share.test/mock0001"));
}

#[tokio::test]
async fn test_missing_file_makes_no_request() {
    let api = ScriptedApi::new();
    let mut machine = machine();
    machine.set_password("s3cret!");

    let error = machine.upload(&api).await.unwrap_err();
    assert_eq!(error, UploadError::MissingFile);
    assert_eq!(error.to_string(), "Please select a file to upload");
    assert_eq!(api.calls(), 0);
    assert_eq!(*machine.state(), UploadState::Idle);
}

#[tokio::test]
async fn test_missing_password_makes_no_request() {
    let backend = MockBackend::spawn().await;
    let api = backend.api();
    let mut machine = machine();
    machine.set_file(Some(sample_file("a.txt", 10)));

    let error = machine.upload(&api).await.unwrap_err();
    assert_eq!(error, UploadError::MissingPassword);
    assert_eq!(backend.state.requests(), 0);
    assert_eq!(*machine.state(), UploadState::Selected);
}

#[tokio::test]
async fn test_failure_keeps_inputs_for_retry() {
    let api = ScriptedApi::new();
    api.push_upload(Err(SdropError::Server {
        status: 503,
        message: "maintenance".to_string(),
    }))
    .push_upload(Ok(UploadResult {
        file_id: "k3j9x2ab".to_string(),
        url: "http://localhost:3000/k3j9x2ab".to_string(),
        expires_at: None,
    }));

    let mut machine = machine();
    machine.set_file(Some(sample_file("a.txt", 10)));
    machine.set_password("s3cret!");

    let error = machine.upload(&api).await.unwrap_err();
    assert_eq!(error.to_string(), "Error uploading file. Please try again.");
    assert_eq!(*machine.state(), UploadState::Selected);
    assert_eq!(machine.password(), "s3cret!");
    assert!(machine.file().is_some());

    let result = machine.upload(&api).await.unwrap();
    assert_eq!(result.file_id, "k3j9x2ab");
    assert!(machine.error().is_none());
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn test_completion_after_reset_is_dropped() {
    let mut machine = machine();
    machine.set_file(Some(sample_file("a.txt", 10)));
    machine.set_password("s3cret!");
    let request = machine.begin_upload().unwrap();

    machine.reset();
    let applied = machine.finish_upload(
        &request,
        Ok(UploadResult {
            file_id: "late".to_string(),
            url: "http://localhost:3000/late".to_string(),
            expires_at: None,
        }),
    );

    assert!(!applied);
    assert_eq!(*machine.state(), UploadState::Idle);
    assert!(machine.url().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_copied_marker_lasts_two_seconds() {
    let api = SimulatedApi::new(SimulateConfig::instant());
    let mut machine = machine();
    machine.set_file(Some(sample_file("a.txt", 10)));
    machine.set_password("s3cret!");
    machine.upload(&api).await.unwrap();

    let mut clipboard = MemoryClipboard::new();
    assert!(machine.copy_url(&mut clipboard).unwrap());
    assert_eq!(clipboard.contents(), machine.url());
    assert!(machine.show_copied_tooltip());

    tokio::time::advance(Duration::from_millis(1999)).await;
    assert!(machine.show_copied_tooltip());
    tokio::time::advance(Duration::from_millis(2)).await;
    assert!(!machine.show_copied_tooltip());
}

#[tokio::test(start_paused = true)]
async fn test_simulated_upload_latency() {
    let api = SimulatedApi::new(SimulateConfig::default());
    let mut machine = machine();
    machine.set_file(Some(sample_file("report.pdf", 2_621_440)));
    machine.set_password("s3cret!");

    let started = tokio::time::Instant::now();
    let result = machine.upload(&api).await.unwrap().clone();
    assert!(started.elapsed() >= Duration::from_millis(1000));

    assert_eq!(result.file_id.len(), 8);
    assert_eq!(result.url, format!("http://localhost:3000/{}", result.file_id));
    assert_eq!(api.len(), 1);
}

#[tokio::test]
async fn test_generated_password_is_used_for_upload() {
    let backend = MockBackend::spawn().await;
    let api = backend.api();
    let mut machine = machine();
    machine.set_file(Some(sample_file("a.txt", 10)));

    let password = machine.generate_password().unwrap().to_string();
    assert_eq!(password.chars().count(), 16);
    machine.upload(&api).await.unwrap();

    assert_eq!(backend.state.uploads()[0].password, password);
}
