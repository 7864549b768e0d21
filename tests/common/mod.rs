//! Test helpers for integration tests.
//!
//! Provides a mock SDROP backend served by axum on a random local port, and
//! a scripted [`FileApi`] that records how often it was called.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use sdrop::config::ApiConfig;
use sdrop::{DownloadedFile, FileApi, FileMetadata, HttpApi, Result, SdropError, SelectedFile, UploadResult};

/// File id for which every endpoint answers 500.
pub const BROKEN_ID: &str = "broken";

/// Build a file with the given name and size.
pub fn sample_file(name: &str, size: usize) -> SelectedFile {
    SelectedFile::new(name, vec![7u8; size])
}

/// Metadata for a password-protected file.
pub fn sample_metadata(id: &str, name: &str, size: u64) -> FileMetadata {
    FileMetadata {
        id: id.to_string(),
        name: name.to_string(),
        size,
        content_type: mime_for(name),
        created_at: Utc::now(),
        expires_at: Some(Utc::now() + Duration::days(7)),
        requires_password: true,
        download_count: 0,
    }
}

fn mime_for(name: &str) -> String {
    if name.ends_with(".pdf") {
        "application/pdf".to_string()
    } else {
        "application/octet-stream".to_string()
    }
}

/// Upload as received by the mock backend.
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
    pub password: String,
    pub expiry: String,
}

struct MockFile {
    name: String,
    content_type: String,
    password: String,
    content: Bytes,
    downloads: u64,
}

/// Shared state of the mock backend.
#[derive(Default)]
pub struct MockState {
    files: Mutex<HashMap<String, MockFile>>,
    uploads: Mutex<Vec<ReceivedUpload>>,
    requests: AtomicUsize,
    next_id: AtomicUsize,
}

impl MockState {
    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    /// Total requests received.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Uploads received so far.
    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    /// Store a file directly.
    pub fn insert(&self, id: &str, name: &str, password: &str, content: &[u8]) {
        self.files.lock().unwrap().insert(
            id.to_string(),
            MockFile {
                name: name.to_string(),
                content_type: mime_for(name),
                password: password.to_string(),
                content: Bytes::copy_from_slice(content),
                downloads: 0,
            },
        );
    }
}

/// A running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Bind to 127.0.0.1:0 and serve in a background task.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/upload", post(upload))
            .route("/api/files/:file_id", get(metadata))
            .route("/api/files/:file_id/validate", post(validate))
            .route("/api/files/:file_id/download", post(download))
            .layer(DefaultBodyLimit::disable())
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        Self { addr, state }
    }

    /// API base URL of this backend.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// HTTP client pointed at this backend.
    pub fn api(&self) -> HttpApi {
        HttpApi::new(&ApiConfig {
            base_url: self.base_url(),
            ..ApiConfig::default()
        })
        .expect("http api")
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn upload(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Response {
    state.hit();

    let mut file: Option<(String, String, Bytes)> = None;
    let mut password = String::new();
    let mut expiry = "7".to_string();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let Ok(content) = field.bytes().await else {
                    return error(StatusCode::BAD_REQUEST, "Unreadable file");
                };
                file = Some((file_name, content_type, content));
            }
            "password" => password = field.text().await.unwrap_or_default(),
            "expiry" => expiry = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    let Some((file_name, content_type, content)) = file else {
        return error(StatusCode::BAD_REQUEST, "No file provided");
    };
    if password.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Password is required");
    }
    let days: i64 = expiry.parse().unwrap_or(7);

    state.uploads.lock().unwrap().push(ReceivedUpload {
        file_name: file_name.clone(),
        content_type: content_type.clone(),
        size: content.len(),
        password: password.clone(),
        expiry: expiry.clone(),
    });

    let id = format!("mock{:04}", state.next_id.fetch_add(1, Ordering::SeqCst) + 1);
    state.files.lock().unwrap().insert(
        id.clone(),
        MockFile {
            name: file_name,
            content_type,
            password,
            content,
            downloads: 0,
        },
    );

    Json(json!({
        "fileId": id,
        "url": format!("http://share.test/{id}"),
        "expiresAt": (Utc::now() + Duration::days(days)).to_rfc3339(),
    }))
    .into_response()
}

async fn metadata(State(state): State<Arc<MockState>>, Path(file_id): Path<String>) -> Response {
    state.hit();
    if file_id == BROKEN_ID {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    let files = state.files.lock().unwrap();
    let Some(file) = files.get(&file_id) else {
        return error(StatusCode::NOT_FOUND, "File not found");
    };
    Json(json!({
        "id": file_id,
        "name": file.name,
        "size": file.content.len(),
        "type": file.content_type,
        "createdAt": "2024-01-15T10:30:00Z",
        "expiresAt": (Utc::now() + Duration::days(7)).to_rfc3339(),
        "requiresPassword": true,
        "downloadCount": file.downloads,
    }))
    .into_response()
}

async fn validate(
    State(state): State<Arc<MockState>>,
    Path(file_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.hit();
    if file_id == BROKEN_ID {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    let files = state.files.lock().unwrap();
    let Some(file) = files.get(&file_id) else {
        return error(StatusCode::NOT_FOUND, "File not found");
    };
    if body["password"].as_str() == Some(file.password.as_str()) {
        Json(json!({ "valid": true })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid password")
    }
}

async fn download(
    State(state): State<Arc<MockState>>,
    Path(file_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.hit();
    if file_id == BROKEN_ID {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    let mut files = state.files.lock().unwrap();
    let Some(file) = files.get_mut(&file_id) else {
        return error(StatusCode::NOT_FOUND, "File not found");
    };
    if body["password"].as_str() != Some(file.password.as_str()) {
        return error(StatusCode::UNAUTHORIZED, "Invalid password");
    }
    file.downloads += 1;
    let disposition = format!("attachment; filename=\"{}\"", file.name);
    (
        [
            (header::CONTENT_TYPE, file.content_type.clone()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content.clone(),
    )
        .into_response()
}

/// [`FileApi`] returning queued outcomes and counting calls.
///
/// An empty queue answers with a network error.
#[derive(Default)]
pub struct ScriptedApi {
    uploads: Mutex<VecDeque<Result<UploadResult>>>,
    metadata: Mutex<VecDeque<Result<Option<FileMetadata>>>>,
    validations: Mutex<VecDeque<Result<bool>>>,
    downloads: Mutex<VecDeque<Result<DownloadedFile>>>,
    calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_upload(&self, outcome: Result<UploadResult>) -> &Self {
        self.uploads.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_metadata(&self, outcome: Result<Option<FileMetadata>>) -> &Self {
        self.metadata.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_validation(&self, outcome: Result<bool>) -> &Self {
        self.validations.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_download(&self, outcome: Result<DownloadedFile>) -> &Self {
        self.downloads.lock().unwrap().push_back(outcome);
        self
    }

    /// Number of API calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next<T>(&self, queue: &Mutex<VecDeque<Result<T>>>) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SdropError::Network("no scripted response".to_string())))
    }
}

impl FileApi for ScriptedApi {
    async fn upload_file(
        &self,
        _file: &SelectedFile,
        _password: &str,
        _expiry_days: u32,
    ) -> Result<UploadResult> {
        self.next(&self.uploads)
    }

    async fn get_file_metadata(&self, _file_id: &str) -> Result<Option<FileMetadata>> {
        self.next(&self.metadata)
    }

    async fn validate_password(&self, _file_id: &str, _password: &str) -> Result<bool> {
        self.next(&self.validations)
    }

    async fn download_file(&self, _file_id: &str, _password: &str) -> Result<DownloadedFile> {
        self.next(&self.downloads)
    }
}
