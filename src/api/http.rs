//! reqwest-backed [`FileApi`] talking to the SDROP backend.

use std::time::Duration;

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::{DownloadedFile, FileApi, FileMetadata, PasswordRequest, SelectedFile, UploadResult};
use crate::config::ApiConfig;
use crate::{Result, SdropError};

/// User agent string sent with every request.
const USER_AGENT: &str = concat!("sdrop-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the four backend endpoints.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the configured base URL.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)
            .map_err(|e| SdropError::Config(format!("invalid API base URL: {e}")))?;

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(USER_AGENT);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SdropError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn file_endpoint(&self, file_id: &str, suffix: &str) -> String {
        self.endpoint(&format!("/files/{}{}", urlencoding::encode(file_id), suffix))
    }
}

impl FileApi for HttpApi {
    async fn upload_file(
        &self,
        file: &SelectedFile,
        password: &str,
        expiry_days: u32,
    ) -> Result<UploadResult> {
        if file.name.is_empty() {
            return Err(SdropError::Validation("no file selected".to_string()));
        }
        if password.trim().is_empty() {
            return Err(SdropError::Validation("password is empty".to_string()));
        }

        let part = Part::stream_with_length(file.content.clone(), file.size())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("password", password.to_string())
            .text("expiry", expiry_days.to_string());

        tracing::debug!(name = %file.name, size = file.size(), expiry_days, "Uploading file");
        let response = self
            .client
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await?;

        let response = error_for_status(response).await?;
        let result: UploadResult = response.json().await?;
        tracing::info!(file_id = %result.file_id, "Upload accepted");
        Ok(result)
    }

    async fn get_file_metadata(&self, file_id: &str) -> Result<Option<FileMetadata>> {
        let response = self.client.get(self.file_endpoint(file_id, "")).send().await?;

        if is_gone(response.status()) {
            tracing::debug!(file_id, "Metadata not found");
            return Ok(None);
        }

        let response = error_for_status(response).await?;
        Ok(Some(response.json().await?))
    }

    async fn validate_password(&self, file_id: &str, password: &str) -> Result<bool> {
        let response = self
            .client
            .post(self.file_endpoint(file_id, "/validate"))
            .json(&PasswordRequest {
                password: password.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if is_rejected(status) {
            return Ok(false);
        }
        if is_gone(status) {
            return Err(SdropError::NotFound(format!("file {file_id}")));
        }

        let response = error_for_status(response).await?;
        // A bare 2xx means valid; a body may still say otherwise.
        let body = response.bytes().await?;
        match serde_json::from_slice::<ValidateResponse>(&body) {
            Ok(parsed) => Ok(parsed.valid.unwrap_or(true)),
            Err(_) => Ok(true),
        }
    }

    async fn download_file(&self, file_id: &str, password: &str) -> Result<DownloadedFile> {
        let response = self
            .client
            .post(self.file_endpoint(file_id, "/download"))
            .json(&PasswordRequest {
                password: password.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if is_rejected(status) {
            return Err(SdropError::InvalidPassword);
        }
        if is_gone(status) {
            return Err(SdropError::NotFound(format!("file {file_id}")));
        }

        let response = error_for_status(response).await?;
        let headers = response.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_disposition);

        let content = response.bytes().await?;
        tracing::info!(file_id, bytes = content.len(), "Download complete");

        Ok(DownloadedFile {
            file_name,
            content_type,
            content,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    valid: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Object { message: Option<String> },
}

/// Status codes meaning the password was refused.
fn is_rejected(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Status codes meaning the file is missing or expired.
fn is_gone(status: StatusCode) -> bool {
    matches!(status, StatusCode::NOT_FOUND | StatusCode::GONE)
}

/// Turn a non-success response into [`SdropError::Server`], or
/// [`SdropError::Validation`] for 400.
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });
    tracing::warn!(status = status.as_u16(), %message, "Backend returned an error");

    if status == StatusCode::BAD_REQUEST {
        return Err(SdropError::Validation(message));
    }
    Err(SdropError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable message out of a JSON error body.
fn extract_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    if parsed.message.is_some() {
        return parsed.message;
    }
    match parsed.error? {
        ErrorDetail::Text(text) => Some(text),
        ErrorDetail::Object { message } => message,
    }
}

/// Extract the file name from a `Content-Disposition` header value.
///
/// Prefers the RFC 5987 `filename*=UTF-8''...` form over plain `filename=`.
fn parse_content_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    for param in split_params(value) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = raw.trim();
                let encoded = match encoded.split_once("''") {
                    Some((_charset, rest)) => rest,
                    None => encoded,
                };
                if let Ok(decoded) = urlencoding::decode(encoded) {
                    return Some(decoded.into_owned());
                }
            }
            "filename" => {
                plain = Some(unquote(raw.trim()));
            }
            _ => {}
        }
    }
    plain.filter(|name| !name.is_empty())
}

/// Split header parameters on `;` outside quoted strings.
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(value[start..].trim());
    params
}

/// Strip surrounding quotes and resolve backslash escapes of a quoted string.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .map(|rest| rest.strip_suffix('"').unwrap_or(rest))
    else {
        return raw.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
