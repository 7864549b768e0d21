//! Terminal access instructions.
//!
//! Generates the curl and `sdrop` commands shown in the SSH panel and the
//! docs, with the configured API base substituted in. Nothing here runs a
//! command.

mod scripts;

pub use scripts::{ScriptLanguage, UsageExample, INSTALL_URL};

/// Placeholder shown when no password is supplied.
pub const PASSWORD_PLACEHOLDER: &str = "your-password";

/// Options for [`CommandSet::upload_command`].
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Local file path.
    pub file_path: String,
    /// Password to protect the upload.
    pub password: String,
    /// Days until expiry.
    pub expiry_days: u32,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            file_path: "path/to/file".to_string(),
            password: PASSWORD_PLACEHOLDER.to_string(),
            expiry_days: 7,
        }
    }
}

/// Options for [`CommandSet::download_command`].
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Password of the file.
    pub password: String,
    /// Where curl writes the file.
    pub output_path: String,
}

impl DownloadOptions {
    /// Set the output path.
    pub fn output(mut self, path: impl Into<String>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            password: PASSWORD_PLACEHOLDER.to_string(),
            output_path: "output-file".to_string(),
        }
    }
}

/// Command text generator bound to one API base URL.
#[derive(Debug, Clone)]
pub struct CommandSet {
    api_base: String,
}

impl CommandSet {
    /// Create a generator for `api_base` (e.g. `https://sdrop.io/api`).
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// API base URL used in commands.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Multi-line curl upload command.
    pub fn upload_command(&self, options: &UploadOptions) -> String {
        format!(
            "curl -X POST {}/upload \\\n  -F \"file=@{}\" \\\n  -F \"password={}\" \\\n  -F \"expiry={}\"",
            self.api_base,
            escape_double_quoted(&options.file_path),
            escape_double_quoted(&options.password),
            options.expiry_days
        )
    }

    /// Multi-line curl download command for `file_id`.
    pub fn download_command(&self, options: &DownloadOptions, file_id: &str) -> String {
        let body = serde_json::json!({ "password": options.password }).to_string();
        format!(
            "curl -X POST {}/files/{}/download \\\n  -H \"Content-Type: application/json\" \\\n  -d '{}' \\\n  -o {}",
            self.api_base,
            urlencoding::encode(file_id),
            escape_single_quoted(&body),
            shell_word(&options.output_path)
        )
    }

    /// One-line `sdrop` download command for `file_id`, saving into the
    /// current directory.
    pub fn cli_download_command(&self, file_id: &str) -> String {
        format!(
            "sdrop download {} --password \"{PASSWORD_PLACEHOLDER}\" --output .",
            shell_word(file_id)
        )
    }
}

/// Quote `value` as one shell word unless it is made only of safe characters.
fn shell_word(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", escape_single_quoted(value))
    }
}

/// Escape `"`, `\`, `$` and backticks for a double-quoted shell word.
fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Make `value` safe inside a single-quoted shell word.
fn escape_single_quoted(value: &str) -> String {
    value.replace('\'', r"'\''")
}
