//! Loading the file page for an id.

use super::AccessMachine;
use crate::api::FileApi;
use crate::Result;

/// What the file page shows for an id.
#[derive(Debug, Clone)]
pub enum FilePage {
    /// The file is missing or expired. Rendered as a full page, not a banner.
    NotFound {
        /// Requested id.
        file_id: String,
    },
    /// The file exists; access goes through the machine.
    Found(AccessMachine),
}

impl FilePage {
    /// Fetch metadata for `file_id` and build the page.
    ///
    /// Transport and server failures are returned as errors; only a missing
    /// file maps to [`FilePage::NotFound`].
    pub async fn load<A: FileApi>(api: &A, file_id: &str) -> Result<Self> {
        match api.get_file_metadata(file_id).await? {
            Some(metadata) => Ok(FilePage::Found(AccessMachine::new(metadata))),
            None => {
                tracing::info!(file_id, "File not found");
                Ok(FilePage::NotFound {
                    file_id: file_id.to_string(),
                })
            }
        }
    }

    /// The access machine, if the file exists.
    pub fn access(&self) -> Option<&AccessMachine> {
        match self {
            FilePage::Found(machine) => Some(machine),
            FilePage::NotFound { .. } => None,
        }
    }

    /// Mutable access machine, if the file exists.
    pub fn access_mut(&mut self) -> Option<&mut AccessMachine> {
        match self {
            FilePage::Found(machine) => Some(machine),
            FilePage::NotFound { .. } => None,
        }
    }

    /// Requested file id.
    pub fn file_id(&self) -> &str {
        match self {
            FilePage::Found(machine) => machine.file_id(),
            FilePage::NotFound { file_id } => file_id,
        }
    }

    /// Whether the page is the terminal "not found" page.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FilePage::NotFound { .. })
    }
}
