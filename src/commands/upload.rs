//! File upload for the retrieval pipeline.

use super::{CommandError, require_token};
use crate::backend::{Backend, FileType, FileUpload, UploadResponse};
use crate::config::Session;
use crate::print_cmd_success;
use std::path::{Path, PathBuf};

pub const UPLOAD_FAILED: &str = "Something went wrong while uploading the file.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: Option<PathBuf>,
    pub file_type: FileType,
    pub description: String,
}

impl UploadRequest {
    /// Only images carry a description; other types always send an empty one.
    pub fn effective_description(&self) -> String {
        match self.file_type {
            FileType::Image => self.description.clone(),
            FileType::Pdf => String::new(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// Uploads the selected file.
///
/// Without a file this returns `NoFileSelected` before anything is read or sent.
pub async fn upload(
    request: &UploadRequest,
    session: &Session,
    backend: &dyn Backend,
) -> Result<UploadResponse, CommandError> {
    let path = request.file.as_ref().ok_or(CommandError::NoFileSelected)?;
    require_token(session)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CommandError::File {
            path: path.display().to_string(),
            source,
        })?;
    let upload = FileUpload {
        file_name: file_name(path),
        bytes,
        file_type: request.file_type,
        description: request.effective_description(),
    };

    match backend.upload_file(&upload).await {
        Ok(response) => {
            print_cmd_success!(
                &format!("{}: {}", response.message, response.filename),
                ""
            );
            Ok(response)
        }
        Err(e) => {
            log::warn!("Upload of {} failed: {}", upload.file_name, e);
            Err(CommandError::backend(UPLOAD_FAILED, e))
        }
    }
}
