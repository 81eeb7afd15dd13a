//! Picked-file capture: synchronous name bookkeeping plus an async read into a data URI.

use std::path::{Path, PathBuf};

use shared::{error::CaptureError, DataUri};

/// Extensions offered by the file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttachmentPreview {
    #[default]
    Empty,
    Loading {
        generation: u64,
    },
    Ready(DataUri),
    Failed(String),
}

impl AttachmentPreview {
    pub fn ready(&self) -> Option<&DataUri> {
        match self {
            Self::Ready(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Work order for the decode worker. Only the newest generation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTicket {
    pub generation: u64,
    pub path: PathBuf,
}

pub fn file_name_of(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => "attachment".to_string(),
    }
}

/// Reads the whole file once and embeds it. The MIME type comes from the
/// extension, falling back to `application/octet-stream`.
pub async fn decode_attachment(path: &Path) -> Result<DataUri, CaptureError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| CaptureError::read(path, err))?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    tracing::debug!(
        path = %path.display(),
        mime = mime.essence_str(),
        size_bytes = bytes.len(),
        "attachment read"
    );
    Ok(DataUri::encode(mime.essence_str(), &bytes))
}

pub async fn decode_ticket(ticket: &DecodeTicket) -> Result<DataUri, CaptureError> {
    decode_attachment(&ticket.path).await
}
