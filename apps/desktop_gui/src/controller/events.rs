//! Worker events and error modeling for the form controller.

use shared::{error::CaptureError, DataUri};

use crate::ui::previews::PreviewImage;

/// A picked file read into its data URI, with preview pixels decoded on the worker.
pub struct DecodedAttachment {
    pub uri: DataUri,
    pub preview: Result<PreviewImage, String>,
}

pub enum UiEvent {
    AttachmentDecoded {
        generation: u64,
        result: Result<DecodedAttachment, CaptureError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Io,
    Encoding,
    Worker,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    AttachmentDecode,
    SignatureSave,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("failed to read")
            || message_lower.contains("no such file")
            || message_lower.contains("permission denied")
            || message_lower.contains("not found")
        {
            UiErrorCategory::Io
        } else if message_lower.contains("worker")
            || message_lower.contains("runtime")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Worker
        } else if message_lower.contains("encode")
            || message_lower.contains("decode")
            || message_lower.contains("invalid data uri")
            || message_lower.contains("format")
        {
            UiErrorCategory::Encoding
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_capture(context: UiErrorContext, err: &CaptureError) -> Self {
        let category = match err {
            CaptureError::Read { .. } => UiErrorCategory::Io,
            CaptureError::Encode(_) | CaptureError::InvalidDataUri(_) => UiErrorCategory::Encoding,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status line text shown under the form.
    pub fn status_text(&self) -> String {
        let what = match self.context {
            UiErrorContext::BackendStartup => "No se pudo iniciar el lector de archivos",
            UiErrorContext::AttachmentDecode => "No se pudo leer la foto",
            UiErrorContext::SignatureSave => "No se pudo guardar la firma",
        };
        format!("{what} ({}): {}", err_label(self.category), self.message)
    }
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Io => "archivo",
        UiErrorCategory::Encoding => "imagen",
        UiErrorCategory::Worker => "proceso",
        UiErrorCategory::Unknown => "desconocido",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_read_failures_as_io() {
        let err = UiError::from_message(
            UiErrorContext::AttachmentDecode,
            "failed to read '/tmp/x.png': No such file or directory (os error 2)",
        );
        assert_eq!(err.category(), UiErrorCategory::Io);
        assert_eq!(err.context(), UiErrorContext::AttachmentDecode);
        assert!(err.status_text().starts_with("No se pudo leer la foto (archivo)"));
    }

    #[test]
    fn classifies_png_failures_as_encoding() {
        let err = UiError::from_message(
            UiErrorContext::SignatureSave,
            "failed to encode image: buffer too small",
        );
        assert_eq!(err.category(), UiErrorCategory::Encoding);
    }

    #[test]
    fn capture_errors_map_by_variant() {
        let read = CaptureError::read(
            "/tmp/foto.png",
            std::io::Error::new(std::io::ErrorKind::Other, "disk unplugged"),
        );
        let err = UiError::from_capture(UiErrorContext::AttachmentDecode, &read);
        assert_eq!(err.category(), UiErrorCategory::Io);
        assert!(err.message().contains("disk unplugged"));

        let bad_uri = CaptureError::InvalidDataUri("missing scheme".to_string());
        let err = UiError::from_capture(UiErrorContext::AttachmentDecode, &bad_uri);
        assert_eq!(err.category(), UiErrorCategory::Encoding);

        let encode = CaptureError::Encode("png runtime buffer too small".to_string());
        let err = UiError::from_capture(UiErrorContext::SignatureSave, &encode);
        assert_eq!(err.category(), UiErrorCategory::Encoding);
        assert!(err.status_text().starts_with("No se pudo guardar la firma (imagen)"));
    }

    #[test]
    fn classifies_runtime_startup_as_worker() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "decode worker startup failure: failed to build runtime: out of threads",
        );
        assert_eq!(err.category(), UiErrorCategory::Worker);
        assert!(err.message().contains("out of threads"));
    }
}
