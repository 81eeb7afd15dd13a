use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning user input (a picked file or the signature surface)
/// into an embeddable image.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("invalid data uri: {0}")]
    InvalidDataUri(String),
}

impl CaptureError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_file() {
        let err = CaptureError::read(
            "/tmp/missing.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("/tmp/missing.png"));
        assert!(rendered.contains("no such file"));
    }
}
