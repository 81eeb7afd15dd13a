use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

const BASE64_MARKER: &str = ";base64,";

/// Self-contained `data:<mime>;base64,<payload>` image encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUri(String);

impl DataUri {
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime}{BASE64_MARKER}{}", STANDARD.encode(bytes)))
    }

    pub fn parse(raw: impl Into<String>) -> Result<Self, CaptureError> {
        let raw = raw.into();
        let (mime, payload) = split(&raw)?;
        if mime.is_empty() {
            return Err(CaptureError::InvalidDataUri("missing mime type".to_string()));
        }
        STANDARD
            .decode(payload)
            .map_err(|err| CaptureError::InvalidDataUri(err.to_string()))?;
        Ok(Self(raw))
    }

    pub fn mime(&self) -> &str {
        split(&self.0).map(|(mime, _)| mime).unwrap_or_default()
    }

    pub fn decode(&self) -> Result<Vec<u8>, CaptureError> {
        let (_, payload) = split(&self.0)?;
        STANDARD
            .decode(payload)
            .map_err(|err| CaptureError::InvalidDataUri(err.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn split(raw: &str) -> Result<(&str, &str), CaptureError> {
    let body = raw
        .strip_prefix("data:")
        .ok_or_else(|| CaptureError::InvalidDataUri("missing 'data:' scheme".to_string()))?;
    let (header, payload) = body
        .split_once(BASE64_MARKER)
        .ok_or_else(|| CaptureError::InvalidDataUri("missing base64 marker".to_string()))?;
    // Drop media type parameters such as `;charset=`.
    let mime = header.split(';').next().unwrap_or_default();
    Ok((mime, payload))
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DataUri {
    type Error = CaptureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DataUri> for String {
    fn from(value: DataUri) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_mime_prefix() {
        let uri = DataUri::encode("image/png", b"\x89PNG");
        assert_eq!(uri.as_str(), "data:image/png;base64,iVBORw==");
        assert_eq!(uri.mime(), "image/png");
        assert_eq!(uri.decode().expect("decode"), b"\x89PNG");
    }

    #[test]
    fn parses_uri_with_media_type_parameters() {
        let uri = DataUri::parse("data:image/jpeg;name=a.jpg;base64,AAEC").expect("parse");
        assert_eq!(uri.mime(), "image/jpeg");
        assert_eq!(uri.decode().expect("decode"), vec![0, 1, 2]);
    }

    #[test]
    fn rejects_malformed_uris() {
        assert!(DataUri::parse("image/png;base64,AAEC").is_err());
        assert!(DataUri::parse("data:image/png,AAEC").is_err());
        assert!(DataUri::parse("data:;base64,AAEC").is_err());
        assert!(DataUri::parse("data:image/png;base64,***").is_err());
    }

    #[test]
    fn deserialization_validates_syntax() {
        let ok: DataUri = serde_json::from_str("\"data:text/plain;base64,aGk=\"").expect("valid");
        assert_eq!(ok.decode().expect("decode"), b"hi");
        assert!(serde_json::from_str::<DataUri>("\"not a uri\"").is_err());
    }
}
