//! photofilter-core: shared value types for the PhotoFilter client.
//!
//! Design rules:
//! - Images are opaque encoded payloads (base64 text). The client never touches pixels.
//! - Payloads are immutable and shared, so cloning an image into a history stack is cheap.
//! - Filter parameters are bounded and clamped before they reach the wire.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub mod error;
pub mod filter;
pub mod transform;

pub use error::EditError;
pub use filter::{FilterCategory, FilterKind, FilterRequest, HexColor, Intensity, ParamError};
pub use transform::TransformOp;

/// An encoded image, stored as base64 text.
///
/// Equality is value equality of the payload, which is what the history model
/// uses to decide whether the current image is still the original.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(Arc<str>);

impl ImageRef {
    /// Wrap an already base64-encoded payload.
    pub fn from_base64(payload: impl Into<Arc<str>>) -> Self {
        Self(payload.into())
    }

    /// Encode raw file bytes (PNG, JPEG, ...) into a payload.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes).into())
    }

    /// Strip a `data:<mime>;base64,` prefix if present.
    pub fn from_data_uri(uri: &str) -> Result<Self, EditError> {
        if !uri.starts_with("data:") {
            return Ok(Self::from_base64(uri));
        }
        match uri.split_once(";base64,") {
            Some((_, payload)) => Ok(Self::from_base64(payload)),
            None => Err(EditError::InvalidImage(
                "data URI is not base64 encoded".into(),
            )),
        }
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Payload length in base64 characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode the payload back into file bytes.
    ///
    /// Spaces are read as `+`, since form-style transports turn one into the other.
    pub fn decode(&self) -> Result<Vec<u8>, EditError> {
        let cleaned: String = self
            .0
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .map(|c| if c == ' ' { '+' } else { c })
            .collect();
        let bytes = STANDARD
            .decode(cleaned.as_bytes())
            .map_err(|e| EditError::InvalidImage(e.to_string()))?;
        if bytes.is_empty() {
            return Err(EditError::InvalidImage("payload is empty".into()));
        }
        Ok(bytes)
    }

    /// True when both refs share the same allocation.
    pub fn ptr_eq(&self, other: &ImageRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// Payloads are megabytes of base64; keep logs readable.
impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.0.chars().take(12).collect();
        write!(f, "ImageRef({}.., {} chars)", head, self.0.len())
    }
}

impl From<&str> for ImageRef {
    fn from(payload: &str) -> Self {
        Self::from_base64(payload)
    }
}

impl From<String> for ImageRef {
    fn from(payload: String) -> Self {
        Self::from_base64(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_roundtrip() {
        let img = ImageRef::from_bytes(b"\x89PNG fake");
        assert_eq!(img.decode().unwrap(), b"\x89PNG fake");
    }

    #[test]
    fn test_decode_tolerates_spaces_for_plus() {
        // "+/8=" decodes to [0xfb, 0xff]
        let img = ImageRef::from_base64(" /8=");
        assert_eq!(img.decode().unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let img = ImageRef::from_base64("not base64 !!");
        assert!(matches!(img.decode(), Err(EditError::InvalidImage(_))));
        assert!(ImageRef::from_base64("").decode().is_err());
    }

    #[test]
    fn test_data_uri() {
        let img = ImageRef::from_base64("aGVsbG8=");
        assert_eq!(
            ImageRef::from_data_uri("data:image/png;base64,aGVsbG8=").unwrap(),
            img
        );
        assert_eq!(ImageRef::from_data_uri("aGVsbG8=").unwrap(), img);
        assert!(ImageRef::from_data_uri("data:image/png,rawbytes").is_err());
    }

    #[test]
    fn test_value_equality_and_sharing() {
        let a = ImageRef::from_base64("aGVsbG8=");
        let b = a.clone();
        let c = ImageRef::from_base64(String::from("aGVsbG8="));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn test_debug_is_truncated() {
        let img = ImageRef::from_bytes(&[7u8; 300]);
        let dbg = format!("{:?}", img);
        assert!(dbg.len() < 60);
        assert!(dbg.contains("400 chars"));
    }
}
