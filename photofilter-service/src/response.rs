// The JSON we accept back from the filter service.
// The service answers with a bare JSON string holding the new base64 payload.
// A wrapped object form is accepted too, but nothing else.

use photofilter_core::{EditError, ImageRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterResponse {
    Bare(String),
    Wrapped(WrappedImage),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrappedImage {
    pub image: String,
}

impl FilterResponse {
    pub fn into_payload(self) -> String {
        match self {
            FilterResponse::Bare(payload) => payload,
            FilterResponse::Wrapped(w) => w.image,
        }
    }
}

/// Parse a response body into the filtered image.
pub fn parse_filter_response(body: &str) -> Result<ImageRef, EditError> {
    let response: FilterResponse = serde_json::from_str(body.trim()).map_err(|e| {
        tracing::warn!(error = %e, body_len = body.len(), "unparseable filter response");
        EditError::InvalidResponse(e.to_string())
    })?;

    let payload = response.into_payload();
    if payload.is_empty() {
        return Err(EditError::InvalidResponse("empty image payload".into()));
    }
    ImageRef::from_data_uri(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_string() {
        let img = parse_filter_response("\"aGVsbG8=\"").unwrap();
        assert_eq!(img.as_base64(), "aGVsbG8=");
    }

    #[test]
    fn test_wrapped_object() {
        let img = parse_filter_response(r#"{"image": "aGVsbG8="}"#).unwrap();
        assert_eq!(img.as_base64(), "aGVsbG8=");
    }

    #[test]
    fn test_data_uri_payload_is_unwrapped() {
        let img = parse_filter_response("\"data:image/png;base64,aGVsbG8=\"").unwrap();
        assert_eq!(img.as_base64(), "aGVsbG8=");
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(matches!(
            parse_filter_response(r#"{"image": "x", "extra": 1}"#),
            Err(EditError::InvalidResponse(_))
        ));
        assert!(parse_filter_response("42").is_err());
        assert!(parse_filter_response("<html>oops</html>").is_err());
        assert!(parse_filter_response("\"\"").is_err());
    }
}
