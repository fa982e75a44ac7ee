// User-facing alert text for edit errors.

use photofilter_core::EditError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&EditError> for Alert {
    fn from(err: &EditError) -> Self {
        match err {
            EditError::PermissionDenied { resource } => Alert::new(
                "Access Denied",
                format!("Permission to access {} is required!", resource),
            ),
            EditError::NoImageSelected => Alert::new("No image selected", "Upload an image first"),
            EditError::NoFilterSelected => Alert::new("No filter selected", "Select a filter first"),
            EditError::ServiceUnavailable { status, .. } => Alert::new(
                "Status Wrong!",
                format!("The status is wrong! Expected: 200, was: {}", status),
            ),
            EditError::Network(_) | EditError::InvalidResponse(_) => Alert::new(
                "Server Error",
                "There was an error contacting the server",
            ),
            EditError::Transform(reason) => Alert::new("Transform Failed", reason.clone()),
            EditError::InvalidImage(reason) => Alert::new("Invalid Image", reason.clone()),
        }
    }
}

impl From<EditError> for Alert {
    fn from(err: EditError) -> Self {
        Alert::from(&err)
    }
}
