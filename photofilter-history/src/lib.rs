//! photofilter-history: linear undo/redo/restore history for an editing session.
//!
//! Design rules:
//! - One main stack of images; the last entry is what the user sees.
//! - Uploads are "origins". Filter and transform results are "derived".
//! - Restore re-pushes the latest origin on top, so restore is itself undoable.
//! - Undo/redo carry origin markers across the boundary they belong to.
//! - Every mutation either fully applies or leaves all four stacks untouched.

use photofilter_core::ImageRef;
use thiserror::Error;

/// Edit history for one editing session.
///
/// `origins` holds positions in `main` where a fresh upload landed. `origin_redo` parks
/// origin positions that `undo` stepped below, until `redo` grows the stack back past them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditHistory {
    main: Vec<ImageRef>,
    undone: Vec<ImageRef>,
    origins: Vec<usize>,
    origin_redo: Vec<usize>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a freshly uploaded or captured image. It becomes the new restore point.
    pub fn push_new(&mut self, image: ImageRef) {
        let origin = self.main.len();
        self.origins.push(origin);
        self.main.push(image);
        self.clear_redo();

        tracing::debug!(
            origin,
            len = self.main.len(),
            "pushed new origin image"
        );
    }

    /// Push the result of a filter or transform applied to the current image.
    pub fn push_derived(&mut self, image: ImageRef) {
        self.main.push(image);
        self.clear_redo();

        tracing::debug!(len = self.main.len(), "pushed derived image");
    }

    /// Step back one image. Returns the new current image, if any remains.
    pub fn undo(&mut self) -> Result<Option<&ImageRef>, HistoryError> {
        let Some(top) = self.main.len().checked_sub(1) else {
            return Err(HistoryError::EmptyHistory);
        };

        // The image about to leave is the current origin: park its marker for redo.
        if self.origins.last() == Some(&top) {
            self.origins.pop();
            self.origin_redo.push(top);
            tracing::trace!(origin = top, "origin marker parked for redo");
        }

        if let Some(image) = self.main.pop() {
            self.undone.push(image);
        }

        tracing::debug!(
            len = self.main.len(),
            undone = self.undone.len(),
            "undo"
        );
        Ok(self.main.last())
    }

    /// Re-apply the most recently undone image. Returns the new current image.
    pub fn redo(&mut self) -> Result<&ImageRef, HistoryError> {
        let Some(image) = self.undone.pop() else {
            return Err(HistoryError::NothingToRedo);
        };

        if let Some(&origin) = self.origin_redo.last() {
            if self.main.len() >= origin {
                self.origin_redo.pop();
                self.origins.push(origin);
                tracing::trace!(origin, "origin marker reinstated");
            }
        }

        self.main.push(image);

        tracing::debug!(
            len = self.main.len(),
            undone = self.undone.len(),
            "redo"
        );
        Ok(&self.main[self.main.len() - 1])
    }

    /// Push a copy of the latest origin image on top of the stack.
    pub fn restore(&mut self) -> Result<&ImageRef, HistoryError> {
        let origin = self.origin().cloned().ok_or(HistoryError::NoOrigin)?;
        self.push_derived(origin);

        tracing::debug!(len = self.main.len(), "restored latest origin");
        Ok(&self.main[self.main.len() - 1])
    }

    pub fn current(&self) -> Option<&ImageRef> {
        self.main.last()
    }

    /// The image restore would bring back.
    pub fn origin(&self) -> Option<&ImageRef> {
        self.origins.last().and_then(|&i| self.main.get(i))
    }

    pub fn can_undo(&self) -> bool {
        !self.main.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn can_restore(&self) -> bool {
        !self.main.is_empty() && !self.is_at_original()
    }

    /// True when the current image equals (by value) the latest origin.
    pub fn is_at_original(&self) -> bool {
        match (self.origin(), self.current()) {
            (Some(origin), Some(current)) => origin == current,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    pub fn undone_len(&self) -> usize {
        self.undone.len()
    }

    pub fn origin_indices(&self) -> &[usize] {
        &self.origins
    }

    pub fn origin_redo_indices(&self) -> &[usize] {
        &self.origin_redo
    }

    /// Drop everything. Used when the editing screen goes away.
    pub fn clear(&mut self) {
        self.main.clear();
        self.undone.clear();
        self.origins.clear();
        self.origin_redo.clear();
    }

    // Any new push invalidates pending redo history.
    fn clear_redo(&mut self) {
        self.undone.clear();
        self.origin_redo.clear();
    }
}

/// Caller errors: the UI should have gated these with the `can_*` queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    EmptyHistory,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("no original image to restore")]
    NoOrigin,
}

pub mod session;

pub use session::{EditOutcome, EditSession, PendingEdit, PushKind, SessionToken};
