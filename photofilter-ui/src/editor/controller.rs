// Editor controller: what the editing screen does when a button is pressed.
// It owns the session and the two image producers, and never renders anything.

use std::io;
use std::path::{Path, PathBuf};

use photofilter_core::{EditError, FilterRequest, ImageRef, TransformOp};
use photofilter_history::{EditHistory, EditOutcome, EditSession, PendingEdit, PushKind};
use photofilter_service::{FilterService, Transformer};
use tracing::{debug, info, warn};

use super::controls::{ButtonStates, FilterPicker};
use super::save;

/// What a job will do once it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Filter(FilterRequest),
    Transform(TransformOp),
}

/// A started edit, detached from the editor so it can run on another thread.
#[derive(Debug)]
pub struct EditJob {
    pending: PendingEdit,
    image: ImageRef,
    action: EditAction,
}

impl EditJob {
    /// Perform the call. Does not touch any history.
    pub fn run<F, T>(self, filters: &F, transformer: &T) -> FinishedJob
    where
        F: FilterService + ?Sized,
        T: Transformer + ?Sized,
    {
        let result = match self.action {
            EditAction::Filter(request) => filters.apply(&self.image, &request),
            EditAction::Transform(op) => transformer.transform(&self.image, op),
        };
        FinishedJob {
            pending: self.pending,
            action: self.action,
            result,
        }
    }
}

/// A job that has run; hand it back to `Editor::finish`.
#[derive(Debug)]
pub struct FinishedJob {
    pending: PendingEdit,
    action: EditAction,
    result: Result<ImageRef, EditError>,
}

impl FinishedJob {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Editor<F, T> {
    session: EditSession,
    picker: FilterPicker,
    filters: F,
    transformer: T,
}

impl<F: FilterService, T: Transformer> Editor<F, T> {
    pub fn new(filters: F, transformer: T) -> Self {
        Self {
            session: EditSession::new(),
            picker: FilterPicker::new(),
            filters,
            transformer,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn history(&self) -> &EditHistory {
        self.session.history()
    }

    pub fn picker(&self) -> &FilterPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut FilterPicker {
        &mut self.picker
    }

    pub fn current(&self) -> Option<&ImageRef> {
        self.session.history().current()
    }

    pub fn buttons(&self) -> ButtonStates {
        ButtonStates::from_session(&self.session, &self.picker)
    }

    /// A picked or captured image: becomes the new restore point.
    pub fn load_image(&mut self, image: ImageRef) {
        info!(payload_len = image.len(), "image loaded");
        self.session.history_mut().push_new(image);
    }

    /// Read an image file and load it.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<(), EditError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => EditError::PermissionDenied {
                resource: path.display().to_string(),
            },
            _ => EditError::InvalidImage(format!("{}: {}", path.display(), e)),
        })?;
        if bytes.is_empty() {
            return Err(EditError::InvalidImage(format!(
                "{}: file is empty",
                path.display()
            )));
        }
        self.load_image(ImageRef::from_bytes(&bytes));
        Ok(())
    }

    /// Start a filter request for the current image with the picker's settings.
    pub fn begin_filter(&mut self) -> Result<EditJob, EditError> {
        let image = self.current().cloned().ok_or(EditError::NoImageSelected)?;
        let request = self.picker.request()?;
        Ok(self.start(image, EditAction::Filter(request)))
    }

    pub fn begin_transform(&mut self, op: TransformOp) -> Result<EditJob, EditError> {
        let image = self.current().cloned().ok_or(EditError::NoImageSelected)?;
        Ok(self.start(image, EditAction::Transform(op)))
    }

    /// Apply a finished job's result. Failures leave the history untouched.
    pub fn finish(&mut self, job: FinishedJob) -> Result<EditOutcome, EditError> {
        debug!(action = ?job.action, ok = job.result.is_ok(), "job finished");
        self.session.complete(job.pending, job.result)
    }

    pub fn apply_filter(&mut self) -> Result<EditOutcome, EditError> {
        let job = self.begin_filter()?;
        let done = job.run(&self.filters, &self.transformer);
        self.finish(done)
    }

    pub fn apply_transform(&mut self, op: TransformOp) -> Result<EditOutcome, EditError> {
        let job = self.begin_transform(op)?;
        let done = job.run(&self.filters, &self.transformer);
        self.finish(done)
    }

    /// No-op (logged) when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&ImageRef> {
        if !self.history().can_undo() {
            warn!("undo pressed with nothing to undo");
        } else if let Err(e) = self.session.history_mut().undo() {
            warn!(error = %e, "undo rejected");
        }
        self.current()
    }

    pub fn redo(&mut self) -> Option<&ImageRef> {
        if !self.history().can_redo() {
            warn!("redo pressed with nothing to redo");
        } else if let Err(e) = self.session.history_mut().redo() {
            warn!(error = %e, "redo rejected");
        }
        self.current()
    }

    pub fn restore(&mut self) -> Option<&ImageRef> {
        if !self.history().can_restore() {
            warn!("restore pressed while already at the original");
        } else if let Err(e) = self.session.history_mut().restore() {
            warn!(error = %e, "restore rejected");
        }
        self.current()
    }

    /// Save the current image as `<dir>/download.png`.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let image = self.current().ok_or(EditError::NoImageSelected)?;
        save::save_to_dir(dir, image)
    }

    /// Leave the editing screen. Jobs still running will be discarded when they finish.
    pub fn close(&mut self) {
        self.session.reset();
        self.picker.clear();
    }

    fn start(&mut self, image: ImageRef, action: EditAction) -> EditJob {
        let pending = self.session.begin(PushKind::Derived);
        EditJob {
            pending,
            image,
            action,
        }
    }
}
