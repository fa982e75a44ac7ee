//! photofilter-ui: the editing screen's behavior, without the screen.
//!
//! The controller decides what each button does and whether it is enabled.
//! Rendering is left to whatever front end drives it (the `photofilter` CLI is one).

pub mod editor;
pub mod script;

pub use editor::{Alert, ButtonStates, EditAction, EditJob, Editor, FilterPicker, FinishedJob};
pub use script::{catalogue, run_step, Step, StepError};
