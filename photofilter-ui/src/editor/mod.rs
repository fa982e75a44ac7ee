// Editor module for the PhotoFilter client.

pub mod alerts;
pub mod controller;
pub mod controls;
pub mod save;

pub use alerts::Alert;
pub use controller::{EditAction, EditJob, Editor, FinishedJob};
pub use controls::{ButtonStates, FilterPicker};
