// Filter picker state and button enablement for the editor screen.

use photofilter_core::{EditError, FilterCategory, FilterKind, FilterRequest, HexColor, Intensity};
use photofilter_history::EditSession;
use serde::Serialize;
use tracing::{debug, trace};

/// Dropdown + slider + color wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPicker {
    selected: Option<FilterKind>,
    intensity: Intensity,
    color: HexColor,
}

impl Default for FilterPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPicker {
    pub fn new() -> Self {
        Self {
            selected: None,
            intensity: Intensity {
                value: 0,
                min: 0,
                max: 0,
            },
            color: HexColor::default(),
        }
    }

    /// Dropdown contents, grouped by category.
    pub fn menu() -> Vec<(FilterCategory, Vec<FilterKind>)> {
        [
            FilterCategory::Colors,
            FilterCategory::Funny,
            FilterCategory::Classic,
        ]
        .into_iter()
        .map(|c| (c, FilterKind::in_category(c).collect()))
        .collect()
    }

    /// Pick a filter. Switching filters resets the slider to 0.
    pub fn select(&mut self, kind: FilterKind) {
        if self.selected == Some(kind) {
            trace!(filter = %kind, "filter re-selected");
            return;
        }
        debug!(filter = %kind, "filter selected");
        self.selected = Some(kind);
        self.intensity = Intensity::for_filter(kind, 0);
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.intensity = Intensity {
            value: 0,
            min: 0,
            max: 0,
        };
    }

    pub fn selected(&self) -> Option<FilterKind> {
        self.selected
    }

    /// Move the slider. Returns the value actually kept after clamping.
    pub fn set_intensity(&mut self, value: i32) -> i32 {
        self.intensity.set(value);
        self.intensity.value
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.color = color;
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    pub fn shows_slider(&self) -> bool {
        self.selected.is_some_and(|k| k.uses_intensity())
    }

    pub fn shows_color_wheel(&self) -> bool {
        self.selected.is_some_and(|k| k.uses_color())
    }

    pub fn request(&self) -> Result<FilterRequest, EditError> {
        let kind = self.selected.ok_or(EditError::NoFilterSelected)?;
        Ok(FilterRequest::new(kind)
            .with_intensity(self.intensity.value)
            .with_color(self.color))
    }
}

/// Which editor buttons are enabled, and which picker controls are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonStates {
    pub save: bool,
    pub share: bool,
    pub undo: bool,
    pub redo: bool,
    pub restore: bool,
    pub apply_filter: bool,
    pub transform: bool,
    pub slider: bool,
    pub color_wheel: bool,
}

impl ButtonStates {
    pub fn from_session(session: &EditSession, picker: &FilterPicker) -> Self {
        let history = session.history();
        let loaded = !history.is_empty();
        let idle = session.in_flight() == 0;

        Self {
            save: loaded,
            share: loaded,
            undo: history.can_undo(),
            redo: history.can_redo(),
            restore: history.can_restore(),
            apply_filter: loaded && picker.selected().is_some() && idle,
            transform: loaded && idle,
            slider: picker.shows_slider(),
            color_wheel: picker.shows_color_wheel(),
        }
    }
}
