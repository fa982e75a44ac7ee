//! Scripted edit steps, as accepted on the command line.
//!
//! ```text
//! filter:<name>[:<intensity>[:<hex>]]   e.g. filter:gauss:40, filter:color::#ff8800
//! rotate-cw | rotate-ccw | hflip | vflip
//! undo | redo | restore
//! open:<file>                           load another image (new restore point)
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use photofilter_core::{EditError, FilterKind, HexColor, ParamError, TransformOp};
use photofilter_service::{FilterService, Transformer};
use thiserror::Error;

use crate::editor::{Editor, FilterPicker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Filter {
        kind: FilterKind,
        intensity: i32,
        color: Option<HexColor>,
    },
    Transform(TransformOp),
    Undo,
    Redo,
    Restore,
    Open(PathBuf),
}

#[derive(Debug, Error)]
pub enum StepError {
    #[error("empty step")]
    Empty,

    #[error("invalid intensity '{value}' in step '{step}'")]
    InvalidIntensity { step: String, value: String },

    #[error("step '{step}': {source}")]
    Param {
        step: String,
        #[source]
        source: ParamError,
    },

    #[error("unknown step '{0}'")]
    Unknown(String),
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StepError::Empty);
        }
        let param = |source| StepError::Param {
            step: s.to_string(),
            source,
        };

        if let Some(path) = s.strip_prefix("open:") {
            return Ok(Step::Open(PathBuf::from(path)));
        }

        if let Some(rest) = s.strip_prefix("filter:") {
            let mut parts = rest.splitn(3, ':');
            let kind: FilterKind = parts.next().unwrap_or_default().parse().map_err(param)?;
            let intensity = match parts.next().filter(|v| !v.is_empty()) {
                Some(v) => v.parse().map_err(|_| StepError::InvalidIntensity {
                    step: s.to_string(),
                    value: v.to_string(),
                })?,
                None => 0,
            };
            let color = match parts.next().filter(|v| !v.is_empty()) {
                Some(v) => Some(v.parse().map_err(param)?),
                None => None,
            };
            return Ok(Step::Filter {
                kind,
                intensity,
                color,
            });
        }

        match s.to_ascii_lowercase().as_str() {
            "undo" => Ok(Step::Undo),
            "redo" => Ok(Step::Redo),
            "restore" => Ok(Step::Restore),
            other => other
                .parse::<TransformOp>()
                .map(Step::Transform)
                .map_err(|_| StepError::Unknown(s.to_string())),
        }
    }
}

/// Run one step against the editor, the same way the matching button press would.
pub fn run_step<F, T>(editor: &mut Editor<F, T>, step: &Step) -> Result<(), EditError>
where
    F: FilterService,
    T: Transformer,
{
    tracing::debug!(step = ?step, "running step");
    match step {
        Step::Filter {
            kind,
            intensity,
            color,
        } => {
            let picker = editor.picker_mut();
            picker.select(*kind);
            picker.set_intensity(*intensity);
            if let Some(color) = color {
                picker.set_color(*color);
            }
            editor.apply_filter()?;
        }
        Step::Transform(op) => {
            editor.apply_transform(*op)?;
        }
        Step::Undo => {
            editor.undo();
        }
        Step::Redo => {
            editor.redo();
        }
        Step::Restore => {
            editor.restore();
        }
        Step::Open(path) => editor.open_file(path)?,
    }
    Ok(())
}

/// Step names grouped the way the filter menu groups them, with their menu labels.
pub fn catalogue() -> String {
    let mut lines = Vec::new();
    for (category, kinds) in FilterPicker::menu() {
        lines.push(category.label().to_string());
        for kind in kinds {
            let (min, max) = kind.intensity_range();
            let extra = if kind.uses_color() {
                "color wheel (hex)".to_string()
            } else if kind.uses_intensity() {
                format!("intensity {}..={}", min, max)
            } else {
                String::new()
            };
            lines.push(
                format!("  filter:{:<9} {:<16} {}", kind.wire_name(), kind.label(), extra)
                    .trim_end()
                    .to_string(),
            );
        }
    }
    lines.push("Transforms".to_string());
    for op in TransformOp::ALL {
        lines.push(format!("  {}", op.name()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_steps() {
        assert_eq!(
            "filter:invert".parse::<Step>().unwrap(),
            Step::Filter {
                kind: FilterKind::Invert,
                intensity: 0,
                color: None
            }
        );
        assert_eq!(
            "filter:gauss:40".parse::<Step>().unwrap(),
            Step::Filter {
                kind: FilterKind::GaussianBlur,
                intensity: 40,
                color: None
            }
        );
        assert_eq!(
            "filter:color::#ff8800".parse::<Step>().unwrap(),
            Step::Filter {
                kind: FilterKind::Color,
                intensity: 0,
                color: Some(HexColor(0xFF8800))
            }
        );
    }

    #[test]
    fn test_parse_other_steps() {
        assert_eq!("undo".parse::<Step>().unwrap(), Step::Undo);
        assert_eq!("Restore".parse::<Step>().unwrap(), Step::Restore);
        assert_eq!(
            "rotate-cw".parse::<Step>().unwrap(),
            Step::Transform(TransformOp::RotateCw)
        );
        assert_eq!(
            "vflip".parse::<Step>().unwrap(),
            Step::Transform(TransformOp::FlipVertical)
        );
        assert_eq!(
            "open:photos/cat.png".parse::<Step>().unwrap(),
            Step::Open(PathBuf::from("photos/cat.png"))
        );
    }

    #[test]
    fn test_catalogue_lists_every_filter() {
        let text = catalogue();
        for kind in FilterKind::ALL {
            assert!(text.contains(kind.label()), "{} missing", kind);
            let step = format!("filter:{}", kind.wire_name());
            assert!(step.parse::<Step>().is_ok());
        }
        assert!(text.contains("Funny"));
        let line = |prefix: &str| {
            text.lines()
                .find(|l| l.trim_start().starts_with(prefix))
                .unwrap_or_default()
                .to_string()
        };
        assert!(line("filter:gauss ").ends_with("intensity 0..=100"));
        assert!(line("filter:bright ").ends_with("intensity -100..=100"));
        assert!(line("filter:color ").ends_with("color wheel (hex)"));
        assert!(line("filter:invert ").ends_with("Invert"));
        assert!(text.contains("rotateCCW"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Step>(), Err(StepError::Empty)));
        assert!(matches!(
            "filter:sepia".parse::<Step>(),
            Err(StepError::Param { .. })
        ));
        assert!(matches!(
            "filter:box:lots".parse::<Step>(),
            Err(StepError::InvalidIntensity { .. })
        ));
        assert!(matches!(
            "filter:color:0:#12".parse::<Step>(),
            Err(StepError::Param { .. })
        ));
        assert!(matches!("sharpen".parse::<Step>(), Err(StepError::Unknown(_))));
    }
}
