//! Geometric transforms applied locally, without the filter service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformOp {
    #[serde(rename = "rotateCW")]
    RotateCw,
    #[serde(rename = "rotateCCW")]
    RotateCcw,
    #[serde(rename = "hflip")]
    FlipHorizontal,
    #[serde(rename = "vflip")]
    FlipVertical,
}

impl TransformOp {
    pub const ALL: [TransformOp; 4] = [
        TransformOp::RotateCcw,
        TransformOp::RotateCw,
        TransformOp::FlipVertical,
        TransformOp::FlipHorizontal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransformOp::RotateCw => "rotateCW",
            TransformOp::RotateCcw => "rotateCCW",
            TransformOp::FlipHorizontal => "hflip",
            TransformOp::FlipVertical => "vflip",
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformOp {
    type Err = ParamError;

    // Accepts the wire names plus the kebab-case spellings used on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rotatecw" | "rotate-cw" | "cw" => Ok(TransformOp::RotateCw),
            "rotateccw" | "rotate-ccw" | "ccw" => Ok(TransformOp::RotateCcw),
            "hflip" | "flip-h" => Ok(TransformOp::FlipHorizontal),
            "vflip" | "flip-v" => Ok(TransformOp::FlipVertical),
            _ => Err(ParamError::UnknownTransform {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for op in TransformOp::ALL {
            assert_eq!(op.name().parse::<TransformOp>().unwrap(), op);
        }
        assert_eq!("rotate-ccw".parse::<TransformOp>().unwrap(), TransformOp::RotateCcw);
        assert!("rotate180".parse::<TransformOp>().is_err());
    }
}
