//! Filter catalogue and request parameters for the remote filter service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Menu grouping shown in the filter picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    Colors,
    Funny,
    Classic,
}

impl FilterCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FilterCategory::Colors => "Colors",
            FilterCategory::Funny => "Funny",
            FilterCategory::Classic => "Classic",
        }
    }
}

/// Every filter the service knows. Serialized as the service's wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    #[serde(rename = "invert")]
    Invert,
    #[serde(rename = "gray")]
    Grayscale,
    #[serde(rename = "bw")]
    BlackWhite,
    #[serde(rename = "color")]
    Color,
    #[serde(rename = "red")]
    Red,
    #[serde(rename = "green")]
    Green,
    #[serde(rename = "blue")]
    Blue,
    #[serde(rename = "cyan")]
    Cyan,
    #[serde(rename = "magenta")]
    Magenta,
    #[serde(rename = "yellow")]
    Yellow,
    #[serde(rename = "emoji")]
    Emojify,
    #[serde(rename = "ascii")]
    Asciify,
    #[serde(rename = "ansi")]
    Ansify,
    #[serde(rename = "box")]
    BoxBlur,
    #[serde(rename = "gauss")]
    GaussianBlur,
    #[serde(rename = "sharp")]
    Sharpen,
    #[serde(rename = "noise")]
    RemoveNoise,
    #[serde(rename = "bright")]
    Brightness,
    #[serde(rename = "sat")]
    Saturation,
    #[serde(rename = "outline")]
    Outline,
    #[serde(rename = "dom")]
    DominantHue,
}

impl FilterKind {
    pub const ALL: [FilterKind; 21] = [
        FilterKind::Invert,
        FilterKind::Grayscale,
        FilterKind::BlackWhite,
        FilterKind::Color,
        FilterKind::Red,
        FilterKind::Green,
        FilterKind::Blue,
        FilterKind::Cyan,
        FilterKind::Magenta,
        FilterKind::Yellow,
        FilterKind::Emojify,
        FilterKind::Asciify,
        FilterKind::Ansify,
        FilterKind::BoxBlur,
        FilterKind::GaussianBlur,
        FilterKind::Sharpen,
        FilterKind::RemoveNoise,
        FilterKind::Brightness,
        FilterKind::Saturation,
        FilterKind::Outline,
        FilterKind::DominantHue,
    ];

    /// Name used in the `filter=` query parameter.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FilterKind::Invert => "invert",
            FilterKind::Grayscale => "gray",
            FilterKind::BlackWhite => "bw",
            FilterKind::Color => "color",
            FilterKind::Red => "red",
            FilterKind::Green => "green",
            FilterKind::Blue => "blue",
            FilterKind::Cyan => "cyan",
            FilterKind::Magenta => "magenta",
            FilterKind::Yellow => "yellow",
            FilterKind::Emojify => "emoji",
            FilterKind::Asciify => "ascii",
            FilterKind::Ansify => "ansi",
            FilterKind::BoxBlur => "box",
            FilterKind::GaussianBlur => "gauss",
            FilterKind::Sharpen => "sharp",
            FilterKind::RemoveNoise => "noise",
            FilterKind::Brightness => "bright",
            FilterKind::Saturation => "sat",
            FilterKind::Outline => "outline",
            FilterKind::DominantHue => "dom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Invert => "Invert",
            FilterKind::Grayscale => "Grayscale",
            FilterKind::BlackWhite => "Black and White",
            FilterKind::Color => "Color",
            FilterKind::Red => "Red",
            FilterKind::Green => "Green",
            FilterKind::Blue => "Blue",
            FilterKind::Cyan => "Cyan",
            FilterKind::Magenta => "Magenta",
            FilterKind::Yellow => "Yellow",
            FilterKind::Emojify => "Emojify",
            FilterKind::Asciify => "Asciify",
            FilterKind::Ansify => "Ansify",
            FilterKind::BoxBlur => "Box Blur",
            FilterKind::GaussianBlur => "Gaussian Blur",
            FilterKind::Sharpen => "Sharpen",
            FilterKind::RemoveNoise => "Remove Noise",
            FilterKind::Brightness => "Brightness",
            FilterKind::Saturation => "Saturation",
            FilterKind::Outline => "Outline",
            FilterKind::DominantHue => "Dominant Hue",
        }
    }

    pub fn category(&self) -> FilterCategory {
        match self {
            FilterKind::Invert
            | FilterKind::Grayscale
            | FilterKind::BlackWhite
            | FilterKind::Color
            | FilterKind::Red
            | FilterKind::Green
            | FilterKind::Blue
            | FilterKind::Cyan
            | FilterKind::Magenta
            | FilterKind::Yellow => FilterCategory::Colors,
            FilterKind::Emojify | FilterKind::Asciify | FilterKind::Ansify => {
                FilterCategory::Funny
            }
            FilterKind::BoxBlur
            | FilterKind::GaussianBlur
            | FilterKind::Sharpen
            | FilterKind::RemoveNoise
            | FilterKind::Brightness
            | FilterKind::Saturation
            | FilterKind::Outline
            | FilterKind::DominantHue => FilterCategory::Classic,
        }
    }

    /// Whether the intensity slider means anything for this filter.
    pub fn uses_intensity(&self) -> bool {
        matches!(
            self,
            FilterKind::BoxBlur
                | FilterKind::GaussianBlur
                | FilterKind::Sharpen
                | FilterKind::Brightness
                | FilterKind::Saturation
                | FilterKind::Red
                | FilterKind::Green
                | FilterKind::Blue
                | FilterKind::Cyan
                | FilterKind::Magenta
                | FilterKind::Yellow
                | FilterKind::DominantHue
                | FilterKind::BlackWhite
        )
    }

    /// Slider range. Blurs and sharpen run 0..=100; everything else is signed.
    /// Filters without a slider are pinned to 0.
    pub fn intensity_range(&self) -> (i32, i32) {
        match self {
            FilterKind::BoxBlur | FilterKind::GaussianBlur | FilterKind::Sharpen => (0, 100),
            k if k.uses_intensity() => (-100, 100),
            _ => (0, 0),
        }
    }

    /// Only the color filter reads the color wheel.
    pub fn uses_color(&self) -> bool {
        matches!(self, FilterKind::Color)
    }

    /// Filters in menu order for one category.
    pub fn in_category(category: FilterCategory) -> impl Iterator<Item = FilterKind> {
        Self::ALL
            .into_iter()
            .filter(move |k| k.category() == category)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FilterKind {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.wire_name() == wanted)
            .ok_or_else(|| ParamError::UnknownFilter {
                name: s.to_string(),
            })
    }
}

/// A bounded slider value. Always clamped into `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intensity {
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

impl Intensity {
    pub fn new(value: i32, min: i32, max: i32) -> Result<Self, ParamError> {
        if min > max {
            return Err(ParamError::InvalidBounds { min, max });
        }
        Ok(Self { value, min, max }.clamped())
    }

    /// Slider for `kind`, starting at `value` (clamped).
    pub fn for_filter(kind: FilterKind, value: i32) -> Self {
        let (min, max) = kind.intensity_range();
        Self { value, min, max }.clamped()
    }

    pub fn clamped(mut self) -> Self {
        self.value = self.value.clamp(self.min, self.max);
        self
    }

    pub fn set(&mut self, value: i32) {
        self.value = value;
        *self = self.clamped();
    }
}

/// 24-bit RGB color sent as six hex digits without `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexColor(pub u32);

impl HexColor {
    pub const WHITE: HexColor = HexColor(0xFFFFFF);

    pub fn to_wire(&self) -> String {
        format!("{:06x}", self.0 & 0xFFFFFF)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor::WHITE
    }
}

impl FromStr for HexColor {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        let bad = || ParamError::InvalidColor {
            value: s.to_string(),
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        // #rgb shorthand expands to #rrggbb
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(bad()),
        };
        u32::from_str_radix(&expanded, 16)
            .map(HexColor)
            .map_err(|_| bad())
    }
}

/// Everything the service needs besides the image itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    pub kind: FilterKind,
    pub intensity: Intensity,
    pub color: HexColor,
}

impl FilterRequest {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            intensity: Intensity::for_filter(kind, 0),
            color: HexColor::default(),
        }
    }

    pub fn with_intensity(mut self, value: i32) -> Self {
        self.intensity = Intensity::for_filter(self.kind, value);
        self
    }

    pub fn with_color(mut self, color: HexColor) -> Self {
        self.color = color;
        self
    }

    /// Query pairs in the order the service documents them: `filter`, `int`, `c`.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("filter", self.kind.wire_name().to_string()),
            ("int", self.intensity.value.to_string()),
            ("c", self.color.to_wire()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("invalid bounds: min={min} max={max}")]
    InvalidBounds { min: i32, max: i32 },

    #[error("unknown filter: {name}")]
    UnknownFilter { name: String },

    #[error("invalid color: {value} (expected #rgb or #rrggbb)")]
    InvalidColor { value: String },

    #[error("unknown transform: {name}")]
    UnknownTransform { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_parse_back() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.wire_name().parse::<FilterKind>().unwrap(), kind);
        }
        assert_eq!("GAUSS".parse::<FilterKind>().unwrap(), FilterKind::GaussianBlur);
        assert!("sepia".parse::<FilterKind>().is_err());
    }

    #[test]
    fn test_intensity_ranges() {
        assert_eq!(FilterKind::BoxBlur.intensity_range(), (0, 100));
        assert_eq!(FilterKind::Brightness.intensity_range(), (-100, 100));
        assert_eq!(FilterKind::BlackWhite.intensity_range(), (-100, 100));
        assert_eq!(FilterKind::Invert.intensity_range(), (0, 0));
        assert!(!FilterKind::Emojify.uses_intensity());
    }

    #[test]
    fn test_intensity_is_clamped() {
        assert_eq!(Intensity::for_filter(FilterKind::GaussianBlur, -20).value, 0);
        assert_eq!(Intensity::for_filter(FilterKind::Saturation, -20).value, -20);
        assert_eq!(Intensity::for_filter(FilterKind::Saturation, 250).value, 100);
        assert_eq!(Intensity::for_filter(FilterKind::Invert, 75).value, 0);

        let mut slider = Intensity::new(0, -10, 10).unwrap();
        slider.set(11);
        assert_eq!(slider.value, 10);
        assert!(Intensity::new(0, 5, 1).is_err());
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!("#fff".parse::<HexColor>().unwrap(), HexColor::WHITE);
        assert_eq!("ff0000".parse::<HexColor>().unwrap(), HexColor(0xFF0000));
        assert_eq!(HexColor(0x00ff).to_wire(), "0000ff");
        assert!("#ff00".parse::<HexColor>().is_err());
        assert!("zzzzzz".parse::<HexColor>().is_err());
        assert!("+12345".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_query_pairs() {
        let req = FilterRequest::new(FilterKind::Color)
            .with_intensity(40)
            .with_color("#12ab34".parse().unwrap());
        let pairs = req.query_pairs();
        assert_eq!(pairs[0], ("filter", "color".to_string()));
        // color has no slider
        assert_eq!(pairs[1], ("int", "0".to_string()));
        assert_eq!(pairs[2], ("c", "12ab34".to_string()));
    }

    #[test]
    fn test_categories_cover_menu() {
        let funny: Vec<_> = FilterKind::in_category(FilterCategory::Funny).collect();
        assert_eq!(
            funny,
            vec![FilterKind::Emojify, FilterKind::Asciify, FilterKind::Ansify]
        );
        let total: usize = [
            FilterCategory::Colors,
            FilterCategory::Funny,
            FilterCategory::Classic,
        ]
        .into_iter()
        .map(|c| FilterKind::in_category(c).count())
        .sum();
        assert_eq!(total, FilterKind::ALL.len());
    }
}
