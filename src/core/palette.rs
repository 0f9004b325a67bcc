use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(ChartError::InvalidData(format!(
                "color `{input}` must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |offset: usize| -> ChartResult<f64> {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|e| ChartError::InvalidData(format!("invalid color `{input}`: {e}")))
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let to_byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let rgb = format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue)
        );
        if self.alpha >= 1.0 {
            rgb
        } else {
            format!("{rgb}{:02x}", to_byte(self.alpha))
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

const PIE_PALETTE_HEX: [&str; 7] = [
    "#ffcd56", "#ff6384", "#36a2eb", "#fd6b19", "#83f750", "#7a4b8c", "#e94e77",
];

const ARC_PALETTE_HEX: [&str; 7] = [
    "#98abc5", "#8a89a6", "#7b6888", "#6b486b", "#a05d56", "#d0743c", "#ff8c00",
];

/// Fixed ordered list of colors, assigned cyclically.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> ChartResult<Self> {
        if colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        Ok(Self { colors })
    }

    pub fn from_hex_list<S: AsRef<str>>(hex: &[S]) -> ChartResult<Self> {
        let colors = hex
            .iter()
            .map(|value| Color::from_hex(value.as_ref()))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Palette used for the pie chart slices.
    #[must_use]
    pub fn default_pie() -> Self {
        Self::from_constants(&PIE_PALETTE_HEX)
    }

    /// Palette used for the donut arc chart.
    #[must_use]
    pub fn default_arc() -> Self {
        Self::from_constants(&ARC_PALETTE_HEX)
    }

    fn from_constants(hex: &[&str]) -> Self {
        let colors = hex
            .iter()
            .filter_map(|value| Color::from_hex(value).ok())
            .collect();
        Self { colors }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color for a positional index, wrapping around the palette.
    #[must_use]
    pub fn color_for_index(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    #[must_use]
    pub fn ordinal_scale(&self) -> OrdinalColorScale {
        OrdinalColorScale::new(self.clone())
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let colors = Vec::<Color>::deserialize(deserializer)?;
        Self::new(colors).map_err(serde::de::Error::custom)
    }
}

/// Color scale keyed on a category title.
///
/// Titles receive palette colors in order of first appearance. The scale is
/// meant to live for one render pass; the same title always maps to the same
/// color within that pass.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    palette: Palette,
    domain: IndexMap<String, usize>,
}

impl OrdinalColorScale {
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            domain: IndexMap::new(),
        }
    }

    pub fn color_for(&mut self, key: &str) -> Color {
        let next = self.domain.len();
        let ordinal = *self.domain.entry(key.to_owned()).or_insert(next);
        self.palette.color_for_index(ordinal)
    }

    /// Keys seen so far, in assignment order.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.keys().map(String::as_str)
    }
}
