//! Paints and strokes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::length::Length;
use crate::error::{StyleError, StyleResult};

/// A solid RGBA paint.
///
/// Parses from any CSS color notation (`aqua`, `#ff0000`, `rgb(0 0 255)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Paint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Paint {
    pub const BLACK: Paint = Paint::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Paint = Paint::rgb(0xff, 0xff, 0xff);
    pub const RED: Paint = Paint::rgb(0xff, 0x00, 0x00);
    pub const GREEN: Paint = Paint::rgb(0x00, 0x80, 0x00);
    pub const BLUE: Paint = Paint::rgb(0x00, 0x00, 0xff);
    pub const AQUA: Paint = Paint::rgb(0x00, 0xff, 0xff);
    pub const ORANGE: Paint = Paint::rgb(0xff, 0xa5, 0x00);
    pub const YELLOW: Paint = Paint::rgb(0xff, 0xff, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Paint { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Paint { r, g, b, a }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 0xff
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl From<Paint> for String {
    fn from(paint: Paint) -> Self {
        paint.to_string()
    }
}

impl FromStr for Paint {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = csscolorparser::parse(s.trim())
            .map_err(|e| StyleError::invalid("paint", s, e.to_string()))?;
        let [r, g, b, a] = color.to_rgba8();
        Ok(Paint { r, g, b, a })
    }
}

impl TryFrom<String> for Paint {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A cell border stroke.
///
/// Strokes fold as a whole: an inner stroke replaces the outer one entirely,
/// it never borrows the outer thickness or paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Stroke {
    pub paint: Paint,
    pub thickness: Length,
    /// Alternating on/off segment lengths. `None` draws a solid line.
    pub dash: Option<Vec<Length>>,
}

impl Stroke {
    /// A solid stroke.
    pub fn new(paint: Paint, thickness: Length) -> Self {
        Stroke {
            paint,
            thickness,
            dash: None,
        }
    }

    pub fn dashed(mut self, segments: Vec<Length>) -> Self {
        self.dash = Some(segments);
        self
    }

    /// Checks thickness and dash segments.
    pub fn validate(&self) -> StyleResult<()> {
        self.thickness.non_negative("stroke thickness")?;
        if let Some(dash) = &self.dash {
            if dash.is_empty() {
                return Err(StyleError::invalid(
                    "stroke dash",
                    "()",
                    "dash pattern needs at least one segment",
                ));
            }
            for segment in dash {
                segment.non_negative("stroke dash")?;
            }
            if dash.iter().all(|segment| segment.is_zero()) {
                return Err(StyleError::invalid(
                    "stroke dash",
                    Length::zero(),
                    "dash pattern must have a positive segment",
                ));
            }
        }
        Ok(())
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke::new(Paint::BLACK, Length::pt(1.0))
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.thickness, self.paint)?;
        if let Some(dash) = &self.dash {
            let segments: Vec<String> = dash.iter().map(|s| s.to_string()).collect();
            write!(f, " + dash({})", segments.join(" "))?;
        }
        Ok(())
    }
}

impl From<Stroke> for String {
    fn from(stroke: Stroke) -> Self {
        stroke.to_string()
    }
}

/// Parses `2pt + red`, `red`, `1pt`, optionally with `dash(2pt 1pt)`.
///
/// Missing parts take the default stroke's thickness or paint.
impl FromStr for Stroke {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut stroke = Stroke::default();
        let mut seen_thickness = false;
        let mut seen_paint = false;

        for part in s.split('+').map(str::trim) {
            if part.is_empty() {
                return Err(StyleError::invalid("stroke", s, "empty stroke component"));
            }

            if let Some(inner) = part
                .strip_prefix("dash(")
                .and_then(|rest| rest.strip_suffix(')'))
            {
                let segments = inner
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<StyleResult<Vec<Length>>>()?;
                stroke.dash = Some(segments);
            } else if let Ok(thickness) = part.parse::<Length>() {
                if seen_thickness {
                    return Err(StyleError::invalid("stroke", s, "thickness given twice"));
                }
                stroke.thickness = thickness;
                seen_thickness = true;
            } else {
                if seen_paint {
                    return Err(StyleError::invalid("stroke", s, "paint given twice"));
                }
                stroke.paint = part.parse()?;
                seen_paint = true;
            }
        }

        Ok(stroke)
    }
}

impl TryFrom<String> for Stroke {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_paint() {
        let paint: Paint = "aqua".parse().unwrap();
        assert_eq!(paint, Paint::AQUA);
    }

    #[test]
    fn test_parse_hex_paint_with_alpha() {
        let paint: Paint = "#ff000080".parse().unwrap();
        assert_eq!(paint, Paint::rgba(0xff, 0x00, 0x00, 0x80));
        assert_eq!(paint.to_string(), "#ff000080");
    }

    #[test]
    fn test_parse_invalid_paint() {
        let err = "not-a-color".parse::<Paint>().unwrap_err();
        assert!(matches!(err, StyleError::InvalidValue { .. }));
    }

    #[test]
    fn test_paint_display_opaque() {
        assert_eq!(Paint::rgb(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn test_parse_full_stroke() {
        let stroke: Stroke = "2pt + red".parse().unwrap();
        assert_eq!(stroke.thickness, Length::pt(2.0));
        assert_eq!(stroke.paint, Paint::RED);
        assert_eq!(stroke.dash, None);
    }

    #[test]
    fn test_parse_partial_strokes_use_defaults() {
        let paint_only: Stroke = "blue".parse().unwrap();
        assert_eq!(paint_only.thickness, Length::pt(1.0));

        let thickness_only: Stroke = "3pt".parse().unwrap();
        assert_eq!(thickness_only.paint, Paint::BLACK);
    }

    #[test]
    fn test_parse_dashed_stroke() {
        let stroke: Stroke = "1pt + black + dash(2pt 1pt)".parse().unwrap();
        assert_eq!(stroke.dash, Some(vec![Length::pt(2.0), Length::pt(1.0)]));
    }

    #[test]
    fn test_parse_stroke_rejects_duplicates() {
        assert!("1pt + 2pt".parse::<Stroke>().is_err());
        assert!("red + blue".parse::<Stroke>().is_err());
        assert!("1pt + ".parse::<Stroke>().is_err());
    }

    #[test]
    fn test_validate_negative_thickness() {
        let stroke = Stroke::new(Paint::BLACK, Length::pt(-1.0));
        assert!(stroke.validate().is_err());
    }

    #[test]
    fn test_validate_dash_pattern() {
        let ok = Stroke::default().dashed(vec![Length::pt(2.0), Length::zero()]);
        assert!(ok.validate().is_ok());

        let all_zero = Stroke::default().dashed(vec![Length::zero()]);
        assert!(all_zero.validate().is_err());

        let empty = Stroke::default().dashed(vec![]);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_stroke_display_round_trips() {
        let stroke = Stroke::new(Paint::rgb(0, 0, 0xff), Length::pt(0.5))
            .dashed(vec![Length::pt(3.0), Length::pt(1.0)]);
        let reparsed: Stroke = stroke.to_string().parse().unwrap();
        assert_eq!(reparsed, stroke);
    }
}
