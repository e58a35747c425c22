//! Absolute lengths.

use std::fmt;
use std::str::FromStr;

use cssparser::{Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};

use crate::error::{StyleError, StyleResult};

const PT_PER_MM: f64 = 72.0 / 25.4;
const PT_PER_CM: f64 = 72.0 / 2.54;
const PT_PER_IN: f64 = 72.0;

/// An absolute length, stored in typographic points.
///
/// Parses from the document notation: `20pt`, `5mm`, `1.5cm`, `1in`, or a
/// bare `0`.
///
/// ```rust
/// use gridstyle::Length;
///
/// let inset: Length = "1in".parse().unwrap();
/// assert_eq!(inset, Length::pt(72.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "String")]
pub struct Length(f64);

impl Length {
    /// The zero length.
    pub const fn zero() -> Self {
        Length(0.0)
    }

    pub const fn pt(points: f64) -> Self {
        Length(points)
    }

    pub fn mm(mm: f64) -> Self {
        Length(mm * PT_PER_MM)
    }

    pub fn cm(cm: f64) -> Self {
        Length(cm * PT_PER_CM)
    }

    pub fn inches(inches: f64) -> Self {
        Length(inches * PT_PER_IN)
    }

    /// The length in points.
    pub fn to_pt(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Checks that the length is finite and not negative.
    ///
    /// `property` names the property in the error.
    pub fn non_negative(self, property: &str) -> StyleResult<Self> {
        if !self.0.is_finite() {
            return Err(StyleError::invalid(property, self, "must be finite"));
        }
        if self.0 < 0.0 {
            return Err(StyleError::invalid(property, self, "must not be negative"));
        }
        Ok(self)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

impl From<Length> for String {
    fn from(length: Length) -> Self {
        length.to_string()
    }
}

impl FromStr for Length {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| StyleError::invalid("length", s, reason);

        let mut input = ParserInput::new(s);
        let mut parser = Parser::new(&mut input);
        let start = parser.position();
        let token = parser
            .next()
            .map_err(|_| invalid("expected a length such as 5pt"))?
            .clone();
        // The token carries an f32; the source text keeps full precision.
        let text = parser.slice_from(start).trim();
        parser
            .expect_exhausted()
            .map_err(|_| invalid("unexpected trailing input"))?;

        match token {
            Token::Dimension { unit, .. } => {
                let value = text
                    .get(..text.len().saturating_sub(unit.len()))
                    .and_then(|number| number.parse::<f64>().ok())
                    .ok_or_else(|| invalid("expected a number before the unit"))?;
                match unit.to_ascii_lowercase().as_str() {
                    "pt" => Ok(Length::pt(value)),
                    "mm" => Ok(Length::mm(value)),
                    "cm" => Ok(Length::cm(value)),
                    "in" => Ok(Length::inches(value)),
                    _ => Err(invalid("unknown unit, expected pt, mm, cm or in")),
                }
            }
            Token::Number { value, .. } if value == 0.0 => Ok(Length::zero()),
            Token::Number { .. } => Err(invalid("missing unit")),
            _ => Err(invalid("expected a length such as 5pt")),
        }
    }
}

impl TryFrom<String> for Length {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Accepts lengths written as strings or as plain point numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Points(f64),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = StyleError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Points(points) => Ok(Length::pt(points)),
            LengthRepr::Text(text) => text.parse(),
        }
    }
}
