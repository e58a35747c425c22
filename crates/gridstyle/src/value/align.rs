//! Two-axis alignment with independently optional axes.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Start,
    Left,
    Center,
    Right,
    End,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Horizon,
    Bottom,
}

impl HAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            HAlign::Start => "start",
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
            HAlign::End => "end",
        }
    }
}

impl VAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Horizon => "horizon",
            VAlign::Bottom => "bottom",
        }
    }
}

/// An alignment where each axis may be left to the outer context.
///
/// A `None` axis means "auto": whatever the enclosing scope says. Axes are
/// combined with `+`:
///
/// ```rust
/// use gridstyle::{Align, HAlign, VAlign};
///
/// let align = Align::RIGHT + Align::BOTTOM;
/// assert_eq!(align.x, Some(HAlign::Right));
/// assert_eq!(align.y, Some(VAlign::Bottom));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Align {
    pub x: Option<HAlign>,
    pub y: Option<VAlign>,
}

impl Align {
    pub const AUTO: Align = Align { x: None, y: None };
    pub const START: Align = Align::h(HAlign::Start);
    pub const LEFT: Align = Align::h(HAlign::Left);
    pub const CENTER: Align = Align::h(HAlign::Center);
    pub const RIGHT: Align = Align::h(HAlign::Right);
    pub const END: Align = Align::h(HAlign::End);
    pub const TOP: Align = Align::v(VAlign::Top);
    pub const HORIZON: Align = Align::v(VAlign::Horizon);
    pub const BOTTOM: Align = Align::v(VAlign::Bottom);

    pub const fn new(x: HAlign, y: VAlign) -> Self {
        Align {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Horizontal only; the vertical axis stays auto.
    pub const fn h(x: HAlign) -> Self {
        Align { x: Some(x), y: None }
    }

    /// Vertical only; the horizontal axis stays auto.
    pub const fn v(y: VAlign) -> Self {
        Align { x: None, y: Some(y) }
    }

    pub fn is_auto(self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Combines two single-axis alignments. The right operand wins on an axis
/// both sides set.
impl Add for Align {
    type Output = Align;

    fn add(self, rhs: Align) -> Align {
        Align {
            x: rhs.x.or(self.x),
            y: rhs.y.or(self.y),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.x, self.y) {
            (Some(x), Some(y)) => write!(f, "{} + {}", x.as_str(), y.as_str()),
            (Some(x), None) => f.write_str(x.as_str()),
            (None, Some(y)) => f.write_str(y.as_str()),
            (None, None) => f.write_str("auto"),
        }
    }
}

impl From<Align> for String {
    fn from(align: Align) -> Self {
        align.to_string()
    }
}

/// Parses `left`, `bottom`, `right + top` or `auto`.
impl FromStr for Align {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut align = Align::AUTO;

        for part in s.split('+').map(str::trim) {
            let component = match part.to_ascii_lowercase().as_str() {
                "auto" => Align::AUTO,
                "start" => Align::START,
                "left" => Align::LEFT,
                "center" => Align::CENTER,
                "right" => Align::RIGHT,
                "end" => Align::END,
                "top" => Align::TOP,
                "horizon" => Align::HORIZON,
                "bottom" => Align::BOTTOM,
                _ => {
                    return Err(StyleError::invalid(
                        "align",
                        s,
                        format!("unknown alignment '{}'", part),
                    ))
                }
            };

            if (component.x.is_some() && align.x.is_some())
                || (component.y.is_some() && align.y.is_some())
            {
                return Err(StyleError::invalid(
                    "align",
                    s,
                    "cannot combine two alignments on the same axis",
                ));
            }
            align = align + component;
        }

        Ok(align)
    }
}

impl TryFrom<String> for Align {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An alignment with both axes decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedAlign {
    pub x: HAlign,
    pub y: VAlign,
}

impl Default for ResolvedAlign {
    fn default() -> Self {
        ResolvedAlign {
            x: HAlign::Start,
            y: VAlign::Top,
        }
    }
}

impl From<ResolvedAlign> for Align {
    fn from(align: ResolvedAlign) -> Self {
        Align::new(align.x, align.y)
    }
}
