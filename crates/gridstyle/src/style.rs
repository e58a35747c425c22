//! The closed set of cell style properties.
//!
//! A [`Styles`] record carries one optional value per [`Property`]. The same
//! record serves as a cell's explicit overrides and as a set-rule injection.
//! Values are validated when they are set, so anything stored in a record is
//! already inside its property's domain.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{StyleError, StyleResult};
use crate::value::{Align, Fold, Inset, Paint, Stroke};

/// A styleable cell property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Align,
    Fill,
    Stroke,
    Inset,
}

impl Property {
    pub const ALL: [Property; 4] = [
        Property::Align,
        Property::Fill,
        Property::Stroke,
        Property::Inset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::Align => "align",
            Property::Fill => "fill",
            Property::Stroke => "stroke",
            Property::Inset => "inset",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|property| property.name() == s)
            .ok_or_else(|| StyleError::UnknownField {
                field: s.to_string(),
                available: Property::ALL.iter().map(|p| p.name().to_string()).collect(),
            })
    }
}

/// A value of one property, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleValue {
    Align(Align),
    Fill(Paint),
    Stroke(Stroke),
    Inset(Inset),
}

impl StyleValue {
    pub fn property(&self) -> Property {
        match self {
            StyleValue::Align(_) => Property::Align,
            StyleValue::Fill(_) => Property::Fill,
            StyleValue::Stroke(_) => Property::Stroke,
            StyleValue::Inset(_) => Property::Inset,
        }
    }

    /// Checks the value lies inside its property's domain.
    pub fn validate(&self) -> StyleResult<()> {
        match self {
            StyleValue::Align(_) | StyleValue::Fill(_) => Ok(()),
            StyleValue::Stroke(stroke) => stroke.validate(),
            StyleValue::Inset(inset) => inset.validate(),
        }
    }

    /// Parses a value of the given property from document notation.
    pub fn parse(property: Property, text: &str) -> StyleResult<Self> {
        let value = match property {
            Property::Align => StyleValue::Align(text.parse()?),
            Property::Fill => StyleValue::Fill(text.parse()?),
            Property::Stroke => StyleValue::Stroke(text.parse()?),
            Property::Inset => StyleValue::Inset(Inset::all(text.parse()?)),
        };
        value.validate()?;
        Ok(value)
    }
}

/// A typed property value: one of [`Align`], [`Paint`], [`Stroke`] or [`Inset`].
pub trait PropertyValue: Fold + Clone {
    /// The property values of this type belong to.
    const PROPERTY: Property;

    /// Checks the value lies inside the property's domain.
    fn validate(&self) -> StyleResult<()>;

    fn into_style(self) -> StyleValue;

    /// Reads this property out of a record.
    fn pick(styles: &Styles) -> Option<Self>;
}

impl PropertyValue for Align {
    const PROPERTY: Property = Property::Align;

    fn validate(&self) -> StyleResult<()> {
        Ok(())
    }

    fn into_style(self) -> StyleValue {
        StyleValue::Align(self)
    }

    fn pick(styles: &Styles) -> Option<Self> {
        styles.align
    }
}

impl PropertyValue for Paint {
    const PROPERTY: Property = Property::Fill;

    fn validate(&self) -> StyleResult<()> {
        Ok(())
    }

    fn into_style(self) -> StyleValue {
        StyleValue::Fill(self)
    }

    fn pick(styles: &Styles) -> Option<Self> {
        styles.fill
    }
}

impl PropertyValue for Stroke {
    const PROPERTY: Property = Property::Stroke;

    fn validate(&self) -> StyleResult<()> {
        Stroke::validate(self)
    }

    fn into_style(self) -> StyleValue {
        StyleValue::Stroke(self)
    }

    fn pick(styles: &Styles) -> Option<Self> {
        styles.stroke.clone()
    }
}

impl PropertyValue for Inset {
    const PROPERTY: Property = Property::Inset;

    fn validate(&self) -> StyleResult<()> {
        Inset::validate(self)
    }

    fn into_style(self) -> StyleValue {
        StyleValue::Inset(self)
    }

    fn pick(styles: &Styles) -> Option<Self> {
        styles.inset
    }
}

/// One optional value per property.
///
/// ```rust
/// use gridstyle::{Align, Length, Paint, Styles};
///
/// let styles = Styles::new()
///     .align(Align::RIGHT)
///     .fill(Paint::AQUA)
///     .inset(Length::pt(20.0))
///     .unwrap();
/// assert!(styles.stroke.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Styles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inset: Option<Inset>,
}

impl Styles {
    /// A record with every property unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn fill(mut self, fill: Paint) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Sets the stroke.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidValue`] for a negative thickness or a
    /// degenerate dash pattern.
    pub fn stroke(mut self, stroke: Stroke) -> StyleResult<Self> {
        stroke.validate()?;
        self.stroke = Some(stroke);
        Ok(self)
    }

    /// Sets the inset. A bare [`Length`](crate::Length) sets all four sides.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidValue`] if any set side is negative.
    pub fn inset(mut self, inset: impl Into<Inset>) -> StyleResult<Self> {
        let inset = inset.into();
        inset.validate()?;
        self.inset = Some(inset);
        Ok(self)
    }

    /// Sets a property from a tagged value.
    pub fn set(&mut self, value: StyleValue) -> StyleResult<()> {
        value.validate()?;
        match value {
            StyleValue::Align(align) => self.align = Some(align),
            StyleValue::Fill(fill) => self.fill = Some(fill),
            StyleValue::Stroke(stroke) => self.stroke = Some(stroke),
            StyleValue::Inset(inset) => self.inset = Some(inset),
        }
        Ok(())
    }

    /// Checks every set value. Records built through the setters always pass;
    /// this guards records assembled field by field.
    pub fn validate(&self) -> StyleResult<()> {
        for property in self.properties() {
            if let Some(value) = self.get(property) {
                value.validate()?;
            }
        }
        Ok(())
    }

    pub fn get(&self, property: Property) -> Option<StyleValue> {
        match property {
            Property::Align => self.align.map(StyleValue::Align),
            Property::Fill => self.fill.map(StyleValue::Fill),
            Property::Stroke => self.stroke.clone().map(StyleValue::Stroke),
            Property::Inset => self.inset.map(StyleValue::Inset),
        }
    }

    pub fn unset(&mut self, property: Property) {
        match property {
            Property::Align => self.align = None,
            Property::Fill => self.fill = None,
            Property::Stroke => self.stroke = None,
            Property::Inset => self.inset = None,
        }
    }

    pub fn is_empty(&self) -> bool {
        Property::ALL.iter().all(|p| !self.is_set(*p))
    }

    pub fn is_set(&self, property: Property) -> bool {
        match property {
            Property::Align => self.align.is_some(),
            Property::Fill => self.fill.is_some(),
            Property::Stroke => self.stroke.is_some(),
            Property::Inset => self.inset.is_some(),
        }
    }

    /// The properties this record sets, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        Property::ALL.into_iter().filter(|p| self.is_set(*p))
    }
}

impl Fold for Styles {
    fn fold(self, inner: Self) -> Self {
        Styles {
            align: self.align.fold(inner.align),
            fill: self.fill.fold(inner.fill),
            stroke: self.stroke.fold(inner.stroke),
            inset: self.inset.fold(inner.inset),
        }
    }
}
