//! Cell descriptors.

use crate::error::StyleResult;
use crate::style::{Property, StyleValue, Styles};
use crate::value::{Align, Inset, Paint, Stroke};

/// A placed cell: its position, its content and its explicit overrides.
///
/// Positions are zero-based and come from the grid placement algorithm.
/// The content is opaque to this crate; it is handed to show rules and back
/// to layout untouched otherwise.
///
/// A cell literal carries no overrides. Overrides come from the explicit
/// constructor methods and are validated as they are set:
///
/// ```rust
/// use gridstyle::{Align, Cell, Length};
///
/// let literal = Cell::new(0, 0, "A");
/// assert!(literal.overrides().is_empty());
///
/// let explicit = Cell::new(1, 0, "B")
///     .with_align(Align::RIGHT)
///     .with_inset(Length::pt(4.0))
///     .unwrap();
/// assert_eq!(explicit.overrides().align, Some(Align::RIGHT));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<C> {
    x: usize,
    y: usize,
    content: C,
    overrides: Styles,
}

impl<C> Cell<C> {
    /// A cell literal at column `x`, row `y`.
    pub fn new(x: usize, y: usize, content: C) -> Self {
        Cell {
            x,
            y,
            content,
            overrides: Styles::new(),
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.overrides = self.overrides.align(align);
        self
    }

    pub fn with_fill(mut self, fill: Paint) -> Self {
        self.overrides = self.overrides.fill(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> StyleResult<Self> {
        self.overrides = self.overrides.stroke(stroke)?;
        Ok(self)
    }

    pub fn with_inset(mut self, inset: impl Into<Inset>) -> StyleResult<Self> {
        self.overrides = self.overrides.inset(inset)?;
        Ok(self)
    }

    /// Replaces every override at once.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidValue`](crate::StyleError::InvalidValue)
    /// if the record holds a value outside its property's domain. The cell is
    /// not built in that case.
    pub fn with_overrides(mut self, overrides: Styles) -> StyleResult<Self> {
        overrides.validate()?;
        self.overrides = overrides;
        Ok(self)
    }

    /// Column index.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row index.
    pub fn y(&self) -> usize {
        self.y
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn into_content(self) -> C {
        self.content
    }

    pub fn overrides(&self) -> &Styles {
        &self.overrides
    }

    /// The explicit override for one property, if any.
    pub fn override_value(&self, property: Property) -> Option<StyleValue> {
        self.overrides.get(property)
    }
}
