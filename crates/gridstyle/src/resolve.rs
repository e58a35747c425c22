//! Effective style resolution for a single cell.
//!
//! Per property, the value is decided in this order, later steps winning on
//! every sub-component they set:
//!
//! 1. the grid-wide default at the cell's position,
//! 2. each active rule scope's injection, oldest first,
//! 3. the cell's explicit override,
//! 4. the ambient document default, for whatever is still unset.
//!
//! Resolution is a pure function of the cell and the context as it stands at
//! the call. Two identical cells resolved on either side of a scope pop can
//! legitimately differ.

use log::trace;
use serde::Serialize;

use crate::cell::Cell;
use crate::context::{Ambient, GridStyleContext};
use crate::error::StyleResult;
use crate::style::{Property, StyleValue, Styles};
use crate::value::{Fold, Inset, Length, Paint, ResolvedAlign, Sides, Stroke};

/// The final style of one cell, as consumed by layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveStyle {
    pub align: ResolvedAlign,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub inset: Sides<Length>,
}

impl EffectiveStyle {
    /// Completes a folded record with the ambient fallback.
    pub fn complete(styles: Styles, ambient: &Ambient) -> Self {
        let align = styles.align.unwrap_or_default();
        EffectiveStyle {
            align: ResolvedAlign {
                x: align.x.unwrap_or(ambient.align.x),
                y: align.y.unwrap_or(ambient.align.y),
            },
            fill: styles.fill.or(ambient.fill),
            stroke: styles.stroke.or_else(|| ambient.stroke.clone()),
            inset: styles.inset.unwrap_or_else(Inset::unset).unwrap_or(ambient.inset),
        }
    }

    /// The resolved value of one property, or `None` for an absent fill or
    /// stroke.
    pub fn get(&self, property: Property) -> Option<StyleValue> {
        match property {
            Property::Align => Some(StyleValue::Align(self.align.into())),
            Property::Fill => self.fill.map(StyleValue::Fill),
            Property::Stroke => self.stroke.clone().map(StyleValue::Stroke),
            Property::Inset => Some(StyleValue::Inset(self.inset.map(Some))),
        }
    }
}

/// Resolves one property of a cell, without the ambient fallback.
///
/// `None` means neither the grid, a rule scope, nor the cell set it.
pub fn resolve_property<C>(
    cell: &Cell<C>,
    ctx: &GridStyleContext,
    property: Property,
) -> StyleResult<Option<StyleValue>> {
    let explicit = cell.override_value(property);
    if let Some(value) = &explicit {
        value.validate()?;
    }
    let base = ctx.resolve_default(property, cell.x(), cell.y())?;
    Ok(match (base, explicit) {
        (Some(StyleValue::Align(outer)), Some(StyleValue::Align(inner))) => {
            Some(StyleValue::Align(outer.fold(inner)))
        }
        (Some(StyleValue::Inset(outer)), Some(StyleValue::Inset(inner))) => {
            Some(StyleValue::Inset(outer.fold(inner)))
        }
        (base, None) => base,
        (_, explicit) => explicit,
    })
}

/// Resolves every property of a cell against the context.
///
/// # Errors
///
/// Fails if the cell lies outside the grid, if a position function produced
/// an invalid value, or if the cell's overrides were assembled with an
/// invalid value.
pub fn resolve_cell<C>(cell: &Cell<C>, ctx: &GridStyleContext) -> StyleResult<EffectiveStyle> {
    let (x, y) = cell.position();
    let overrides = cell.overrides();
    overrides.validate()?;

    let base = ctx.resolve_defaults(x, y)?;
    let folded = base.fold(overrides.clone());
    let effective = EffectiveStyle::complete(folded, ctx.ambient());

    trace!(
        "resolved cell ({}, {}) at scope depth {}: {:?}",
        x,
        y,
        ctx.depth(),
        effective
    );
    Ok(effective)
}
