//! Style resolution for grid and table cells.
//!
//! Every cell in a grid ends up with one value for each of four properties:
//! alignment, fill, stroke and inset. Those values come from several places
//! that are combined by folding, outer value first:
//!
//! 1. The grid-wide default for the position ([`GridDefaults`])
//! 2. The injections of every active rule scope, oldest first
//! 3. The cell's own explicit overrides ([`Cell`])
//! 4. The document-level [`Ambient`] value for anything still unset
//!
//! Show rules ([`ShowRules`]) then run over the resolved cell. They may
//! replace its content but never its style.
//!
//! # Folding
//!
//! An unset value is the identity. Alignment folds per axis and inset folds
//! per side, so a partial override only touches what it names:
//!
//! ```rust
//! use gridstyle::{Align, Fold};
//!
//! let outer = Align::LEFT + Align::BOTTOM;
//! assert_eq!(outer.fold(Align::RIGHT), Align::RIGHT + Align::BOTTOM);
//! ```
//!
//! # Modules
//!
//! - [`value`]: the property values and the [`Fold`] trait
//! - [`show`]: filters and show-rule dispatch
//!
//! # Example
//!
//! ```rust
//! use gridstyle::{resolve_cell, Cell, Celled, GridDefaults, GridStyleContext, Paint};
//!
//! let defaults = GridDefaults::new().fill(Celled::func(|x, y| {
//!     Some(if (x + y) % 2 == 0 { Paint::AQUA } else { Paint::WHITE })
//! }));
//! let ctx = GridStyleContext::with_defaults(2, 2, defaults).unwrap();
//!
//! let plain = Cell::new(1, 1, "b");
//! assert_eq!(resolve_cell(&plain, &ctx).unwrap().fill, Some(Paint::AQUA));
//!
//! let red = Cell::new(0, 1, "c").with_fill(Paint::RED);
//! assert_eq!(resolve_cell(&red, &ctx).unwrap().fill, Some(Paint::RED));
//! ```

mod cell;
mod config;
mod context;
mod error;
mod grid;
mod resolve;
pub mod show;
mod style;
pub mod value;

pub use cell::Cell;
pub use config::{AmbientConfig, ConfigError, GridStyleConfig, InsetSides, InsetSpec, OneOrMany};
pub use context::{Ambient, CellFn, Celled, GridDefaults, GridStyleContext, ScopeHandle};
pub use error::{StyleError, StyleResult};
pub use grid::{resolve_grid, GridPass, ResolvedCell, ResolvedGrid};
pub use resolve::{resolve_cell, resolve_property, EffectiveStyle};
pub use show::{CellFilter, CellView, RuleId, ShowRules};
pub use style::{Property, PropertyValue, StyleValue, Styles};
pub use value::{fold_all, Align, Fold, HAlign, Inset, Length, Paint, ResolvedAlign, Sides, Stroke, VAlign};
