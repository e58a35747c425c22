//! Show rules: content transforms selected by a filter over resolved cells.
//!
//! - [`CellFilter`]: `key=value` conditions on position and resolved style
//! - [`CellSchema`]: the fields a filter may name
//! - [`ShowRules`]: the registry, applying rules newest first
//!
//! Show rules run strictly after style resolution. A transform sees the
//! resolved style through a [`CellView`] and returns new content; the style
//! handed to layout is never revisited.

mod filter;
mod rules;
mod schema;

pub use filter::{parse_key, CellFilter, CompiledFilter};
pub use rules::{CellView, RuleId, ShowRules, Transform};
pub use schema::{CellField, CellSchema, FieldType, Op};
