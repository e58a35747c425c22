//! Typed style values and how they fold.
//!
//! - [`Align`]: two-axis alignment, each axis optional
//! - [`Paint`] and [`Stroke`]: fill and border values, folded whole
//! - [`Inset`]: per-side lengths, folded side by side
//! - [`Fold`]: the outer/inner combination shared by all of them

mod align;
mod fold;
mod length;
mod paint;
mod sides;

pub use align::{Align, HAlign, ResolvedAlign, VAlign};
pub use fold::{fold_all, Fold};
pub use length::Length;
pub use paint::{Paint, Stroke};
pub use sides::{Inset, Sides};
