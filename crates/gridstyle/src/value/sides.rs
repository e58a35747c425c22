//! Per-side values for insets.

use serde::{Deserialize, Serialize};

use super::length::Length;
use crate::error::StyleResult;

/// A value for each of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sides<T> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

impl<T> Sides<T> {
    pub const fn new(left: T, top: T, right: T, bottom: T) -> Self {
        Sides {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same value on every side.
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Sides {
            left: value.clone(),
            top: value.clone(),
            right: value.clone(),
            bottom: value,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Sides<U> {
        Sides {
            left: f(self.left),
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
        }
    }

    /// Combines two sides pairwise.
    pub fn zip<U, V, F: FnMut(T, U) -> V>(self, other: Sides<U>, mut f: F) -> Sides<V> {
        Sides {
            left: f(self.left, other.left),
            top: f(self.top, other.top),
            right: f(self.right, other.right),
            bottom: f(self.bottom, other.bottom),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.left, &self.top, &self.right, &self.bottom].into_iter()
    }
}

impl<T> Sides<Option<T>> {
    /// Every side unset.
    pub const fn unset() -> Self {
        Sides::new(None, None, None, None)
    }

    pub fn is_unset(&self) -> bool {
        self.iter().all(Option::is_none)
    }

    pub fn is_complete(&self) -> bool {
        self.iter().all(Option::is_some)
    }

    /// Fills unset sides from `fallback`.
    pub fn unwrap_or(self, fallback: Sides<T>) -> Sides<T> {
        self.zip(fallback, |side, fallback| side.unwrap_or(fallback))
    }

    pub fn with_left(mut self, value: T) -> Self {
        self.left = Some(value);
        self
    }

    pub fn with_top(mut self, value: T) -> Self {
        self.top = Some(value);
        self
    }

    pub fn with_right(mut self, value: T) -> Self {
        self.right = Some(value);
        self
    }

    pub fn with_bottom(mut self, value: T) -> Self {
        self.bottom = Some(value);
        self
    }

    /// Sets left and right.
    pub fn with_x(self, value: T) -> Self
    where
        T: Clone,
    {
        self.with_left(value.clone()).with_right(value)
    }

    /// Sets top and bottom.
    pub fn with_y(self, value: T) -> Self
    where
        T: Clone,
    {
        self.with_top(value.clone()).with_bottom(value)
    }
}

/// An inset override: each side independently set or left to the outer scope.
pub type Inset = Sides<Option<Length>>;

impl Inset {
    /// A bare inset that sets all four sides.
    pub fn all(length: Length) -> Self {
        Sides::splat(Some(length))
    }

    /// Checks every set side is finite and non-negative.
    pub fn validate(&self) -> StyleResult<()> {
        for side in self.iter().flatten() {
            side.non_negative("inset")?;
        }
        Ok(())
    }
}

impl From<Length> for Inset {
    fn from(length: Length) -> Self {
        Inset::all(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splat_sets_every_side() {
        let sides = Sides::splat(3);
        assert_eq!(sides, Sides::new(3, 3, 3, 3));
    }

    #[test]
    fn test_builders_touch_only_named_sides() {
        let inset = Inset::unset()
            .with_x(Length::pt(2.0))
            .with_bottom(Length::pt(4.0));
        assert_eq!(inset.left, Some(Length::pt(2.0)));
        assert_eq!(inset.right, Some(Length::pt(2.0)));
        assert_eq!(inset.top, None);
        assert_eq!(inset.bottom, Some(Length::pt(4.0)));
    }

    #[test]
    fn test_unwrap_or_fills_gaps() {
        let inset = Inset::unset().with_top(Length::pt(1.0));
        let resolved = inset.unwrap_or(Sides::splat(Length::zero()));
        assert_eq!(resolved.top, Length::pt(1.0));
        assert_eq!(resolved.left, Length::zero());
    }

    #[test]
    fn test_unset_and_complete() {
        assert!(Inset::unset().is_unset());
        assert!(!Inset::unset().is_complete());
        assert!(Inset::all(Length::pt(1.0)).is_complete());
    }

    #[test]
    fn test_validate_rejects_negative_side() {
        let inset = Inset::unset().with_left(Length::pt(-1.0));
        assert!(inset.validate().is_err());
        assert!(Inset::all(Length::pt(5.0)).validate().is_ok());
    }
}
