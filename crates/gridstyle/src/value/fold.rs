//! Combining an outer and an inner style value.

use super::align::Align;
use super::length::Length;
use super::paint::{Paint, Stroke};
use super::sides::Sides;

/// Combines a less specific (outer) value with a more specific (inner) one.
///
/// For every sub-component, the inner value wins when it is set; otherwise
/// the outer value shows through. Implementations must be associative so a
/// chain of nested scopes folds to the same result whichever way it is
/// grouped.
pub trait Fold: Sized {
    /// Folds `inner` over `self`.
    fn fold(self, inner: Self) -> Self;
}

/// `None` is the unset value and the identity of every fold.
impl<T: Fold> Fold for Option<T> {
    fn fold(self, inner: Self) -> Self {
        match (self, inner) {
            (Some(outer), Some(inner)) => Some(outer.fold(inner)),
            (outer, None) => outer,
            (None, inner) => inner,
        }
    }
}

/// Each axis is decided on its own.
impl Fold for Align {
    fn fold(self, inner: Self) -> Self {
        Align {
            x: inner.x.or(self.x),
            y: inner.y.or(self.y),
        }
    }
}

impl Fold for Paint {
    fn fold(self, inner: Self) -> Self {
        inner
    }
}

impl Fold for Stroke {
    fn fold(self, inner: Self) -> Self {
        inner
    }
}

impl Fold for Length {
    fn fold(self, inner: Self) -> Self {
        inner
    }
}

/// Side by side.
impl<T: Fold> Fold for Sides<T> {
    fn fold(self, inner: Self) -> Self {
        self.zip(inner, Fold::fold)
    }
}

/// Folds a sequence of values from outermost to innermost.
pub fn fold_all<T: Fold, I: IntoIterator<Item = Option<T>>>(values: I) -> Option<T> {
    values.into_iter().fold(None, Fold::fold)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::value::{HAlign, Inset, VAlign};
    use proptest::prelude::*;

    fn halign() -> impl Strategy<Value = Option<HAlign>> {
        prop::option::of(prop_oneof![
            Just(HAlign::Start),
            Just(HAlign::Left),
            Just(HAlign::Center),
            Just(HAlign::Right),
            Just(HAlign::End),
        ])
    }

    fn valign() -> impl Strategy<Value = Option<VAlign>> {
        prop::option::of(prop_oneof![
            Just(VAlign::Top),
            Just(VAlign::Horizon),
            Just(VAlign::Bottom),
        ])
    }

    fn align() -> impl Strategy<Value = Align> {
        (halign(), valign()).prop_map(|(x, y)| Align { x, y })
    }

    fn side() -> impl Strategy<Value = Option<Length>> {
        prop::option::of((0u32..100).prop_map(|pt| Length::pt(f64::from(pt))))
    }

    fn inset() -> impl Strategy<Value = Inset> {
        (side(), side(), side(), side()).prop_map(|(l, t, r, b)| Sides::new(l, t, r, b))
    }

    proptest! {
        #[test]
        fn unset_is_identity_for_align(a in prop::option::of(align())) {
            prop_assert_eq!(None.fold(a), a);
            prop_assert_eq!(a.fold(None), a);
        }

        #[test]
        fn unset_is_identity_for_inset(i in prop::option::of(inset())) {
            prop_assert_eq!(None.fold(i), i);
            prop_assert_eq!(i.fold(None), i);
        }

        #[test]
        fn complete_inner_wins(outer in align(), x in halign(), y in valign()) {
            if let (Some(x), Some(y)) = (x, y) {
                let inner = Align::new(x, y);
                prop_assert_eq!(outer.fold(inner), inner);
            }
        }

        #[test]
        fn align_fold_is_associative(a in align(), b in align(), c in align()) {
            prop_assert_eq!(a.fold(b).fold(c), a.fold(b.fold(c)));
        }

        #[test]
        fn inset_fold_is_associative(a in inset(), b in inset(), c in inset()) {
            prop_assert_eq!(a.fold(b).fold(c), a.fold(b.fold(c)));
        }

        #[test]
        fn overriding_one_axis_keeps_the_other(outer in align(), x in halign()) {
            let folded = outer.fold(Align { x, y: None });
            prop_assert_eq!(folded.y, outer.y);
        }

        #[test]
        fn unset_sides_show_outer(outer in inset(), inner in inset()) {
            let folded = outer.fold(inner);
            prop_assert_eq!(folded.left, inner.left.or(outer.left));
            prop_assert_eq!(folded.top, inner.top.or(outer.top));
            prop_assert_eq!(folded.right, inner.right.or(outer.right));
            prop_assert_eq!(folded.bottom, inner.bottom.or(outer.bottom));
        }
    }
}
