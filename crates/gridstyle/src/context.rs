//! Grid-wide defaults and the stack of active rule scopes.
//!
//! A [`GridStyleContext`] answers one question: before a cell's own overrides
//! are considered, what value does a property have at a given position? It
//! evaluates the grid-wide default (a constant, a per-column array, or a
//! function of the position) and folds the injections of every active rule
//! scope over it, oldest first.
//!
//! The context is an explicit value owned by whoever drives the build pass.
//! Nothing here is global, so independent grids can be resolved on separate
//! threads as long as each has its own context.

use std::fmt;
use std::iter;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::error::{StyleError, StyleResult};
use crate::style::{Property, PropertyValue, StyleValue, Styles};
use crate::value::{fold_all, Align, Inset, Length, Paint, ResolvedAlign, Sides, Stroke};

/// A pure function from `(column, row)` to a value, or `None` to leave the
/// property unset for that cell.
pub type CellFn<T> = Arc<dyn Fn(usize, usize) -> Option<T> + Send + Sync>;

/// A grid-wide value that may depend on the cell position.
///
/// ```rust
/// use gridstyle::{Celled, Paint};
///
/// let stripes = Celled::func(|x, y| {
///     Some(if (x + y) % 2 == 0 { Paint::AQUA } else { Paint::WHITE })
/// });
/// assert_eq!(stripes.at(0, 0).unwrap(), Some(Paint::AQUA));
/// assert_eq!(stripes.at(1, 0).unwrap(), Some(Paint::WHITE));
/// ```
#[derive(Clone)]
pub enum Celled<T> {
    /// The same value everywhere.
    Value(T),
    /// One value per column, cycling when there are more columns than items.
    Array(Vec<T>),
    /// Computed from the position.
    Func(CellFn<T>),
}

impl<T: PropertyValue> Celled<T> {
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(usize, usize) -> Option<T> + Send + Sync + 'static,
    {
        Celled::Func(Arc::new(f))
    }

    /// The value at a position.
    ///
    /// Function results are checked against the property's domain before they
    /// are returned.
    pub fn at(&self, x: usize, y: usize) -> StyleResult<Option<T>> {
        match self {
            Celled::Value(value) => Ok(Some(value.clone())),
            Celled::Array(items) => Ok(items.get(x % items.len().max(1)).cloned()),
            Celled::Func(f) => {
                let value = f(x, y);
                if let Some(value) = &value {
                    value.validate()?;
                }
                Ok(value)
            }
        }
    }

    /// Checks constants and array items. Functions are checked per call.
    pub fn validate(&self) -> StyleResult<()> {
        match self {
            Celled::Value(value) => value.validate(),
            Celled::Array(items) => {
                if items.is_empty() {
                    return Err(StyleError::invalid(
                        T::PROPERTY.name(),
                        "()",
                        "array must not be empty",
                    ));
                }
                items.iter().try_for_each(PropertyValue::validate)
            }
            Celled::Func(_) => Ok(()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Celled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Celled::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Celled::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Celled::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// The grid-wide style arguments. Every property may be left unset.
#[derive(Debug, Clone, Default)]
pub struct GridDefaults {
    pub align: Option<Celled<Align>>,
    pub fill: Option<Celled<Paint>>,
    pub stroke: Option<Celled<Stroke>>,
    pub inset: Option<Celled<Inset>>,
}

impl GridDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, align: Celled<Align>) -> Self {
        self.align = Some(align);
        self
    }

    pub fn fill(mut self, fill: Celled<Paint>) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn stroke(mut self, stroke: Celled<Stroke>) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn inset(mut self, inset: Celled<Inset>) -> Self {
        self.inset = Some(inset);
        self
    }

    pub fn validate(&self) -> StyleResult<()> {
        fn check<T: PropertyValue>(celled: &Option<Celled<T>>) -> StyleResult<()> {
            celled.as_ref().map_or(Ok(()), Celled::validate)
        }

        check(&self.align)?;
        check(&self.fill)?;
        check(&self.stroke)?;
        check(&self.inset)
    }
}

/// The document-level fallback, used for whatever no grid argument, rule
/// scope or cell override decides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ambient {
    pub align: ResolvedAlign,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub inset: Sides<Length>,
}

impl Default for Ambient {
    fn default() -> Self {
        Ambient {
            align: ResolvedAlign::default(),
            fill: None,
            stroke: None,
            inset: Sides::splat(Length::zero()),
        }
    }
}

/// Identifies one pushed rule scope.
///
/// Handles are unique across every context in the process, so a handle
/// issued by one grid never pops a scope of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeHandle(u64);

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

impl ScopeHandle {
    fn next() -> Self {
        ScopeHandle(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        ScopeHandle(raw)
    }
}

impl fmt::Display for ScopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct RuleScope {
    handle: ScopeHandle,
    injection: Styles,
}

/// Grid-wide defaults plus the active rule scopes, for one grid.
#[derive(Debug, Clone)]
pub struct GridStyleContext {
    columns: usize,
    rows: usize,
    defaults: GridDefaults,
    ambient: Ambient,
    scopes: Vec<RuleScope>,
    /// Scopes below this depth belong to an enclosing grid.
    inherited: usize,
}

impl GridStyleContext {
    /// Builds the context for a `columns` x `rows` grid.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidValue`] if a constant or array default is
    /// outside its property's domain.
    pub fn with_defaults(columns: usize, rows: usize, defaults: GridDefaults) -> StyleResult<Self> {
        defaults.validate()?;
        Ok(GridStyleContext {
            columns,
            rows,
            defaults,
            ambient: Ambient::default(),
            scopes: Vec::new(),
            inherited: 0,
        })
    }

    /// Replaces the document-level fallback.
    pub fn with_ambient(mut self, ambient: Ambient) -> Self {
        self.ambient = ambient;
        self
    }

    /// Builds the context of a grid nested inside a cell of this one.
    ///
    /// The nested grid starts with every rule scope that is active here, and
    /// the same ambient fallback. Scopes pushed afterwards on either context
    /// stay local to it, and the inherited scopes can only be popped by the
    /// enclosing context.
    pub fn nested(&self, columns: usize, rows: usize, defaults: GridDefaults) -> StyleResult<Self> {
        defaults.validate()?;
        Ok(GridStyleContext {
            columns,
            rows,
            defaults,
            ambient: self.ambient.clone(),
            scopes: self.scopes.clone(),
            inherited: self.scopes.len(),
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn defaults(&self) -> &GridDefaults {
        &self.defaults
    }

    pub fn ambient(&self) -> &Ambient {
        &self.ambient
    }

    /// Number of active rule scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The most recently pushed scope that is still active.
    pub fn top_scope(&self) -> Option<ScopeHandle> {
        self.scopes.last().map(|scope| scope.handle)
    }

    /// Opens a rule scope whose injections apply to every cell resolved
    /// until it is popped.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidValue`] if the injection holds a value
    /// outside its property's domain.
    pub fn push_rule_scope(&mut self, injection: Styles) -> StyleResult<ScopeHandle> {
        injection.validate()?;
        let handle = ScopeHandle::next();
        debug!(
            "push rule scope {} at depth {} ({:?})",
            handle,
            self.scopes.len() + 1,
            injection.properties().collect::<Vec<_>>()
        );
        self.scopes.push(RuleScope { handle, injection });
        Ok(handle)
    }

    /// Closes the top-most rule scope, returning its injections.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ScopeMismatch`] if `handle` is not the top-most
    /// active scope, or if that scope was inherited from an enclosing grid.
    /// The stack is left untouched in either case.
    pub fn pop_rule_scope(&mut self, handle: ScopeHandle) -> StyleResult<Styles> {
        let top = self
            .scopes
            .get(self.inherited..)
            .and_then(<[RuleScope]>::last)
            .map(|scope| scope.handle);
        if top != Some(handle) {
            return Err(StyleError::ScopeMismatch {
                expected: top,
                found: handle,
            });
        }

        debug!("pop rule scope {} at depth {}", handle, self.scopes.len());
        let scope = self.scopes.pop().ok_or(StyleError::ScopeMismatch {
            expected: None,
            found: handle,
        })?;
        Ok(scope.injection)
    }

    /// Checks a position lies inside the grid.
    pub fn check_bounds(&self, x: usize, y: usize) -> StyleResult<()> {
        if x >= self.columns || y >= self.rows {
            return Err(StyleError::OutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// The value of one property at a position, before cell overrides.
    ///
    /// The grid-wide default is evaluated first, then every active rule
    /// scope's injection is folded over it from oldest to newest. `None`
    /// means nothing set the property.
    pub fn resolve_default(
        &self,
        property: Property,
        x: usize,
        y: usize,
    ) -> StyleResult<Option<StyleValue>> {
        self.check_bounds(x, y)?;
        Ok(match property {
            Property::Align => self.layered(&self.defaults.align, x, y)?.map(Align::into_style),
            Property::Fill => self.layered(&self.defaults.fill, x, y)?.map(Paint::into_style),
            Property::Stroke => self
                .layered(&self.defaults.stroke, x, y)?
                .map(Stroke::into_style),
            Property::Inset => self.layered(&self.defaults.inset, x, y)?.map(Inset::into_style),
        })
    }

    /// Every property at a position, before cell overrides.
    pub fn resolve_defaults(&self, x: usize, y: usize) -> StyleResult<Styles> {
        self.check_bounds(x, y)?;
        Ok(Styles {
            align: self.layered(&self.defaults.align, x, y)?,
            fill: self.layered(&self.defaults.fill, x, y)?,
            stroke: self.layered(&self.defaults.stroke, x, y)?,
            inset: self.layered(&self.defaults.inset, x, y)?,
        })
    }

    fn layered<T: PropertyValue>(
        &self,
        default: &Option<Celled<T>>,
        x: usize,
        y: usize,
    ) -> StyleResult<Option<T>> {
        let base = match default {
            Some(celled) => celled.at(x, y)?,
            None => None,
        };
        let injections = self.scopes.iter().map(|scope| T::pick(&scope.injection));
        Ok(fold_all(iter::once(base).chain(injections)))
    }
}
