//! The per-grid build pass.
//!
//! A [`GridPass`] walks a grid's cells in declaration order. Rule scopes are
//! pushed and popped between cells as the surrounding document opens and
//! closes them, show rules are registered as they are declared, and every
//! placed cell is resolved against the state at that moment.
//!
//! Any failure other than a rejected show rule poisons the pass: later calls
//! return the same error and no [`ResolvedGrid`] can be taken out of it.
//!
//! # Example
//!
//! ```rust
//! use gridstyle::{Cell, Celled, GridDefaults, GridPass, GridStyleContext, Length, Paint, Styles};
//!
//! let ctx = GridStyleContext::with_defaults(
//!     2,
//!     1,
//!     GridDefaults::new().fill(Celled::Value(Paint::AQUA)),
//! )
//! .unwrap();
//!
//! let mut pass = GridPass::new(ctx);
//! let scope = pass
//!     .push_scope(Styles::new().inset(Length::pt(20.0)).unwrap())
//!     .unwrap();
//! pass.place(Cell::new(0, 0, "padded")).unwrap();
//! pass.pop_scope(scope).unwrap();
//! pass.place(Cell::new(1, 0, "tight")).unwrap();
//!
//! let grid = pass.finish().unwrap();
//! assert_eq!(grid.cells[0].style.inset.top, Length::pt(20.0));
//! assert_eq!(grid.cells[1].style.inset.top, Length::zero());
//! ```

use std::collections::HashSet;

use log::debug;
use serde::Serialize;

use crate::cell::Cell;
use crate::context::{GridDefaults, GridStyleContext, ScopeHandle};
use crate::error::{StyleError, StyleResult};
use crate::resolve::{resolve_cell, EffectiveStyle};
use crate::show::{CellFilter, CellView, RuleId, ShowRules};
use crate::style::Styles;
use crate::value::Length;

/// A cell after style resolution and show rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCell<C> {
    pub x: usize,
    pub y: usize,
    pub style: EffectiveStyle,
    pub content: C,
}

/// Everything layout needs from one grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedGrid<C> {
    pub columns: usize,
    pub rows: usize,
    /// Passed through untouched.
    pub column_gutter: Vec<Length>,
    /// Passed through untouched.
    pub row_gutter: Vec<Length>,
    /// In placement order.
    pub cells: Vec<ResolvedCell<C>>,
}

impl<C> ResolvedGrid<C> {
    /// The cell at a position, if one was placed there.
    pub fn cell(&self, x: usize, y: usize) -> Option<&ResolvedCell<C>> {
        self.cells.iter().find(|cell| cell.x == x && cell.y == y)
    }
}

/// Drives style resolution for one grid.
#[derive(Debug)]
pub struct GridPass<C> {
    ctx: GridStyleContext,
    show: ShowRules<C>,
    occupied: HashSet<(usize, usize)>,
    cells: Vec<ResolvedCell<C>>,
    column_gutter: Vec<Length>,
    row_gutter: Vec<Length>,
    failed: Option<StyleError>,
}

impl<C> GridPass<C> {
    pub fn new(ctx: GridStyleContext) -> Self {
        GridPass {
            ctx,
            show: ShowRules::new(),
            occupied: HashSet::new(),
            cells: Vec::new(),
            column_gutter: Vec::new(),
            row_gutter: Vec::new(),
            failed: None,
        }
    }

    /// Sets the gutters handed through to layout.
    pub fn with_gutters(mut self, column_gutter: Vec<Length>, row_gutter: Vec<Length>) -> Self {
        self.column_gutter = column_gutter;
        self.row_gutter = row_gutter;
        self
    }

    /// Starts the pass of a grid nested inside a cell of this one.
    ///
    /// The nested pass sees every rule scope and show rule active here. What
    /// it declares itself stays inside it, and it cannot pop the scopes it
    /// inherited.
    ///
    /// # Errors
    ///
    /// Returns the error that poisoned this pass, or
    /// [`StyleError::InvalidValue`] for an invalid default.
    pub fn nested(
        &self,
        columns: usize,
        rows: usize,
        defaults: GridDefaults,
    ) -> StyleResult<GridPass<C>> {
        self.check()?;
        let ctx = self.ctx.nested(columns, rows, defaults)?;
        debug!(
            "nested grid pass {}x{} inherits {} scope(s) and {} show rule(s)",
            columns,
            rows,
            ctx.depth(),
            self.show.len()
        );
        let mut pass = GridPass::new(ctx);
        pass.show = self.show.snapshot();
        Ok(pass)
    }

    pub fn context(&self) -> &GridStyleContext {
        &self.ctx
    }

    pub fn show_rules(&self) -> &ShowRules<C> {
        &self.show
    }

    /// Cells placed so far.
    pub fn cells(&self) -> &[ResolvedCell<C>] {
        &self.cells
    }

    /// Opens a rule scope. See [`GridStyleContext::push_rule_scope`].
    pub fn push_scope(&mut self, injection: Styles) -> StyleResult<ScopeHandle> {
        self.check()?;
        let result = self.ctx.push_rule_scope(injection);
        self.record(result)
    }

    /// Closes a rule scope, dropping show rules declared inside it.
    pub fn pop_scope(&mut self, handle: ScopeHandle) -> StyleResult<()> {
        self.check()?;
        let result = self.ctx.pop_rule_scope(handle);
        self.record(result)?;
        self.show.truncate_to_depth(self.ctx.depth());
        Ok(())
    }

    /// Declares a show rule in the current scope.
    ///
    /// A rejected rule does not poison the pass; cells already placed keep
    /// their results.
    pub fn show<F>(&mut self, filter: CellFilter, transform: F) -> StyleResult<RuleId>
    where
        F: Fn(&CellView<'_, C>) -> C + 'static,
    {
        self.check()?;
        self.show.register_at(self.ctx.depth(), filter, transform)
    }

    /// Resolves a cell, runs the show rules over it and records it.
    ///
    /// # Errors
    ///
    /// - [`StyleError::OutOfBounds`] if the cell lies outside the grid
    /// - [`StyleError::DuplicateCell`] if its position is already taken
    /// - [`StyleError::InvalidValue`] if a position function misbehaves
    pub fn place(&mut self, cell: Cell<C>) -> StyleResult<&ResolvedCell<C>> {
        self.check()?;
        let result = self.resolve(cell);
        let resolved = self.record(result)?;
        self.cells.push(resolved);
        Ok(&self.cells[self.cells.len() - 1])
    }

    /// Places every cell in order, stopping at the first error.
    pub fn place_all<I>(&mut self, cells: I) -> StyleResult<()>
    where
        I: IntoIterator<Item = Cell<C>>,
    {
        for cell in cells {
            self.place(cell)?;
        }
        Ok(())
    }

    /// Ends the pass.
    ///
    /// # Errors
    ///
    /// Returns the error that poisoned the pass, if any.
    pub fn finish(self) -> StyleResult<ResolvedGrid<C>> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        debug!(
            "grid pass finished: {} cell(s) in a {}x{} grid",
            self.cells.len(),
            self.ctx.columns(),
            self.ctx.rows()
        );
        Ok(ResolvedGrid {
            columns: self.ctx.columns(),
            rows: self.ctx.rows(),
            column_gutter: self.column_gutter,
            row_gutter: self.row_gutter,
            cells: self.cells,
        })
    }

    fn resolve(&mut self, cell: Cell<C>) -> StyleResult<ResolvedCell<C>> {
        let (x, y) = cell.position();
        self.ctx.check_bounds(x, y)?;
        if !self.occupied.insert((x, y)) {
            return Err(StyleError::DuplicateCell { x, y });
        }

        let style = resolve_cell(&cell, &self.ctx)?;
        let content = self.show.apply(x, y, cell.into_content(), &style);
        Ok(ResolvedCell {
            x,
            y,
            style,
            content,
        })
    }

    fn check(&self) -> StyleResult<()> {
        match &self.failed {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn record<T>(&mut self, result: StyleResult<T>) -> StyleResult<T> {
        if let Err(err) = &result {
            debug!("grid pass aborted: {}", err);
            self.failed = Some(err.clone());
        }
        result
    }
}

/// Resolves a whole grid in one go, with no rule scopes changing mid-grid.
pub fn resolve_grid<C, I>(ctx: GridStyleContext, cells: I) -> StyleResult<ResolvedGrid<C>>
where
    I: IntoIterator<Item = Cell<C>>,
{
    let mut pass = GridPass::new(ctx);
    pass.place_all(cells)?;
    pass.finish()
}
