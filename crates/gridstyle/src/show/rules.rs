//! Show-rule registration and application.

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::StyleResult;
use crate::resolve::EffectiveStyle;

use super::filter::{CellFilter, CompiledFilter};

/// A read-only view of a cell handed to a show-rule transform.
///
/// The style is the resolved one. Transforms can read it but have no way to
/// change it; they only produce replacement content.
#[derive(Debug)]
pub struct CellView<'a, C> {
    pub x: usize,
    pub y: usize,
    pub content: &'a C,
    pub style: &'a EffectiveStyle,
}

/// Produces a cell's replacement content.
pub type Transform<C> = Box<dyn Fn(&CellView<'_, C>) -> C>;

/// Identifies a registered show rule. Later rules have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "show#{}", self.0)
    }
}

struct ShowRule<C> {
    id: RuleId,
    filter: CompiledFilter,
    transform: Transform<C>,
    depth: usize,
}

/// Show rules in declaration order.
///
/// # Application order
///
/// The most recently declared matching rule runs first. Its output is then
/// matched against the rules declared before it, never against itself or
/// anything declared later. Every rule therefore runs at most once per cell
/// and application always terminates.
///
/// ```rust
/// use gridstyle::{CellFilter, ShowRules, EffectiveStyle, Ambient, Styles};
///
/// let mut rules: ShowRules<String> = ShowRules::new();
/// rules.register(CellFilter::new(), |cell| format!("[{}]", cell.content)).unwrap();
/// rules.register(CellFilter::new(), |cell| format!("<{}>", cell.content)).unwrap();
///
/// let style = EffectiveStyle::complete(Styles::new(), &Ambient::default());
/// assert_eq!(rules.apply(0, 0, "a".to_string(), &style), "[<a>]");
/// ```
pub struct ShowRules<C> {
    rules: Vec<Rc<ShowRule<C>>>,
    next_id: usize,
}

impl<C> ShowRules<C> {
    pub fn new() -> Self {
        ShowRules {
            rules: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a rule for every cell matching `filter`.
    ///
    /// # Errors
    ///
    /// The filter is compiled here. A field unknown to the cell schema fails
    /// with [`StyleError::UnknownField`](crate::StyleError::UnknownField), and
    /// the rule is not added.
    pub fn register<F>(&mut self, filter: CellFilter, transform: F) -> StyleResult<RuleId>
    where
        F: Fn(&CellView<'_, C>) -> C + 'static,
    {
        self.register_at(0, filter, transform)
    }

    /// Registers a rule that belongs to the rule scope at `depth`.
    pub(crate) fn register_at<F>(
        &mut self,
        depth: usize,
        filter: CellFilter,
        transform: F,
    ) -> StyleResult<RuleId>
    where
        F: Fn(&CellView<'_, C>) -> C + 'static,
    {
        let compiled = filter.compile()?;
        let id = RuleId(self.next_id);
        self.next_id += 1;
        debug!(
            "register show rule {} at depth {} with {} condition(s)",
            id,
            depth,
            filter.len()
        );
        self.rules.push(Rc::new(ShowRule {
            id,
            filter: compiled,
            transform: Box::new(transform),
            depth,
        }));
        Ok(id)
    }

    /// The rules active now, shared with a nested grid. Rules registered on
    /// either side afterwards stay local to it.
    pub(crate) fn snapshot(&self) -> Self {
        ShowRules {
            rules: self.rules.clone(),
            next_id: self.next_id,
        }
    }

    /// Drops rules registered inside scopes deeper than `depth`.
    pub(crate) fn truncate_to_depth(&mut self, depth: usize) {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.depth <= depth);
        let dropped = before - self.rules.len();
        if dropped > 0 {
            debug!("dropped {} show rule(s) leaving depth {}", dropped, depth);
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Ids of the rules that would run for this cell, in application order.
    pub fn matching(&self, x: usize, y: usize, style: &EffectiveStyle) -> Vec<RuleId> {
        self.rules
            .iter()
            .rev()
            .filter(|rule| rule.filter.matches(x, y, style))
            .map(|rule| rule.id)
            .collect()
    }

    /// Runs every matching rule over a cell's content.
    pub fn apply(&self, x: usize, y: usize, content: C, style: &EffectiveStyle) -> C {
        let mut content = content;
        // Only rules below `limit` may still run.
        let mut limit = self.rules.len();

        while let Some(index) = self.rules[..limit]
            .iter()
            .rposition(|rule| rule.filter.matches(x, y, style))
        {
            let rule = &self.rules[index];
            let view = CellView {
                x,
                y,
                content: &content,
                style,
            };
            content = (rule.transform)(&view);
            limit = index;
        }

        content
    }
}

impl<C> Default for ShowRules<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ShowRules<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowRules")
            .field(
                "rules",
                &self.rules.iter().map(|rule| rule.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Ambient;
    use crate::error::StyleError;
    use crate::style::Styles;
    use crate::value::Paint;

    fn plain() -> EffectiveStyle {
        EffectiveStyle::complete(Styles::new(), &Ambient::default())
    }

    fn filled(paint: Paint) -> EffectiveStyle {
        EffectiveStyle::complete(Styles::new().fill(paint), &Ambient::default())
    }

    #[test]
    fn test_no_rules_leaves_content() {
        let rules: ShowRules<String> = ShowRules::new();
        assert_eq!(rules.apply(0, 0, "a".to_string(), &plain()), "a");
    }

    #[test]
    fn test_filter_selects_cells() {
        let mut rules: ShowRules<String> = ShowRules::new();
        rules
            .register(CellFilter::parse("fill=aqua").unwrap(), |cell| {
                cell.content.to_uppercase()
            })
            .unwrap();

        assert_eq!(rules.apply(0, 0, "a".into(), &filled(Paint::AQUA)), "A");
        assert_eq!(rules.apply(0, 0, "a".into(), &filled(Paint::RED)), "a");
    }

    #[test]
    fn test_newest_rule_runs_first() {
        let mut rules: ShowRules<Vec<&'static str>> = ShowRules::new();
        rules
            .register(CellFilter::new(), |cell| {
                let mut out = cell.content.clone();
                out.push("first");
                out
            })
            .unwrap();
        rules
            .register(CellFilter::new(), |cell| {
                let mut out = cell.content.clone();
                out.push("second");
                out
            })
            .unwrap();

        assert_eq!(rules.apply(0, 0, Vec::new(), &plain()), vec!["second", "first"]);
    }

    #[test]
    fn test_each_rule_runs_once() {
        let mut rules: ShowRules<u32> = ShowRules::new();
        for _ in 0..3 {
            rules.register(CellFilter::new(), |cell| cell.content + 1).unwrap();
        }
        assert_eq!(rules.apply(0, 0, 0, &plain()), 3);
    }

    #[test]
    fn test_transform_sees_resolved_style() {
        let mut rules: ShowRules<String> = ShowRules::new();
        rules
            .register(CellFilter::new(), |cell| {
                format!("{:?}", cell.style.fill)
            })
            .unwrap();
        let out = rules.apply(0, 0, String::new(), &filled(Paint::RED));
        assert!(out.contains("255"));
    }

    #[test]
    fn test_unknown_field_rejected_at_registration() {
        let mut rules: ShowRules<String> = ShowRules::new();
        let result = rules.register(CellFilter::new().with("body", "x"), |cell| {
            cell.content.clone()
        });
        assert!(matches!(result, Err(StyleError::UnknownField { .. })));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_matching_order() {
        let mut rules: ShowRules<()> = ShowRules::new();
        let a = rules.register(CellFilter::new(), |_| ()).unwrap();
        let b = rules
            .register(CellFilter::parse("x=1").unwrap(), |_| ())
            .unwrap();
        let c = rules.register(CellFilter::new(), |_| ()).unwrap();

        assert_eq!(rules.matching(0, 0, &plain()), vec![c, a]);
        assert_eq!(rules.matching(1, 0, &plain()), vec![c, b, a]);
    }

    #[test]
    fn test_snapshot_shares_existing_rules_only() {
        let mut outer: ShowRules<String> = ShowRules::new();
        outer
            .register(CellFilter::new(), |cell| format!("<{}>", cell.content))
            .unwrap();

        let mut inner = outer.snapshot();
        inner
            .register(CellFilter::new(), |cell| format!("[{}]", cell.content))
            .unwrap();
        outer
            .register(CellFilter::new(), |cell| format!("({})", cell.content))
            .unwrap();

        assert_eq!(inner.apply(0, 0, "a".into(), &plain()), "<[a]>");
        assert_eq!(outer.apply(0, 0, "a".into(), &plain()), "<(a)>");
    }

    #[test]
    fn test_truncate_to_depth() {
        let mut rules: ShowRules<()> = ShowRules::new();
        rules.register_at(0, CellFilter::new(), |_| ()).unwrap();
        rules.register_at(1, CellFilter::new(), |_| ()).unwrap();
        rules.register_at(2, CellFilter::new(), |_| ()).unwrap();

        rules.truncate_to_depth(1);
        assert_eq!(rules.len(), 2);
        rules.truncate_to_depth(0);
        assert_eq!(rules.len(), 1);
    }
}
