//! Show-rule filters over a cell's position and resolved style.
//!
//! # Key Format
//!
//! Filter keys are `field` or `field-operator`:
//!
//! - `fill` → fill equals the value
//! - `fill-ne` → fill differs from the value
//! - `x-gte` → column index at least the value
//!
//! A whole filter can be written as comma separated `key=value` pairs:
//!
//! ```rust
//! use gridstyle::CellFilter;
//!
//! let filter = CellFilter::parse("fill=aqua, y-gt=0").unwrap();
//! assert_eq!(filter.len(), 2);
//! ```
//!
//! Building or parsing a [`CellFilter`] only splits it into pairs. Field
//! names, operators and values are checked by [`CellFilter::compile`], which
//! rule registration calls.

use crate::error::{StyleError, StyleResult};
use crate::resolve::EffectiveStyle;
use crate::style::StyleValue;

use super::schema::{CellField, CellSchema, Op};

/// An unchecked filter: `(key, value)` pairs that must all match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellFilter {
    pairs: Vec<(String, String)>,
}

impl CellFilter {
    /// A filter that matches every cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `key = value` condition.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Parses `key=value` pairs separated by commas.
    ///
    /// Commas inside parentheses belong to the value, so colors such as
    /// `fill=rgb(0, 0, 255)` need no quoting.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidValue`] for a pair without `=`, or for
    /// unbalanced parentheses.
    pub fn parse(text: &str) -> StyleResult<Self> {
        let mut filter = CellFilter::new();
        let pairs = split_pairs(text)?;
        for pair in pairs.into_iter().map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                StyleError::invalid("filter", pair, "expected key=value")
            })?;
            filter = filter.with(key.trim(), value.trim());
        }
        Ok(filter)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Checks every condition against the cell schema.
    ///
    /// # Errors
    ///
    /// - [`StyleError::UnknownField`] for a field the cell doesn't have
    /// - [`StyleError::InvalidOperator`] for an ordering on a style field
    /// - [`StyleError::InvalidValue`] for a value that doesn't parse
    pub fn compile(&self) -> StyleResult<CompiledFilter> {
        let clauses = self
            .pairs
            .iter()
            .map(|(key, value)| compile_clause(key, value))
            .collect::<StyleResult<Vec<_>>>()?;
        Ok(CompiledFilter { clauses })
    }
}

/// Splits on commas at parenthesis depth zero.
fn split_pairs(text: &str) -> StyleResult<Vec<&str>> {
    let unbalanced = || StyleError::invalid("filter", text, "unbalanced parentheses");
    let mut pairs = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            ',' if depth == 0 => {
                pairs.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced());
    }
    pairs.push(&text[start..]);
    Ok(pairs)
}

/// Splits a key into field name and operator.
///
/// The part after the last `-` is taken as the operator when it names one;
/// otherwise the whole key is the field name.
///
/// - `x-gte` → `("x", Some(Op::Gte))`
/// - `fill` → `("fill", None)`
pub fn parse_key(key: &str) -> (&str, Option<Op>) {
    if let Some((field, suffix)) = key.rsplit_once('-') {
        if let Some(op) = Op::parse(suffix) {
            return (field, Some(op));
        }
    }
    (key, None)
}

fn compile_clause(key: &str, value: &str) -> StyleResult<Clause> {
    let (name, op) = parse_key(key);
    let field = CellSchema::lookup(name)?;
    let op = op.unwrap_or(Op::Eq);

    let field_type = field.field_type();
    if !field_type.is_valid_operator(op) {
        return Err(StyleError::InvalidOperator {
            field: name.to_string(),
            operator: op.to_string(),
            field_type: field_type.to_string(),
        });
    }

    let expected = match field {
        CellField::X | CellField::Y => {
            let n = value.parse::<usize>().map_err(|_| {
                StyleError::invalid(name, value, "expected a non-negative integer")
            })?;
            Expected::Number(n)
        }
        CellField::Style(property) => Expected::Style(StyleValue::parse(property, value)?),
    };

    Ok(Clause {
        field,
        op,
        expected,
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Expected {
    Number(usize),
    Style(StyleValue),
}

#[derive(Debug, Clone, PartialEq)]
struct Clause {
    field: CellField,
    op: Op,
    expected: Expected,
}

impl Clause {
    fn matches(&self, x: usize, y: usize, style: &EffectiveStyle) -> bool {
        match (&self.field, &self.expected) {
            (CellField::X, Expected::Number(n)) => compare(x, self.op, *n),
            (CellField::Y, Expected::Number(n)) => compare(y, self.op, *n),
            (CellField::Style(_), Expected::Style(expected)) => {
                let equal = style_matches(style, expected);
                match self.op {
                    Op::Ne => !equal,
                    _ => equal,
                }
            }
            _ => false,
        }
    }
}

fn compare(actual: usize, op: Op, expected: usize) -> bool {
    match op {
        Op::Eq => actual == expected,
        Op::Ne => actual != expected,
        Op::Gt => actual > expected,
        Op::Gte => actual >= expected,
        Op::Lt => actual < expected,
        Op::Lte => actual <= expected,
    }
}

/// Alignment and inset conditions only constrain the axes or sides they set.
fn style_matches(style: &EffectiveStyle, expected: &StyleValue) -> bool {
    match expected {
        StyleValue::Align(align) => {
            align.x.map_or(true, |x| style.align.x == x)
                && align.y.map_or(true, |y| style.align.y == y)
        }
        StyleValue::Fill(fill) => style.fill == Some(*fill),
        StyleValue::Stroke(stroke) => style.stroke.as_ref() == Some(stroke),
        StyleValue::Inset(inset) => inset
            .zip(style.inset, |expected, actual| {
                expected.map_or(true, |expected| expected == actual)
            })
            .iter()
            .all(|side| *side),
    }
}

/// A filter whose fields, operators and values have been checked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledFilter {
    clauses: Vec<Clause>,
}

impl CompiledFilter {
    /// Returns `true` if every condition holds for the cell.
    pub fn matches(&self, x: usize, y: usize, style: &EffectiveStyle) -> bool {
        self.clauses.iter().all(|clause| clause.matches(x, y, style))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Ambient;
    use crate::style::Styles;
    use crate::value::{Align, Length, Paint, Stroke};

    fn style(styles: Styles) -> EffectiveStyle {
        EffectiveStyle::complete(styles, &Ambient::default())
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("x-gte"), ("x", Some(Op::Gte)));
        assert_eq!(parse_key("fill"), ("fill", None));
        assert_eq!(parse_key("fill-colour"), ("fill-colour", None));
    }

    #[test]
    fn test_parse_filter_string() {
        let filter = CellFilter::parse("fill = aqua , x-lt=2,").unwrap();
        assert_eq!(
            filter,
            CellFilter::new().with("fill", "aqua").with("x-lt", "2")
        );
    }

    #[test]
    fn test_parse_filter_commas_inside_parentheses() {
        let filter = CellFilter::parse("fill=rgb(0, 0, 255), x=1").unwrap();
        assert_eq!(
            filter,
            CellFilter::new().with("fill", "rgb(0, 0, 255)").with("x", "1")
        );

        let compiled = filter.compile().unwrap();
        assert!(compiled.matches(1, 0, &style(Styles::new().fill(Paint::BLUE))));
        assert!(!compiled.matches(1, 0, &style(Styles::new().fill(Paint::AQUA))));
    }

    #[test]
    fn test_parse_filter_unbalanced_parentheses() {
        assert!(CellFilter::parse("fill=rgb(0, 0, 255").is_err());
        assert!(CellFilter::parse("fill=red), x=1").is_err());
    }

    #[test]
    fn test_parse_filter_missing_equals() {
        assert!(matches!(
            CellFilter::parse("fill"),
            Err(StyleError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_compile_unknown_field() {
        let err = CellFilter::new().with("colour", "red").compile().unwrap_err();
        assert!(matches!(err, StyleError::UnknownField { .. }));
    }

    #[test]
    fn test_compile_invalid_operator() {
        let err = CellFilter::new().with("fill-gt", "red").compile().unwrap_err();
        assert_eq!(
            err,
            StyleError::InvalidOperator {
                field: "fill".to_string(),
                operator: "gt".to_string(),
                field_type: "style".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_invalid_values() {
        assert!(CellFilter::new().with("x", "-1").compile().is_err());
        assert!(CellFilter::new().with("fill", "nope").compile().is_err());
        assert!(CellFilter::new().with("align", "middle").compile().is_err());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let compiled = CellFilter::new().compile().unwrap();
        assert!(compiled.matches(4, 7, &style(Styles::new())));
    }

    #[test]
    fn test_fill_match() {
        let compiled = CellFilter::parse("fill=aqua").unwrap().compile().unwrap();
        assert!(compiled.matches(0, 0, &style(Styles::new().fill(Paint::AQUA))));
        assert!(!compiled.matches(0, 0, &style(Styles::new().fill(Paint::RED))));
        assert!(!compiled.matches(0, 0, &style(Styles::new())));

        let negated = CellFilter::parse("fill-ne=aqua").unwrap().compile().unwrap();
        assert!(negated.matches(0, 0, &style(Styles::new())));
    }

    #[test]
    fn test_position_match() {
        let compiled = CellFilter::parse("x-gte=1, y=0").unwrap().compile().unwrap();
        let s = style(Styles::new());
        assert!(compiled.matches(1, 0, &s));
        assert!(compiled.matches(5, 0, &s));
        assert!(!compiled.matches(0, 0, &s));
        assert!(!compiled.matches(1, 1, &s));
    }

    #[test]
    fn test_align_match_only_named_axis() {
        let compiled = CellFilter::parse("align=right").unwrap().compile().unwrap();
        assert!(compiled.matches(0, 0, &style(Styles::new().align(Align::RIGHT + Align::BOTTOM))));
        assert!(!compiled.matches(0, 0, &style(Styles::new().align(Align::LEFT))));
    }

    #[test]
    fn test_inset_and_stroke_match() {
        let s = style(
            Styles::new()
                .inset(Length::pt(4.0))
                .unwrap()
                .stroke(Stroke::new(Paint::RED, Length::pt(2.0)))
                .unwrap(),
        );
        let inset = CellFilter::parse("inset=4pt").unwrap().compile().unwrap();
        assert!(inset.matches(0, 0, &s));

        let stroke = CellFilter::parse("stroke=2pt + red").unwrap().compile().unwrap();
        assert!(stroke.matches(0, 0, &s));

        let other = CellFilter::parse("stroke=1pt + red").unwrap().compile().unwrap();
        assert!(!other.matches(0, 0, &s));
    }

    #[test]
    fn test_fractional_inset_match() {
        let s = style(Styles::new().inset(Length::pt(0.1)).unwrap());
        let compiled = CellFilter::parse("inset=0.1pt").unwrap().compile().unwrap();
        assert!(compiled.matches(0, 0, &s));
    }
}
