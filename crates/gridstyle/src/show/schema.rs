//! The fields a show-rule filter may test.
//!
//! [`CellSchema`] lists every filterable field of a cell with its
//! [`FieldType`]. Filters are checked against it when a rule is registered,
//! so a misspelt field never reaches a cell.

use std::fmt;

use crate::error::{StyleError, StyleResult};
use crate::style::Property;

/// A filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
        }
    }

    /// Parses an operator suffix. Accepts `neq` as an alias of `ne`.
    pub fn parse(s: &str) -> Option<Op> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Some(Op::Eq),
            "ne" | "neq" => Some(Op::Ne),
            "gt" => Some(Op::Gt),
            "gte" => Some(Op::Gte),
            "lt" => Some(Op::Lt),
            "lte" => Some(Op::Lte),
            _ => None,
        }
    }

    /// Returns `true` for operators that need an ordering.
    pub fn is_ordering(self) -> bool {
        matches!(self, Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A grid position, compared numerically.
    Number,
    /// A style property, compared for equality.
    Style,
}

impl FieldType {
    /// Returns `true` if the given operator is valid for this field type.
    ///
    /// | Type | Operators |
    /// |------|-----------|
    /// | Number | `eq`, `ne`, `gt`, `gte`, `lt`, `lte` |
    /// | Style | `eq`, `ne` |
    pub fn is_valid_operator(self, op: Op) -> bool {
        match self {
            FieldType::Number => true,
            FieldType::Style => !op.is_ordering(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::Style => "style",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filterable cell field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellField {
    /// Column index.
    X,
    /// Row index.
    Y,
    Style(Property),
}

impl CellField {
    pub fn field_type(self) -> FieldType {
        match self {
            CellField::X | CellField::Y => FieldType::Number,
            CellField::Style(_) => FieldType::Style,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellField::X => "x",
            CellField::Y => "y",
            CellField::Style(property) => property.name(),
        }
    }
}

/// Field metadata for cells.
pub struct CellSchema;

impl CellSchema {
    const FIELDS: [CellField; 6] = [
        CellField::X,
        CellField::Y,
        CellField::Style(Property::Align),
        CellField::Style(Property::Fill),
        CellField::Style(Property::Stroke),
        CellField::Style(Property::Inset),
    ];

    /// Returns the field with this name, or `None` if the cell has none.
    pub fn field(name: &str) -> Option<CellField> {
        Self::FIELDS.into_iter().find(|field| field.name() == name)
    }

    /// All filterable field names.
    pub fn field_names() -> &'static [&'static str] {
        &["x", "y", "align", "fill", "stroke", "inset"]
    }

    /// Looks a field up, failing with the list of available names.
    pub fn lookup(name: &str) -> StyleResult<CellField> {
        Self::field(name).ok_or_else(|| StyleError::UnknownField {
            field: name.to_string(),
            available: Self::field_names().iter().map(|s| s.to_string()).collect(),
        })
    }
}
