//! Errors raised while building grid styles.

use thiserror::Error;

use crate::context::ScopeHandle;

/// Error returned when a style operation fails.
///
/// Every failure is deterministic for a given input. Callers are expected to
/// discard the grid being built when one of these surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// A rule scope was popped out of order, or with nothing on the stack.
    #[error("{}", scope_mismatch_message(.expected, .found))]
    ScopeMismatch {
        /// The scope currently on top of the stack, if any.
        expected: Option<ScopeHandle>,
        /// The scope the caller tried to pop.
        found: ScopeHandle,
    },

    /// A show-rule filter names a field the cell schema doesn't have.
    #[error("unknown field '{field}'. Available: {}", .available.join(", "))]
    UnknownField {
        field: String,
        available: Vec<String>,
    },

    /// A value is outside the domain of its property.
    #[error("invalid value '{value}' for {property}: {reason}")]
    InvalidValue {
        property: String,
        value: String,
        reason: String,
    },

    /// A filter operator doesn't apply to the field's type.
    #[error("operator '{operator}' is not valid for {field_type} field '{field}'")]
    InvalidOperator {
        field: String,
        operator: String,
        field_type: String,
    },

    /// A cell was placed outside the grid.
    #[error("cell ({x}, {y}) is outside the {columns}x{rows} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },

    /// Two cells were placed at the same position.
    #[error("cell ({x}, {y}) was placed twice")]
    DuplicateCell { x: usize, y: usize },
}

impl StyleError {
    pub(crate) fn invalid(
        property: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        StyleError::InvalidValue {
            property: property.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

fn scope_mismatch_message(expected: &Option<ScopeHandle>, found: &ScopeHandle) -> String {
    match expected {
        Some(top) => format!(
            "cannot pop rule scope {}: scope {} is still active above it",
            found, top
        ),
        None => format!(
            "cannot pop rule scope {}: no scope opened by this grid is active",
            found
        ),
    }
}

/// Result type for style operations.
pub type StyleResult<T> = Result<T, StyleError>;
