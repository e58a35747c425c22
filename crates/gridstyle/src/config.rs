//! Grid style arguments loaded from YAML or JSON.
//!
//! Values use the document notation, so a configuration reads the way the
//! arguments would be written inline:
//!
//! ```yaml
//! columns: 3
//! rows: 2
//! align: left
//! fill: ["#eeeeee", white]     # one entry per column, cycling
//! stroke: 0.5pt + gray
//! inset: { x: 5pt, top: 2pt }
//! column-gutter: 4pt
//! ambient:
//!   align: start + top
//!   inset: 0pt
//! ```
//!
//! Position functions cannot be written in a file; attach them to the
//! [`GridDefaults`] returned by [`GridStyleConfig::defaults`] when needed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::context::{Ambient, Celled, GridDefaults, GridStyleContext};
use crate::error::{StyleError, StyleResult};
use crate::grid::GridPass;
use crate::style::PropertyValue;
use crate::value::{Align, Inset, Length, Paint, ResolvedAlign, Stroke};

/// Error loading a grid style configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML grid style: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON grid style: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported grid style format '{0}', expected .yaml, .yml or .json")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Style(#[from] StyleError),
}

/// A single value, or one value per column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// An inset written as one length or per side.
///
/// In the per-side form, `left`/`top`/`right`/`bottom` win over `x`/`y`,
/// which win over `rest`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InsetSpec {
    All(Length),
    Sides(InsetSides),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsetSides {
    pub left: Option<Length>,
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub x: Option<Length>,
    pub y: Option<Length>,
    pub rest: Option<Length>,
}

impl From<InsetSpec> for Inset {
    fn from(spec: InsetSpec) -> Self {
        match spec {
            InsetSpec::All(length) => Inset::all(length),
            InsetSpec::Sides(sides) => Inset::new(
                sides.left.or(sides.x).or(sides.rest),
                sides.top.or(sides.y).or(sides.rest),
                sides.right.or(sides.x).or(sides.rest),
                sides.bottom.or(sides.y).or(sides.rest),
            ),
        }
    }
}

/// The document-level fallback. Unset fields keep [`Ambient::default`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmbientConfig {
    pub align: Option<Align>,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub inset: Option<InsetSpec>,
}

impl AmbientConfig {
    pub fn to_ambient(&self) -> StyleResult<Ambient> {
        let base = Ambient::default();
        let align = self.align.unwrap_or_default();
        let inset = match &self.inset {
            Some(spec) => {
                let inset = Inset::from(spec.clone());
                inset.validate()?;
                inset.unwrap_or(base.inset)
            }
            None => base.inset,
        };
        if let Some(stroke) = &self.stroke {
            stroke.validate()?;
        }

        Ok(Ambient {
            align: ResolvedAlign {
                x: align.x.unwrap_or(base.align.x),
                y: align.y.unwrap_or(base.align.y),
            },
            fill: self.fill.or(base.fill),
            stroke: self.stroke.clone().or(base.stroke),
            inset,
        })
    }
}

/// Grid-wide style arguments as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GridStyleConfig {
    pub columns: usize,
    pub rows: usize,
    #[serde(default)]
    pub align: Option<OneOrMany<Align>>,
    #[serde(default)]
    pub fill: Option<OneOrMany<Paint>>,
    #[serde(default)]
    pub stroke: Option<OneOrMany<Stroke>>,
    #[serde(default)]
    pub inset: Option<OneOrMany<InsetSpec>>,
    #[serde(default)]
    pub column_gutter: Option<OneOrMany<Length>>,
    #[serde(default)]
    pub row_gutter: Option<OneOrMany<Length>>,
    #[serde(default)]
    pub ambient: AmbientConfig,
}

impl GridStyleConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let read = || {
            fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&read()?),
            "json" => Self::from_json(&read()?),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// The grid-wide defaults. A one-item list is a constant.
    pub fn defaults(&self) -> StyleResult<GridDefaults> {
        let defaults = GridDefaults {
            align: self.align.clone().map(celled),
            fill: self.fill.clone().map(celled),
            stroke: self.stroke.clone().map(celled),
            inset: self.inset.clone().map(|spec| {
                let insets: Vec<Inset> = spec.into_vec().into_iter().map(Inset::from).collect();
                celled(OneOrMany::Many(insets))
            }),
        };
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn ambient(&self) -> StyleResult<Ambient> {
        self.ambient.to_ambient()
    }

    /// Column and row gutters, passed through to layout.
    pub fn gutters(&self) -> StyleResult<(Vec<Length>, Vec<Length>)> {
        fn lengths(spec: &Option<OneOrMany<Length>>, property: &str) -> StyleResult<Vec<Length>> {
            let values = spec.clone().map(OneOrMany::into_vec).unwrap_or_default();
            for value in &values {
                value.non_negative(property)?;
            }
            Ok(values)
        }

        Ok((
            lengths(&self.column_gutter, "column-gutter")?,
            lengths(&self.row_gutter, "row-gutter")?,
        ))
    }

    /// Builds the style context this configuration describes.
    pub fn to_context(&self) -> StyleResult<GridStyleContext> {
        let ctx = GridStyleContext::with_defaults(self.columns, self.rows, self.defaults()?)?;
        Ok(ctx.with_ambient(self.ambient()?))
    }

    /// Builds a build pass with context and gutters set.
    pub fn to_pass<C>(&self) -> StyleResult<GridPass<C>> {
        let (column_gutter, row_gutter) = self.gutters()?;
        Ok(GridPass::new(self.to_context()?).with_gutters(column_gutter, row_gutter))
    }
}

fn celled<T: PropertyValue>(spec: OneOrMany<T>) -> Celled<T> {
    match spec {
        OneOrMany::One(value) => Celled::Value(value),
        OneOrMany::Many(mut values) if values.len() == 1 => Celled::Value(values.remove(0)),
        OneOrMany::Many(values) => Celled::Array(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{HAlign, Sides, VAlign};

    #[test]
    fn test_minimal_yaml() {
        let config = GridStyleConfig::from_yaml("columns: 2\nrows: 3\n").unwrap();
        assert_eq!(config.columns, 2);
        assert_eq!(config.rows, 3);
        let ctx = config.to_context().unwrap();
        assert_eq!(ctx.resolve_defaults(1, 2).unwrap(), crate::Styles::new());
    }

    #[test]
    fn test_constants_and_arrays() {
        let config = GridStyleConfig::from_yaml(
            r##"
columns: 3
rows: 1
align: right + bottom
fill: ["#ff0000", blue]
stroke: 2pt + black
inset: 5pt
"##,
        )
        .unwrap();
        let ctx = config.to_context().unwrap();

        let first = ctx.resolve_defaults(0, 0).unwrap();
        assert_eq!(first.align, Some(Align::new(HAlign::Right, VAlign::Bottom)));
        assert_eq!(first.fill, Some(Paint::RED));
        assert_eq!(first.stroke, Some(Stroke::new(Paint::BLACK, Length::pt(2.0))));
        assert_eq!(first.inset, Some(Inset::all(Length::pt(5.0))));

        assert_eq!(ctx.resolve_defaults(1, 0).unwrap().fill, Some(Paint::BLUE));
        assert_eq!(ctx.resolve_defaults(2, 0).unwrap().fill, Some(Paint::RED));
    }

    #[test]
    fn test_inset_sides_precedence() {
        let config = GridStyleConfig::from_yaml(
            "columns: 1\nrows: 1\ninset: { left: 1pt, x: 2pt, rest: 3pt }\n",
        )
        .unwrap();
        let ctx = config.to_context().unwrap();
        assert_eq!(
            ctx.resolve_defaults(0, 0).unwrap().inset,
            Some(Sides::new(
                Some(Length::pt(1.0)),
                Some(Length::pt(3.0)),
                Some(Length::pt(2.0)),
                Some(Length::pt(3.0)),
            ))
        );
    }

    #[test]
    fn test_partial_inset_leaves_sides_unset() {
        let config =
            GridStyleConfig::from_yaml("columns: 1\nrows: 1\ninset: { top: 4pt }\n").unwrap();
        let inset = config.to_context().unwrap().resolve_defaults(0, 0).unwrap().inset;
        assert_eq!(inset, Some(Inset::unset().with_top(Length::pt(4.0))));
    }

    #[test]
    fn test_negative_inset_rejected() {
        let config = GridStyleConfig::from_yaml("columns: 1\nrows: 1\ninset: -2pt\n").unwrap();
        assert!(matches!(
            config.to_context(),
            Err(StyleError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_array_rejected() {
        let config = GridStyleConfig::from_yaml("columns: 1\nrows: 1\nfill: []\n").unwrap();
        assert!(config.defaults().is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = GridStyleConfig::from_yaml("columns: 1\nrows: 1\ncolour: red\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_json_with_ambient() {
        let config = GridStyleConfig::from_json(
            r#"{
                "columns": 1,
                "rows": 1,
                "ambient": { "align": "center", "inset": "1pt", "fill": "white" }
            }"#,
        )
        .unwrap();
        let ambient = config.ambient().unwrap();
        assert_eq!(ambient.align.x, HAlign::Center);
        assert_eq!(ambient.align.y, VAlign::Top);
        assert_eq!(ambient.inset, Sides::splat(Length::pt(1.0)));
        assert_eq!(ambient.fill, Some(Paint::WHITE));
    }

    #[test]
    fn test_yaml_text_and_json_number_agree() {
        let yaml = GridStyleConfig::from_yaml("columns: 1\nrows: 1\ninset: 0.1pt\n").unwrap();
        let json = GridStyleConfig::from_json(r#"{ "columns": 1, "rows": 1, "inset": 0.1 }"#).unwrap();
        let resolve = |config: &GridStyleConfig| {
            config.to_context().unwrap().resolve_defaults(0, 0).unwrap().inset
        };
        assert_eq!(resolve(&yaml), Some(Inset::all(Length::pt(0.1))));
        assert_eq!(resolve(&yaml), resolve(&json));
    }

    #[test]
    fn test_gutters() {
        let config = GridStyleConfig::from_yaml(
            "columns: 2\nrows: 2\ncolumn-gutter: 4pt\nrow-gutter: [1pt, 2pt]\n",
        )
        .unwrap();
        let (columns, rows) = config.gutters().unwrap();
        assert_eq!(columns, vec![Length::pt(4.0)]);
        assert_eq!(rows, vec![Length::pt(1.0), Length::pt(2.0)]);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = GridStyleConfig::from_path("grid.toml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "toml"));
    }
}
