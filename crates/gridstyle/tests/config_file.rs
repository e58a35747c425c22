//! Loading grid style arguments from files on disk.

use std::fs;

use gridstyle::{Cell, ConfigError, GridStyleConfig, HAlign, Length, Paint, Sides, VAlign};
use tempfile::TempDir;

const YAML: &str = r##"
columns: 2
rows: 2
align: center
fill: ["#00ffff", white]
inset: { x: 6pt, y: 2pt }
column-gutter: 3pt
ambient:
  align: bottom
"##;

#[test]
fn test_yaml_file_drives_a_pass() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.yaml");
    fs::write(&path, YAML).unwrap();

    let config = GridStyleConfig::from_path(&path).unwrap();
    let mut pass = config.to_pass().unwrap();
    pass.place(Cell::new(0, 0, "a")).unwrap();
    pass.place(Cell::new(1, 0, "b").with_fill(Paint::RED)).unwrap();
    pass.place(Cell::new(1, 1, "d")).unwrap();
    let grid = pass.finish().unwrap();

    let a = grid.cell(0, 0).unwrap();
    assert_eq!(a.style.align.x, HAlign::Center);
    assert_eq!(a.style.align.y, VAlign::Bottom);
    assert_eq!(a.style.fill, Some(Paint::AQUA));
    assert_eq!(
        a.style.inset,
        Sides::new(
            Length::pt(6.0),
            Length::pt(2.0),
            Length::pt(6.0),
            Length::pt(2.0)
        )
    );

    assert_eq!(grid.cell(1, 0).unwrap().style.fill, Some(Paint::RED));
    assert_eq!(grid.cell(1, 1).unwrap().style.fill, Some(Paint::WHITE));
    assert_eq!(grid.column_gutter, vec![Length::pt(3.0)]);
    assert!(grid.row_gutter.is_empty());
}

#[test]
fn test_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.json");
    fs::write(
        &path,
        r#"{ "columns": 1, "rows": 1, "stroke": "2pt + blue" }"#,
    )
    .unwrap();

    let config = GridStyleConfig::from_path(&path).unwrap();
    let ctx = config.to_context().unwrap();
    let stroke = ctx.resolve_defaults(0, 0).unwrap().stroke.unwrap();
    assert_eq!(stroke.paint, Paint::BLUE);
    assert_eq!(stroke.thickness, Length::pt(2.0));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = GridStyleConfig::from_path(dir.path().join("absent.yml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.yml");
    fs::write(&path, "columns: [1\n").unwrap();
    assert!(matches!(
        GridStyleConfig::from_path(&path),
        Err(ConfigError::Yaml(_))
    ));
}
