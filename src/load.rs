//! Reading serialized trees from disk

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::node::NodeRef;
use crate::tree::{Format, ShapeError, TreeBuilder};

/// Any JSON value used as a node name. Strings print without quotes,
/// everything else prints as compact JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Label(pub serde_json::Value);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Shape { path: PathBuf, source: ShapeError },

    #[error("{}: cannot tell the tree format, expected a JSON array or object (use --format)", .path.display())]
    UnknownFormat { path: PathBuf },
}

/// List the JSON inputs named by `path`: the file itself, or every `*.json`
/// file below a directory in file name order
pub fn collect_inputs(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    let mut inputs = Vec::new();
    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() {
            if let Some(ext) = entry.path().extension() {
                if ext == "json" {
                    inputs.push(entry.path().to_path_buf());
                }
            }
        }
    }

    debug!(dir = %path.display(), count = inputs.len(), "collected inputs");
    inputs
}

/// Read a tree from a JSON file. Without an explicit format the first
/// significant character decides: `[` for nested pairs, `{` for records.
pub fn load_tree(path: &Path, format: Option<Format>) -> Result<NodeRef<Label>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = match format.or_else(|| Format::detect(&text)) {
        Some(format) => format,
        None => {
            return Err(LoadError::UnknownFormat {
                path: path.to_path_buf(),
            })
        }
    };
    trace!(path = %path.display(), %format, "loading tree");

    TreeBuilder::new(format)
        .parse(&text)
        .map_err(|source| LoadError::Shape {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_display() {
        assert_eq!(Label(json!("a")).to_string(), "a");
        assert_eq!(Label(json!(3)).to_string(), "3");
        assert_eq!(Label(json!(null)).to_string(), "null");
        assert_eq!(Label(json!(["x"])).to_string(), "[\"x\"]");
    }

    #[test]
    fn test_collect_single_file() {
        let path = Path::new("tree.txt");
        assert_eq!(collect_inputs(path), vec![path.to_path_buf()]);
    }

    #[test]
    fn test_collect_directory_sorted_json_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("sub").join("c.json"), "[]").unwrap();

        let inputs = collect_inputs(dir.path());

        assert_eq!(
            inputs,
            vec![
                dir.path().join("a.json"),
                dir.path().join("b.json"),
                dir.path().join("sub").join("c.json"),
            ]
        );
    }

    #[test]
    fn test_load_detects_format() {
        let dir = tempfile::tempdir().unwrap();
        let array = dir.path().join("array.json");
        let object = dir.path().join("object.json");
        fs::write(&array, r#"["a", [["b", []]]]"#).unwrap();
        fs::write(&object, r#"{"name": "a", "children": [{"name": "b", "children": []}]}"#)
            .unwrap();

        let from_array = load_tree(&array, None).unwrap();
        let from_object = load_tree(&object, None).unwrap();

        assert_eq!(from_array.name().to_string(), "a");
        assert_eq!(from_object.child(0).unwrap().name().to_string(), "b");
    }

    #[test]
    fn test_load_reports_path_and_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[\"a\",\n [[\"b\"]]]").unwrap();

        let error = load_tree(&path, None).unwrap_err();

        match &error {
            LoadError::Shape { source, .. } => {
                assert_eq!(source.format, Format::Array);
                assert_eq!(source.location.map(|l| l.line), Some(2));
            }
            other => panic!("Expected a shape error, got {:?}", other),
        }
        assert!(error.to_string().contains("bad.json"));
    }

    #[test]
    fn test_load_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar.json");
        fs::write(&path, "42").unwrap();

        assert!(matches!(
            load_tree(&path, None),
            Err(LoadError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_tree(Path::new("does/not/exist.json"), Some(Format::Array)),
            Err(LoadError::Io { .. })
        ));
    }
}
