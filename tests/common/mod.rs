//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use arbor::depth_first::{traverse, Order};
use arbor::load::Label;
use arbor::tree::{Format, TreeBuilder};
use arbor::NodeRef;

/// Get the path to the testdata directory
pub fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Build a tree from a fixture in the testdata directory
pub fn load_fixture(name: &str, format: Format) -> NodeRef<Label> {
    let path = testdata_dir().join(name);
    let text = fs::read_to_string(&path).expect("Failed to read fixture");

    TreeBuilder::new(format)
        .parse(&text)
        .expect("Fixture should be a well-formed tree")
}

/// Names visited by `order`, rendered as plain strings
pub fn visit(root: &NodeRef<Label>, order: Order) -> Vec<String> {
    traverse(order, Some(&**root))
        .iter()
        .map(|label| label.to_string())
        .collect()
}
