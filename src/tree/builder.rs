//! Recursive tree builder

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use super::shape::{Format, Pair, Record, Shape, ShapeError};
use crate::node::{Node, NodeRef};

/// Build a node tree from any recursive shape, depth first, keeping child order
pub fn build<S: Shape>(shape: S) -> NodeRef<S::Label> {
    let (label, children) = shape.into_parts();
    let node = Node::new(label);
    for child in children {
        node.add_child(build(child));
    }
    node
}

impl<N> Pair<N> {
    pub fn into_node(self) -> NodeRef<N> {
        build(self)
    }
}

impl<N> Record<N> {
    pub fn into_node(self) -> NodeRef<N> {
        build(self)
    }
}

/// Build a tree from the nested-pair form `[label, [child, ...]]`
pub fn array_to_node<N: DeserializeOwned>(input: Value) -> Result<NodeRef<N>, ShapeError> {
    TreeBuilder::new(Format::Array).parse_value(input)
}

/// Build a tree from the labeled-record form `{"name": label, "children": [...]}`
pub fn object_to_node<N: DeserializeOwned>(input: Value) -> Result<NodeRef<N>, ShapeError> {
    TreeBuilder::new(Format::Object).parse_value(input)
}

/// Validates serialized input of one format and builds its tree.
///
/// Input is checked in full before any node is created, so a malformed
/// input never yields a partial tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    format: Format,
}

impl TreeBuilder {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn parse_value<N: DeserializeOwned>(&self, input: Value) -> Result<NodeRef<N>, ShapeError> {
        let root = match self.format {
            Format::Array => serde_json::from_value::<Pair<N>>(input).map(build),
            Format::Object => serde_json::from_value::<Record<N>>(input).map(build),
        };
        root.map_err(|e| ShapeError::from_serde_error(self.format, &e))
    }

    /// Parse JSON text. Errors carry the line and column of the offending input.
    pub fn parse<N: DeserializeOwned>(&self, text: &str) -> Result<NodeRef<N>, ShapeError> {
        trace!(format = %self.format, bytes = text.len(), "parsing tree");
        let root = match self.format {
            Format::Array => from_text::<Pair<N>>(text).map(build),
            Format::Object => from_text::<Record<N>>(text).map(build),
        };
        root.map_err(|e| ShapeError::from_serde_error(self.format, &e))
    }
}

// Nesting depth is bounded only by the input; each pair level is two JSON arrays deep
fn from_text<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}
