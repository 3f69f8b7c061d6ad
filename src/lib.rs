//! Ordered multi-child trees built from nested JSON, with depth-first traversals.
//!
//! ```
//! use arbor::depth_first::{in_order, post_order, pre_order};
//! use arbor::tree::array_to_node;
//! use serde_json::json;
//!
//! let root = array_to_node::<String>(json!(["A", [["B", [["D", []], ["E", []]]], ["C", []]]]))
//!     .unwrap();
//!
//! assert_eq!(pre_order(Some(&*root)), ["A", "B", "D", "E", "C"]);
//! assert_eq!(in_order(Some(&*root)), ["D", "B", "E", "A", "C"]);
//! assert_eq!(post_order(Some(&*root)), ["D", "E", "B", "C", "A"]);
//! ```

pub mod cli;
pub mod config;
pub mod depth_first;
pub mod load;
pub mod node;
pub mod output;
pub mod tree;

pub use node::{Node, NodeRef};
pub use tree::{array_to_node, object_to_node, ShapeError};
