//! Tree construction from serialized shapes

mod builder;
mod shape;

pub use builder::{array_to_node, build, object_to_node, TreeBuilder};
pub use shape::{Format, Location, Pair, Record, Shape, ShapeError};
