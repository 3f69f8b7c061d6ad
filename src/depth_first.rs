//! Depth-first linearizations of a node tree
//!
//! Every function takes an optional root and returns a freshly computed
//! `Vec` of names. An absent root yields an empty sequence.

use serde::Deserialize;
use std::fmt;

use crate::node::Node;

/// Traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Node before its children
    Pre,
    /// First child, node, then the remaining children
    In,
    /// Children before the node
    Post,
}

impl Order {
    pub const ALL: [Order; 3] = [Order::Pre, Order::In, Order::Post];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Pre => write!(f, "pre"),
            Order::In => write!(f, "in"),
            Order::Post => write!(f, "post"),
        }
    }
}

/// Run the traversal named by `order`
pub fn traverse<N: Clone>(order: Order, root: Option<&Node<N>>) -> Vec<N> {
    match order {
        Order::Pre => pre_order(root),
        Order::In => in_order(root),
        Order::Post => post_order(root),
    }
}

/// Node name, then the pre-order of each child in turn
pub fn pre_order<N: Clone>(root: Option<&Node<N>>) -> Vec<N> {
    let mut out = Vec::new();
    if let Some(node) = root {
        visit_pre(node, &mut out);
    }
    out
}

fn visit_pre<N: Clone>(node: &Node<N>, out: &mut Vec<N>) {
    out.push(node.name().clone());
    for child in node.children().iter() {
        visit_pre(child, out);
    }
}

/// Post-order of each child in turn, then the node name
pub fn post_order<N: Clone>(root: Option<&Node<N>>) -> Vec<N> {
    let mut out = Vec::new();
    if let Some(node) = root {
        visit_post(node, &mut out);
    }
    out
}

fn visit_post<N: Clone>(node: &Node<N>, out: &mut Vec<N>) {
    for child in node.children().iter() {
        visit_post(child, out);
    }
    out.push(node.name().clone());
}

/// In-order generalized to any number of children.
///
/// The first child plays the role of the left subtree and every remaining
/// child, left to right, the role of the right subtree:
/// `in_order(first) ++ [name] ++ in_order(rest...)`. With exactly two
/// children this is the classic binary in-order. Note that this is not a
/// "split the children in half" scheme: a node with four children emits
/// its name after the first child only.
pub fn in_order<N: Clone>(root: Option<&Node<N>>) -> Vec<N> {
    let mut out = Vec::new();
    if let Some(node) = root {
        visit_in(node, &mut out);
    }
    out
}

fn visit_in<N: Clone>(node: &Node<N>, out: &mut Vec<N>) {
    let children = node.children();
    let Some((first, rest)) = children.split_first() else {
        out.push(node.name().clone());
        return;
    };

    visit_in(first, out);
    out.push(node.name().clone());
    for child in rest {
        visit_in(child, out);
    }
}
