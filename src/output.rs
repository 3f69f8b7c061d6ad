//! Tree and traversal output rendering

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::depth_first::Order;
use crate::node::Node;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Render a tree and write it to file
pub fn render_tree<N: fmt::Display>(root: &Node<N>, output_path: &Path) -> Result<(), OutputError> {
    let content = render_to_string(root);

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(output_path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

/// Render a tree to a string, root on the first line and one node per line below
pub fn render_to_string<N: fmt::Display>(root: &Node<N>) -> String {
    let mut output = String::new();
    output.push_str(&root.name().to_string());
    output.push('\n');
    render_children(root, &mut output, "");
    output
}

fn render_children<N: fmt::Display>(node: &Node<N>, output: &mut String, prefix: &str) {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(connector);
        output.push_str(&child.name().to_string());
        output.push('\n');

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        render_children(child, output, &child_prefix);
    }
}

/// Render one traversal as `<order>: <names joined by separator>`
pub fn render_traversal<N: fmt::Display>(order: Order, names: &[N], separator: &str) -> String {
    let joined = names
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>()
        .join(separator);
    format!("{}: {}", order, joined)
}
