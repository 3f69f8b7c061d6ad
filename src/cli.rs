use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, Settings};
use crate::depth_first::{traverse, Order};
use crate::load::{collect_inputs, load_tree, LoadError};
use crate::output::{render_to_string, render_traversal, render_tree, OutputError};
use crate::tree::Format;

/// Arbor - build ordered trees from nested JSON and walk them depth-first
#[derive(Parser)]
#[command(name = "arbor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print depth-first traversals of a tree
    Traverse {
        /// A JSON tree file, or a directory searched for *.json files
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Input format (detected from the input when omitted)
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Traversal order, may be repeated (default: pre, in and post)
        #[arg(short, long = "order", value_enum)]
        orders: Vec<Order>,

        /// Separator placed between names
        #[arg(short, long)]
        separator: Option<String>,

        /// Also print the tree itself
        #[arg(long)]
        tree: bool,
    },

    /// Draw a tree
    Render {
        /// A JSON tree file
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Input format (detected from the input when omitted)
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Write the drawing to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("No JSON files found under {0}")]
    NoInputs(String),

    #[error("{failed} of {total} inputs could not be read")]
    InputsFailed { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(self) -> Result<(), CliError> {
        let mut settings = Settings::discover()?;
        if let Some(source) = &settings.source {
            info!(config = %source.display(), "using config");
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Traverse {
                path,
                format,
                orders,
                separator,
                tree,
            } => {
                apply_traverse_flags(&mut settings, format, orders, separator, tree);
                traverse_path(&path, &settings, &mut out)
            }
            Commands::Render {
                path,
                format,
                output,
            } => render_path(
                &path,
                format.or(settings.format),
                output.as_deref(),
                &mut out,
            ),
        }
    }
}

/// Command line flags win over the config file
fn apply_traverse_flags(
    settings: &mut Settings,
    format: Option<Format>,
    orders: Vec<Order>,
    separator: Option<String>,
    tree: bool,
) {
    if format.is_some() {
        settings.format = format;
    }
    if !orders.is_empty() {
        settings.orders = orders;
    }
    if let Some(separator) = separator {
        settings.separator = separator;
    }
    settings.show_tree |= tree;
}

/// Write the traversal report for a file, or for every JSON file under a
/// directory. Malformed files in a directory are reported and skipped.
pub fn traverse_path<W: Write>(
    path: &Path,
    settings: &Settings,
    out: &mut W,
) -> Result<(), CliError> {
    let inputs = collect_inputs(path);
    if inputs.is_empty() {
        return Err(CliError::NoInputs(path.display().to_string()));
    }

    // A single file keeps plain output; a directory gets a header per file
    if !path.is_dir() {
        write!(out, "{}", traverse_file(&inputs[0], settings)?)?;
        return Ok(());
    }

    let total = inputs.len();
    let mut failed = 0;
    let mut written = 0;
    for input in &inputs {
        match traverse_file(input, settings) {
            Ok(report) => {
                if written > 0 {
                    writeln!(out)?;
                }
                written += 1;
                writeln!(out, "==> {} <==", input.display())?;
                write!(out, "{}", report)?;
            }
            Err(e) => {
                warn!(input = %input.display(), "skipping malformed input");
                eprintln!("Error: {e}");
                failed += 1;
            }
        }
    }

    info!(total, failed, "traversed inputs");
    if failed > 0 {
        return Err(CliError::InputsFailed { failed, total });
    }
    Ok(())
}

/// Draw a tree to `output` when given, otherwise to `out`
pub fn render_path<W: Write>(
    path: &Path,
    format: Option<Format>,
    output: Option<&Path>,
    out: &mut W,
) -> Result<(), CliError> {
    let root = load_tree(path, format)?;
    match output {
        Some(output_path) => {
            render_tree(&root, output_path)?;
            writeln!(out, "Rendered tree to: {:?}", output_path)?;
        }
        None => write!(out, "{}", render_to_string(&root))?,
    }
    Ok(())
}

/// Load one tree and produce its report: the optional drawing followed by
/// one line per requested order
pub fn traverse_file(path: &Path, settings: &Settings) -> Result<String, LoadError> {
    let root = load_tree(path, settings.format)?;

    let mut report = String::new();
    if settings.show_tree {
        report.push_str(&render_to_string(&root));
    }
    for &order in &settings.orders {
        let names = traverse(order, Some(&*root));
        report.push_str(&render_traversal(order, &names, &settings.separator));
        report.push('\n');
    }
    Ok(report)
}
