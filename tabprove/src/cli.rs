use clap::Parser;
use std::path::PathBuf;

/// Decide first-order arguments by proof trees
///
/// The premises and the conclusion are read from the given file,
/// one formula per line, the conclusion coming last.
/// Without a file, they are asked for interactively.
///
/// Set the environment variable "LOG" to "info", "debug", or "trace"
/// to obtain an increasingly detailed log.
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Stop proof generation once the tree has this many nodes
    ///
    /// Arguments with quantifiers may yield infinite trees,
    /// in which case generation only ends with this option.
    /// If the tree is still open when the limit is reached,
    /// the argument type is reported as unknown.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Show formulae of the tree in infix notation
    #[arg(long)]
    pub infix: bool,

    /// Do not show the proof tree
    #[arg(long)]
    pub no_tree: bool,

    /// Write the proof tree to given file
    #[arg(short)]
    pub output: Option<PathBuf>,

    /// Write proof generation statistics in JSON format to given file
    #[arg(long)]
    pub stats: Option<PathBuf>,

    /// Path of the argument file
    pub file: Option<PathBuf>,
}

impl Cli {
    pub fn output(&self, out: impl std::fmt::Display) -> Result<(), std::io::Error> {
        use std::io::Write;
        match &self.output {
            Some(o) => std::fs::write(o, out.to_string()),
            None => write!(std::io::stdout(), "{}", out),
        }
    }
}
