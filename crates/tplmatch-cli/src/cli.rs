use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tplmatch",
    about = "Find workout templates in task descriptions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log more (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Largest compiled size of a single pattern, in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    pub size_limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match text against the templates in a JSON file
    Match(MatchArgs),

    /// Show how a template pattern is compiled
    Explain {
        /// Pattern to explain, with sub-patterns separated by ';'
        pattern: String,
    },
}

#[derive(Args)]
pub struct MatchArgs {
    /// JSON file with an array of {id, name, matchPattern} objects
    #[arg(short, long, value_name = "FILE")]
    pub templates: PathBuf,

    /// Text to match, or "-" to read from stdin
    #[arg(default_value = "-")]
    pub text: String,

    /// Print position, length and matched text of every match
    #[arg(short, long)]
    pub details: bool,

    /// Print the text with matched spans highlighted
    #[arg(long)]
    pub highlight: bool,

    /// Print matches as JSON
    #[arg(long, conflicts_with = "highlight")]
    pub json: bool,

    /// Match every line of the text on its own
    #[arg(short, long)]
    pub lines: bool,
}
