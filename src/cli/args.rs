//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Ordered list and tree rendering playground
#[derive(Parser, Debug)]
#[command(name = "gormat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d (info), -dd (debug), -ddd (trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Config file (default: $XDG_CONFIG_HOME/gormat/gormat.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the sample tree
    Tree {
        /// Children per node (default from config)
        #[arg(short, long)]
        fan_out: Option<usize>,
        /// Indent with blanks instead of branch glyphs
        #[arg(long, conflicts_with = "both")]
        no_prefix: bool,
        /// Render with and without branch glyphs
        #[arg(long)]
        both: bool,
    },

    /// Replay the list walkthrough
    List {
        /// Initial line prefix glyph (default from config)
        #[arg(short, long)]
        prefix: Option<char>,
    },

    /// Render the sample tree and the list walkthrough
    Demo,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file location
    Path,
    /// Print a commented config template
    Template,
}
