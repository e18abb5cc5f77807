//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Build optimal prefix-free (Huffman) codes from symbol frequencies
#[derive(Parser, Debug)]
#[command(name = "huffcode")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Additional config file (layered over the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Token delimiter, overrides config
    #[arg(long, global = true)]
    pub delimiter: Option<char>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the code of every symbol
    Codes {
        #[command(flatten)]
        input: InputArgs,
        /// Do not print the frequency list first
        #[arg(long)]
        no_frequencies: bool,
    },

    /// Show the Huffman tree
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show code length statistics
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },

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

/// Where the frequency list comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Frequency list such as "a:5;b:9;c:12" ("-" or omitted: read stdin)
    pub input: Option<String>,

    /// Read the frequency list from a file
    #[arg(short, long, conflicts_with = "input", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
    /// Print a commented config template
    Template,
}
