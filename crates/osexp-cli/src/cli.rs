//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "osexp",
    version,
    about = "A simple OS file explorer with trash management."
)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). OSEXP_LOG overrides it.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: $OSEXP_CONFIG or ~/.config/osexp/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List directory entries
    List {
        /// Path to list
        path: PathBuf,
        /// Include hidden files (names starting with .)
        #[arg(short, long)]
        all: bool,
        /// Reverse the sort order (directories stay first)
        #[arg(short, long)]
        reverse: bool,
    },

    /// Show basic info about a file or directory
    Info {
        /// File or directory path
        path: PathBuf,
    },

    /// Print a directory tree
    Tree {
        /// Root directory path
        path: PathBuf,
        /// Deepest level to descend to (0 = direct children only)
        #[arg(long)]
        depth: Option<usize>,
        /// Include hidden files
        #[arg(short, long)]
        all: bool,
    },

    /// Find files whose names contain a given substring
    Search {
        /// Where to start searching
        path: PathBuf,
        /// Substring to search for in file names
        name_substring: String,
        /// Include hidden files
        #[arg(short, long)]
        all: bool,
    },

    /// Delete a file or directory (moves it to trash)
    Rm {
        /// File or directory path to move to trash
        path: PathBuf,
        /// Directory holding the .trash folder (default: current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Restore a file or directory from trash
    Restore {
        /// Name (or trailing path) of the item to restore
        name: String,
        /// Directory holding the .trash folder (default: current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Show disk usage of a file or directory
    Du {
        /// File or directory path
        path: PathBuf,
        /// Also show usage for every immediate child
        #[arg(short, long)]
        all: bool,
    },

    /// Show what is in the trash, newest first
    TrashList {
        /// Directory holding the .trash folder (default: current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
}
