//! Clap derive structures for the `taskdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use taskdeck_core::FilterMode;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// taskdeck -- a persisted to-do list plus a searchable view of remote users and posts
#[derive(Debug, Parser)]
#[command(
    name = "taskdeck",
    version,
    about = "Track tasks and browse remote users and posts from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "TASKDECK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Config file to read instead of the platform default
    #[arg(long, env = "TASKDECK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory tasks are stored in
    #[arg(long, env = "TASKDECK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the remote users/posts API
    #[arg(long, env = "TASKDECK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TASKDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Items per page for users and posts
    #[arg(long, global = true)]
    pub page_size: Option<usize>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the local task list
    #[command(alias = "t")]
    Tasks(TasksArgs),

    /// Browse remote users
    #[command(alias = "u")]
    Users(RemoteListArgs),

    /// Browse remote posts
    #[command(alias = "p")]
    Posts(RemoteListArgs),

    /// Inspect and create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Tasks ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: TasksCommand,
}

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// Add a task (words are joined with spaces)
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Flip a task between active and completed
    Toggle { id: u64 },

    /// Delete a task
    #[command(alias = "rm")]
    Remove { id: u64 },

    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Which tasks to show
        #[arg(long, short = 'f', default_value = "all")]
        filter: FilterArg,

        /// Only tasks whose text contains this term (case-insensitive)
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show task totals
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for FilterMode {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::Active => Self::Active,
            FilterArg::Completed => Self::Completed,
        }
    }
}

// ── Remote collections ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RemoteListArgs {
    /// Case-insensitive substring to match
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page to show (1-based)
    #[arg(long, short = 'p', default_value = "1")]
    pub page: usize,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration (file + env + flags)
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
