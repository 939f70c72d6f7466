//! Clap derive structures for the `librero` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// librero -- manage a book collection server from the command line
#[derive(Debug, Parser)]
#[command(
    name = "librero",
    version,
    about = "Manage a book collection from the command line",
    long_about = "A CLI for a book collection REST server.\n\n\
        Talks to the /api/libros endpoint of the configured server;\n\
        see `librero --help` and the [server] section of the config file.",
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
    /// Server base URL (overrides the config file)
    #[arg(long, short = 's', env = "LIBRERO_SERVER_URL", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LIBRERO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "LIBRERO_SERVER_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all books
    #[command(alias = "ls")]
    List,

    /// Show a single book
    Show {
        /// Book id
        id: i64,
    },

    /// Add a new book
    Add {
        #[command(flatten)]
        fields: BookFields,
    },

    /// Edit an existing book
    Edit {
        /// Book id
        id: i64,

        #[command(flatten)]
        fields: BookFieldOverrides,
    },

    /// Delete a book
    #[command(alias = "delete")]
    Rm {
        /// Book id
        id: i64,
    },
}

/// All four book fields, required (for `add`).
#[derive(Debug, Args)]
pub struct BookFields {
    /// Title
    #[arg(long)]
    pub titulo: String,

    /// Author
    #[arg(long)]
    pub autor: String,

    /// Publication year
    #[arg(long = "anio")]
    pub anio_publicacion: String,

    /// Genre
    #[arg(long)]
    pub genero: String,
}

/// Optional field overrides (for `edit`); unset fields keep their value.
#[derive(Debug, Args)]
pub struct BookFieldOverrides {
    /// New title
    #[arg(long)]
    pub titulo: Option<String>,

    /// New author
    #[arg(long)]
    pub autor: Option<String>,

    /// New publication year
    #[arg(long = "anio")]
    pub anio_publicacion: Option<String>,

    /// New genre
    #[arg(long)]
    pub genero: Option<String>,
}
