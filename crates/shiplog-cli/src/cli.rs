use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shiplog_types::LogId;

#[derive(Parser)]
#[command(
    name = "shiplog",
    about = "Ship log: bounded append-only log groups",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the snapshot and journal (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a log group
    Create(CreateArgs),
    /// Append a message to the log an id resolves to
    Append(AppendArgs),
    /// Show log groups and their entries
    Show(ShowArgs),
    /// List log types
    Types,
    /// Show the most recent entries across all logs
    Timeline(TimelineArgs),
    /// Delete one log group by handle
    Delete(DeleteArgs),
    /// Delete every log group of a type
    DeleteType(DeleteTypeArgs),
    /// Write a snapshot and truncate the journal
    Save,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Log id; pass "" for an unnamed log
    pub id: String,
    pub name: String,
    pub log_type: String,
    /// Remove existing logs with the same id, name and type first
    #[arg(long)]
    pub overwrite: bool,
    /// Keep at most this many entries (0 or negative for unbounded)
    #[arg(long, allow_negative_numbers = true)]
    pub max_len: Option<i64>,
}

#[derive(Args)]
pub struct AppendArgs {
    pub id: String,
    pub message: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Only the log this id resolves to
    #[arg(long)]
    pub id: Option<String>,
    /// Only logs of this type
    #[arg(long = "type")]
    pub log_type: Option<String>,
}

#[derive(Args)]
pub struct TimelineArgs {
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Handle, e.g. `log#3` or `3`
    pub handle: LogId,
}

#[derive(Args)]
pub struct DeleteTypeArgs {
    pub log_type: String,
}
