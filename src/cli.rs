use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deskpad", version, about = "Terminal calendar notes and task list")]
pub struct Cli {
    /// Directory holding the notes and tasks files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Config file (defaults to config.yml in the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `deskpad=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive dashboard
    Tui,
    /// Print a month with note markers
    Month {
        /// Year to show (defaults to the current year)
        #[arg(long, requires = "month")]
        year: Option<i32>,
        /// Month to show, 1-12 (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// List notes and tasks
    List,
    /// Set the note for a date; an empty or missing message removes it
    Note {
        /// Date in YYYY-MM-DD format
        date: String,
        /// Note text
        message: Option<String>,
    },
    /// Add a task to the top of the list
    Add {
        /// Task text
        text: String,
    },
    /// Toggle a task's completed flag
    Toggle {
        /// Task index as shown by `list`
        index: usize,
    },
    /// Delete a task
    Remove {
        /// Task index as shown by `list`
        index: usize,
    },
}
