use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rSplitwatch
#[derive(Parser)]
#[command(
    name = "rsplitwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "A terminal stopwatch with nested subgoals and an Org-mode logbook",
    long_about = None
)]
pub struct Cli {
    /// Override the logbook path (useful for tests or a custom org file)
    #[arg(global = true, long = "log-file")]
    pub log_file: Option<String>,

    /// Override the maximum number of subgoals per session
    #[arg(global = true, long = "max-splits")]
    pub max_splits: Option<usize>,

    /// Override the logbook format
    #[arg(global = true, long = "format", value_enum)]
    pub format: Option<ExportFormat>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive stopwatch
    Run,

    /// Create the configuration directory and file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },
}
