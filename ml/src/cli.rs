//! CLI argument parsing for the madlib console host

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ml")]
#[command(author, version, about = "Madlib templates filled from random field pools", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// SQLite database path (overrides config)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Bot nickname used to detect addressed lines (overrides config)
    #[arg(short, long)]
    pub nick: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat console (default)
    Chat,

    /// Send a single message and print the replies
    Say {
        /// Message text; words after the first may start with `-`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,

        /// Deliver the message without addressing the bot
        #[arg(short, long)]
        unaddressed: bool,
    },
}
