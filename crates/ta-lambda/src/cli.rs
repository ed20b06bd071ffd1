//! CLI argument definitions using clap derive API

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use ta_core::config::parse_log_level;
use ta_lambda::HandlerName;

/// Trusted Advisor Explorer - pipeline handlers for AWS Lambda
#[derive(Parser, Debug)]
#[command(name = "tae")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute (default: serve)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Handler to run
    #[arg(long, global = true, env = "_HANDLER", value_enum)]
    pub handler: Option<HandlerName>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl GlobalArgs {
    pub fn level(&self) -> Result<LevelFilter> {
        Ok(parse_log_level(&self.log_level)?)
    }

    pub fn require_handler(&self) -> Result<HandlerName> {
        self.handler
            .context("No handler selected; pass --handler or set _HANDLER")
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the selected handler under the Lambda runtime
    Serve,

    /// Run the selected handler once against a local event file
    Invoke(InvokeArgs),

    /// Print the Athena view statements without submitting them
    RenderViews(RenderViewsArgs),
}

/// Arguments for the invoke command
#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// JSON event file (default: empty object)
    #[arg(short, long)]
    pub event: Option<PathBuf>,
}

/// Arguments for the render-views command
#[derive(Args, Debug)]
pub struct RenderViewsArgs {
    /// Comma-separated tag keys to add as view columns
    #[arg(short, long, env = "Tags")]
    pub tags: Option<String>,

    /// Render as if the tags table exists in the database
    #[arg(long)]
    pub tags_table_present: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "sql")]
    pub output: RenderOutput,
}

/// Render output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutput {
    /// Statements separated by semicolons
    Sql,
    /// Statements with their parsed-back shape
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
