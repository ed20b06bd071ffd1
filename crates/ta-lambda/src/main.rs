//! tae - Trusted Advisor Explorer Lambda binary

use anyhow::Result;
use clap::Parser;
use simple_logger::SimpleLogger;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{invoke, render_views, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new().with_level(cli.global.level()?).init()?;

    match &cli.command {
        None | Some(Commands::Serve) => serve::execute(&cli.global).await,
        Some(Commands::Invoke(args)) => invoke::execute(args, &cli.global).await,
        Some(Commands::RenderViews(args)) => render_views::execute(args),
    }
}
