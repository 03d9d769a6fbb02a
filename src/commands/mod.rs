pub mod convert;
pub mod init;
pub mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Start tracking and log time interactively")]
    Run(run::RunArgs),
    #[command(about = "Convert a Jira time phrase such as '1d 2h 30m'")]
    Convert(convert::ConvertArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Run(args) => run::cmd(args).await,
            Commands::Convert(args) => convert::cmd(args),
        }
    }
}
