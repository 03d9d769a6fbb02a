//! Application configuration initialization command.
//!
//! Walks the user through the Jira connection and tracker settings, or with
//! `--delete` removes the saved configuration and the stored password.

use crate::{
    api::Jira,
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(short, long, help = "Delete the configuration and stored credentials")]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    // Handle deletion mode - exit early after cleanup
    if init_args.delete {
        Config::delete()?;
        Jira::forget_credentials()?;
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    // Run interactive configuration wizard
    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
