//! Converts a Jira time phrase into its canonical form and clock time.

use crate::libs::formatter::format_clock;
use crate::libs::messages::Message;
use crate::libs::phrase::{from_phrase, to_phrase};
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[arg(num_args = 1.., required = true, help = "Time phrase, e.g. 1d 2h 30m")]
    phrase: Vec<String>,
}

pub fn cmd(args: ConvertArgs) -> Result<()> {
    // Words may arrive unquoted, so put the phrase back together
    let time = from_phrase(&args.phrase.join(" "))?;

    msg_print!(Message::PhraseConverted(to_phrase(&time), format_clock(&time), time.to_whole_minutes()));
    Ok(())
}
