use super::activity_log::ActivityLog;
use super::formatter::{format_clock, format_hours_minutes};
use super::phrase::to_phrase;
use super::service::Status;
use anyhow::Result;
use prettytable::{format, row, Table};

pub struct View {}

impl View {
    pub fn status(status: &Status) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row!["", "PHRASE", "CLOCK"]);
        table.add_row(row!["Unlogged", to_phrase(&status.time), format_clock(&status.time)]);
        table.add_row(row!["Logged", to_phrase(&status.logged_total), format_hours_minutes(&status.logged_total)]);
        table.add_row(row!["Total", to_phrase(&status.grand_total), format_hours_minutes(&status.grand_total)]);
        table.add_row(row!["Timer", if status.running { "running" } else { "paused" }, ""]);
        table.printstd();

        Ok(())
    }

    pub fn activity_logs(logs: &[ActivityLog]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TIME", "LEVEL", "MESSAGE"]);
        for log in logs.iter().rev() {
            table.add_row(row![log.logged_at.format("%H:%M:%S"), log.level, log.message]);
        }
        table.printstd();

        Ok(())
    }
}
