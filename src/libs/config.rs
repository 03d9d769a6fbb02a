//! Configuration management for the jtl application.
//!
//! Settings are stored as pretty-printed JSON in the platform data directory
//! (see [`DataStorage`]). Every section is optional so a fresh install runs
//! with defaults and only asks for what it needs.
//!
//! ## Configuration Structure
//!
//! - **Jira**: instance URL, REST API path and login. The password is kept
//!   out of this file and handled by [`crate::libs::secret::Secret`].
//! - **Tracker**: reminder frequency and the size of the activity log.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use jtl::libs::config::Config;
//!
//! let config = Config::read()?;
//! let settings = config.tracker.clone().unwrap_or_default();
//! println!("Reminding every {} minutes", settings.reminder_frequency);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::jira::JiraConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A module selectable in the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Behaviour of the time tracker itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Minutes of unlogged time between reminders. Zero disables reminders.
    pub reminder_frequency: u64,

    /// Number of activity log entries kept before the oldest is dropped.
    pub max_logs: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            reminder_frequency: 30,
            max_logs: 50,
        }
    }
}

impl TrackerConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "tracker".to_string(),
            name: "Tracker".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleTracker);
        Ok(Self {
            reminder_frequency: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptReminderFrequency.to_string())
                .default(default.reminder_frequency)
                .interact_text()?,
            max_logs: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMaxLogs.to_string())
                .default(default.max_logs)
                .interact_text()?,
        })
    }
}

/// Root configuration document.
///
/// Unconfigured sections are omitted from the JSON output.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker: Option<TrackerConfig>,
}

impl Config {
    /// Reads the configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. A missing file is not an error.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive setup wizard, starting from the saved values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [JiraConfig::module(), TrackerConfig::module()];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "jira" => config.jira = Some(JiraConfig::init(&config.jira)?),
                "tracker" => config.tracker = Some(TrackerConfig::init(&config.tracker)?),
                _ => {}
            }
        }

        Ok(config)
    }

    /// Tracker settings, defaulted when the section is missing.
    pub fn tracker_or_default(&self) -> TrackerConfig {
        self.tracker.clone().unwrap_or_default()
    }
}
