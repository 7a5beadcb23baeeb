//! Global timetable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STORAGE_KEY, DEFAULT_WINDOW_DAYS};
use crate::error::{TimetableError, TimetableResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/timetable";
static DEFAULT_REMINDER_TITLE: &str = "Timetable";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

fn default_reminder_title() -> String {
    DEFAULT_REMINDER_TITLE.to_string()
}

/// Configuration at ~/.config/timetable/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimetableConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// IANA zone name used to decide which day a class falls on.
    /// Defaults to the system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_window_days")]
    pub window_days: u32,

    #[serde(default = "default_reminder_title")]
    pub reminder_title: String,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        TimetableConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            timezone: None,
            window_days: default_window_days(),
            reminder_title: default_reminder_title(),
        }
    }
}

impl TimetableConfig {
    pub fn config_path() -> TimetableResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TimetableError::Config("Could not determine config directory".into()))?
            .join("timetable");

        Ok(config_dir.join("config.toml"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TimetableResult<()> {
        let contents = format!(
            "\
# timetable configuration

# Where classes and pending reminders are stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Storage slot holding the class list:
# storage_key = \"{DEFAULT_STORAGE_KEY}\"

# Time zone used to decide which day a class is on (defaults to the system zone):
# timezone = \"Europe/London\"

# Number of days in the weekly summary:
# window_days = {DEFAULT_WINDOW_DAYS}

# Title shown on reminders:
# reminder_title = \"{DEFAULT_REMINDER_TITLE}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TimetableError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TimetableError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
