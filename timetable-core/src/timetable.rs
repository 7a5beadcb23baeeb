//! Timetable root: resolved configuration and access to storage.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use config::{Config, File};

use crate::constants::MAX_WINDOW_DAYS;
use crate::error::{TimetableError, TimetableResult};
use crate::manager::ClassManager;
use crate::reminder::ReminderQueue;
use crate::store::{ClassStore, FileSlotStore};
use crate::timetable_config::TimetableConfig;

#[derive(Clone)]
pub struct Timetable {
    config: TimetableConfig,
    timezone: Tz,
}

impl Timetable {
    /// Load ~/.config/timetable/config.toml, creating it on first run.
    pub fn load() -> TimetableResult<Self> {
        let config_path = TimetableConfig::config_path()?;

        if !config_path.exists() {
            TimetableConfig::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> TimetableResult<Self> {
        let config: TimetableConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| TimetableError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TimetableError::Config(e.to_string()))?;

        Self::from_config(config)
    }

    pub fn from_config(config: TimetableConfig) -> TimetableResult<Self> {
        if !(1..=MAX_WINDOW_DAYS).contains(&config.window_days) {
            return Err(TimetableError::Config(format!(
                "window_days must be between 1 and {MAX_WINDOW_DAYS}, got {}",
                config.window_days
            )));
        }

        let timezone = match &config.timezone {
            Some(name) => Tz::from_str(name)
                .map_err(|_| TimetableError::Config(format!("Unknown time zone '{name}'")))?,
            None => system_timezone(),
        };

        Ok(Timetable { config, timezone })
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Data directory in display-friendly form, keeping `~` unexpanded.
    pub fn display_path(&self) -> PathBuf {
        self.config.data_dir.clone()
    }

    pub fn slots(&self) -> FileSlotStore {
        FileSlotStore::new(self.data_path())
    }

    pub fn open_classes(&self) -> ClassManager<FileSlotStore> {
        ClassManager::open(ClassStore::new(self.slots(), self.config.storage_key.clone()))
    }

    pub fn open_reminders(&self) -> ReminderQueue<FileSlotStore> {
        ReminderQueue::open(self.slots())
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    /// Calendar date of `now` in the configured zone.
    pub fn date_of(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    pub fn window_days(&self) -> u32 {
        self.config.window_days
    }

    pub fn reminder_title(&self) -> &str {
        &self.config.reminder_title
    }
}

fn system_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => Tz::from_str(&name).unwrap_or_else(|_| {
            log::warn!("System time zone '{name}' is not recognised, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            log::warn!("Could not determine system time zone ({e}), using UTC");
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_STORAGE_KEY;
    use chrono::TimeZone;

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let timetable = Timetable::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(timetable.config().storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(timetable.window_days(), 7);
        assert_eq!(timetable.reminder_title(), "Timetable");
    }

    #[test]
    fn commented_default_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable/config.toml");
        TimetableConfig::create_default_config(&path).unwrap();

        let timetable = Timetable::load_from(&path).unwrap();
        assert_eq!(timetable.display_path(), PathBuf::from("~/.local/share/timetable"));
    }

    #[test]
    fn config_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                "data_dir = \"{}\"\nstorage_key = \"classes\"\ntimezone = \"Asia/Kolkata\"\nwindow_days = 3\n",
                dir.path().join("data").display()
            ),
        )
        .unwrap();

        let timetable = Timetable::load_from(&path).unwrap();
        assert_eq!(timetable.window_days(), 3);
        assert_eq!(*timetable.timezone(), chrono_tz::Asia::Kolkata);

        // 20:00 UTC is past midnight in India
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        assert_eq!(timetable.date_of(now), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());

        let mut classes = timetable.open_classes();
        assert_eq!(classes.len(), 7);
        let first = classes.classes()[0].clone();
        classes.delete_record(&first);
        assert!(dir.path().join("data/classes.json").exists());
    }

    #[test]
    fn window_days_out_of_range_is_a_config_error() {
        for window_days in [0, MAX_WINDOW_DAYS + 1, u32::MAX] {
            let config = TimetableConfig {
                window_days,
                ..TimetableConfig::default()
            };
            assert!(matches!(
                Timetable::from_config(config),
                Err(TimetableError::Config(_))
            ));
        }

        let config = TimetableConfig {
            window_days: MAX_WINDOW_DAYS,
            timezone: Some("UTC".into()),
            ..TimetableConfig::default()
        };
        assert!(Timetable::from_config(config).is_ok());
    }

    #[test]
    fn unknown_timezone_is_a_config_error() {
        let config = TimetableConfig {
            timezone: Some("Mars/Olympus".into()),
            ..TimetableConfig::default()
        };

        assert!(matches!(
            Timetable::from_config(config),
            Err(TimetableError::Config(_))
        ));
    }
}
