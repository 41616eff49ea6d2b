use crate::data::persistence::{get_data_dir, Persistable};
use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// Used when a date cannot be rendered with the configured format.
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// chrono format string used when showing the selected range.
    pub date_format: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            date_format: "%-m/%-d/%Y".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_data_dir()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let settings = SettingsWrapper::load_from(dir)?.settings;
        settings.validate().with_context(|| {
            format!(
                "invalid settings in {}",
                dir.join(SettingsWrapper::filename()).display()
            )
        })?;
        Ok(settings)
    }

    /// Rejects a `date_format` chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            bail!("date_format {:?} is not a valid chrono format", self.date_format);
        }
        Ok(())
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }

    /// Formats with `date_format`, or as `YYYY-MM-DD` when that format is
    /// unusable.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.date_format)) {
            Ok(()) => out,
            Err(_) => date.format(FALLBACK_DATE_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.date_format, "%-m/%-d/%Y");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_format_date_uses_configured_format() {
        let date = NaiveDate::from_ymd_opt(2023, 8, 9).unwrap();
        assert_eq!(AppSettings::default().format_date(date), "8/9/2023");

        let iso = AppSettings {
            date_format: "%Y-%m-%d".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(iso.format_date(date), "2023-08-09");
    }

    #[test]
    fn test_format_date_with_bad_format_falls_back() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let bad = AppSettings {
            date_format: "%Q".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(bad.format_date(date), "2026-10-16");
    }

    #[test]
    fn test_validate_rejects_unknown_specifier() {
        let bad = AppSettings {
            date_format: "%Q".to_string(),
            ..AppSettings::default()
        };
        assert!(bad.validate().is_err());
        assert!(AppSettings::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_rejects_bad_date_format() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.yaml"),
            "settings:\n  date_format: \"%Q\"\n",
        )
        .unwrap();
        let err = AppSettings::load_from(tmp.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("config.yaml"), "{msg}");
        assert!(msg.contains("%Q"), "{msg}");
    }

    #[test]
    fn test_settings_wrapper_yaml_roundtrip() {
        let wrapper = SettingsWrapper {
            settings: AppSettings {
                date_format: "%d.%m.%Y".to_string(),
                log_level: "debug".to_string(),
            },
        };
        let yaml = serde_norway::to_string(&wrapper).unwrap();
        let parsed: SettingsWrapper = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(parsed.settings, wrapper.settings);
    }

    #[test]
    fn test_settings_wrapper_missing_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, AppSettings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let wrapper: SettingsWrapper =
            serde_norway::from_str("settings:\n  log_level: warn\n").unwrap();
        assert_eq!(wrapper.settings.log_level, "warn");
        assert_eq!(wrapper.settings.date_format, "%-m/%-d/%Y");
    }

    #[test]
    fn test_save_to_and_load_from() {
        let tmp = TempDir::new().unwrap();
        let settings = AppSettings {
            date_format: "%Y/%m/%d".to_string(),
            log_level: "trace".to_string(),
        };
        settings.save_to(tmp.path()).unwrap();
        assert_eq!(AppSettings::load_from(tmp.path()).unwrap(), settings);
    }
}
