use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Weekdays a timetable covers, in column order.
pub const DEFAULT_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// One-hour teaching periods from 9:00 to 4:00, in row order.
pub const DEFAULT_TIME_SLOTS: [&str; 7] = [
    "9:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-1:00",
    "1:00-2:00",
    "2:00-3:00",
    "3:00-4:00",
];

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Row and column labels of every section grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLayout {
    pub days: Vec<String>,
    pub time_slots: Vec<String>,
}

impl Default for WeekLayout {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
            time_slots: DEFAULT_TIME_SLOTS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl WeekLayout {
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn time_slot_count(&self) -> usize {
        self.time_slots.len()
    }

    pub fn cell_count(&self) -> usize {
        self.day_count() * self.time_slot_count()
    }

    pub fn validate(&self) -> Result<()> {
        validate_labels("week.days", &self.days)?;
        validate_labels("week.time_slots", &self.time_slots)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the web server writes the timetables when they are saved.
    pub export_csv: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub week: WeekLayout,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, otherwise falls back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.week.validate()?;
        if self.server.host.trim().is_empty() {
            return Err(TimetableError::Config {
                message: "server.host cannot be empty".to_string(),
            });
        }
        if self.server.port == 0 {
            return Err(TimetableError::Config {
                message: "server.port must be greater than 0".to_string(),
            });
        }
        if let Some(path) = &self.output.export_csv {
            if path.trim().is_empty() {
                return Err(TimetableError::Config {
                    message: "output.export_csv cannot be an empty path".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn validate_labels(field: &str, labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(TimetableError::Config {
            message: format!("{} must contain at least one label", field),
        });
    }
    let mut seen = HashSet::new();
    for label in labels {
        if label.trim().is_empty() {
            return Err(TimetableError::Config {
                message: format!("{} contains a blank label", field),
            });
        }
        if !seen.insert(label.as_str()) {
            return Err(TimetableError::Config {
                message: format!("{} contains duplicate label '{}'", field, label),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_five_days_by_seven_slots() {
        let layout = WeekLayout::default();
        assert_eq!(layout.day_count(), 5);
        assert_eq!(layout.time_slot_count(), 7);
        assert_eq!(layout.cell_count(), 35);
        assert_eq!(layout.days[0], "Monday");
        assert_eq!(layout.days[4], "Friday");
        assert_eq!(layout.time_slots[0], "9:00-10:00");
        assert_eq!(layout.time_slots[6], "3:00-4:00");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.week, WeekLayout::default());
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.output.export_csv.is_none());
    }

    #[test]
    fn test_toml_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
            [week]
            days = ["Mon", "Tue"]
            time_slots = ["8:00-9:00", "9:00-10:00", "10:00-11:00"]

            [server]
            port = 3000

            [output]
            export_csv = "saved.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.week.cell_count(), 6);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.output.export_csv.as_deref(), Some("saved.csv"));
    }

    #[test]
    fn test_rejects_empty_days() {
        let result = AppConfig::from_toml_str(
            r#"
            [week]
            days = []
            time_slots = ["9:00-10:00"]
            "#,
        );
        assert!(matches!(result, Err(TimetableError::Config { .. })));
    }

    #[test]
    fn test_rejects_duplicate_time_slots() {
        let layout = WeekLayout {
            days: vec!["Monday".into()],
            time_slots: vec!["9:00-10:00".into(), "9:00-10:00".into()],
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = AppConfig::from_toml_str("[server\nport = ");
        assert!(matches!(result, Err(TimetableError::ConfigParse(_))));
    }
}
