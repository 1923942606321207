use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::EventCategory;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; a missing `config.toml` yields the dashboard defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub events: EventSettings,
}

/// Parameters of the statistical calculations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Analysis {
    /// Windows of the simple moving averages to plot, in observations.
    #[serde(default = "default_windows")]
    pub moving_average_windows: Vec<usize>,
    /// Calendar days between an event and the post-event price.
    #[serde(default = "default_horizon")]
    pub impact_horizon_days: u32,
    /// How many calendar days a price lookup may fall back over non-trading days.
    #[serde(default = "default_lookback")]
    pub lookback_days: u32,
}

/// The period of history to analyse. An absent bound is open.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Timeframe {
    #[serde(default = "default_from")]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Where events come from and which of them to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventSettings {
    /// A TOML event catalog replacing the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Categories to keep; `None` keeps all of them.
    #[serde(default)]
    pub categories: Option<Vec<EventCategory>>,
}

fn default_windows() -> Vec<usize> {
    vec![50, 200]
}

fn default_horizon() -> u32 {
    7
}

fn default_lookback() -> u32 {
    5
}

fn default_from() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1990, 1, 1)
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            moving_average_windows: default_windows(),
            impact_horizon_days: default_horizon(),
            lookback_days: default_lookback(),
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self {
            from: default_from(),
            to: None,
        }
    }
}

impl Config {
    /// Checks the invariants the analysis crates rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analysis = &self.analysis;
        if analysis.moving_average_windows.is_empty() {
            return Err(ConfigError::ValidationError(
                "analysis.moving_average_windows must not be empty".to_string(),
            ));
        }
        if analysis.moving_average_windows.contains(&0) {
            return Err(ConfigError::ValidationError(
                "analysis.moving_average_windows must be positive".to_string(),
            ));
        }
        let windows = &analysis.moving_average_windows;
        if (1..windows.len()).any(|i| windows[..i].contains(&windows[i])) {
            return Err(ConfigError::ValidationError(
                "analysis.moving_average_windows must not repeat a window".to_string(),
            ));
        }
        if analysis.impact_horizon_days == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.impact_horizon_days must be at least 1".to_string(),
            ));
        }
        if let (Some(from), Some(to)) = (self.timeframe.from, self.timeframe.to) {
            if from > to {
                return Err(ConfigError::ValidationError(format!(
                    "timeframe.from ({from}) is after timeframe.to ({to})"
                )));
            }
        }
        if let Some(categories) = &self.events.categories {
            if categories.is_empty() {
                return Err(ConfigError::ValidationError(
                    "events.categories must name at least one category; omit it to keep all"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}
