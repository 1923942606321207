use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Analysis, Config, EventSettings, Timeframe};

/// Prefix of environment variables that override file settings, e.g.
/// `CRUDE_EXPLORER__ANALYSIS__LOOKBACK_DAYS=3`.
pub const ENV_PREFIX: &str = "CRUDE_EXPLORER";

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional; environment variables are layered on top of it.
pub fn load_config() -> Result<Config, ConfigError> {
    build(config::File::with_name("config.toml").required(false))
}

/// Loads the application configuration from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    build(config::File::from(path).required(true))
}

fn build<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("analysis.moving_average_windows")
                .with_list_parse_key("events.categories")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::EventCategory;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.analysis.moving_average_windows, vec![50, 200]);
        assert_eq!(config.analysis.impact_horizon_days, 7);
        assert_eq!(config.analysis.lookback_days, 5);
        assert_eq!(config.timeframe.from, NaiveDate::from_ymd_opt(1990, 1, 1));
    }

    #[test]
    fn reads_all_sections() {
        let file = write_config(
            r#"
[analysis]
moving_average_windows = [20, 100]
impact_horizon_days = 14
lookback_days = 3

[timeframe]
from = "2000-01-01"
to = "2010-12-31"

[events]
catalog_path = "events.toml"
categories = ["Conflict", "Policy/OPEC"]
"#,
        );

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.analysis.moving_average_windows, vec![20, 100]);
        assert_eq!(config.analysis.impact_horizon_days, 14);
        assert_eq!(config.timeframe.to, NaiveDate::from_ymd_opt(2010, 12, 31));
        assert_eq!(
            config.events.categories,
            Some(vec![EventCategory::Conflict, EventCategory::PolicyOpec])
        );
    }

    #[test]
    fn rejects_invalid_values() {
        let zero_window = write_config("[analysis]\nmoving_average_windows = [0]\n");
        assert!(matches!(
            load_config_from(zero_window.path()),
            Err(ConfigError::ValidationError(_))
        ));

        let backwards = write_config("[timeframe]\nfrom = \"2020-01-01\"\nto = \"2019-01-01\"\n");
        assert!(matches!(
            load_config_from(backwards.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Path::new("/nonexistent/crude-explorer.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
