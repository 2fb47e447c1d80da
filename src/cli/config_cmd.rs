//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::audio::SampleRate;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::export::{FormatSelection, Locale};
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let mut config = store.load().await?;
    let stored = apply_value(&mut config, key, value)?;

    if key == "sample_rate" {
        if let Some(rate) = config.sample_rate.and_then(SampleRate::new) {
            if !rate.is_standard() {
                presenter.warn(&format!(
                    "{} is not a standard rate; some players may refuse it",
                    rate
                ));
            }
        }
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, stored));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, err: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: err.to_string(),
    }
}

/// Validate `value` for `key` and store its normalized form.
/// Returns what was stored.
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<String, ConfigError> {
    let stored = match key {
        "sample_rate" => {
            let rate: SampleRate = value.parse().map_err(|e| invalid(key, e))?;
            config.sample_rate = Some(rate.hz());
            rate.hz().to_string()
        }
        "language" => {
            let locale: Locale = value.parse().map_err(|e| invalid(key, e))?;
            config.language = Some(locale.to_string());
            locale.to_string()
        }
        "duration" => {
            value.parse::<Duration>().map_err(|e| invalid(key, e))?;
            config.duration = Some(value.trim().to_string());
            value.trim().to_string()
        }
        "format" => {
            let format: FormatSelection = value.parse().map_err(|e| invalid(key, e))?;
            config.format = Some(format.to_string());
            format.to_string()
        }
        "output_dir" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Directory must not be empty"));
            }
            config.output_dir = Some(value.to_string());
            value.to_string()
        }
        _ => return Err(invalid(key, "Unknown key")),
    };
    Ok(stored)
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "sample_rate" => config.sample_rate.map(|hz| hz.to_string()),
        "language" => config.language.clone(),
        "duration" => config.duration.clone(),
        "format" => config.format.clone(),
        "output_dir" => config.output_dir.clone(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rate_is_normalized() {
        let mut config = AppConfig::empty();
        assert_eq!(apply_value(&mut config, "sample_rate", "16000Hz").unwrap(), "16000");
        assert_eq!(config.sample_rate, Some(16000));
    }

    #[test]
    fn sample_rate_invalid() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "sample_rate", "0").is_err());
        assert!(apply_value(&mut config, "sample_rate", "fast").is_err());
        assert_eq!(config.sample_rate, None);
    }

    #[test]
    fn language_is_normalized() {
        let mut config = AppConfig::empty();
        assert_eq!(apply_value(&mut config, "language", "en-US").unwrap(), "en");
        assert!(apply_value(&mut config, "language", "fr").is_err());
        assert_eq!(config.language.as_deref(), Some("en"));
    }

    #[test]
    fn duration_valid_and_invalid() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "duration", "2m30s").is_ok());
        assert!(apply_value(&mut config, "duration", "invalid").is_err());
        assert_eq!(config.duration.as_deref(), Some("2m30s"));
    }

    #[test]
    fn format_values() {
        let mut config = AppConfig::empty();
        assert_eq!(apply_value(&mut config, "format", "BOTH").unwrap(), "both");
        assert!(apply_value(&mut config, "format", "mp3").is_err());
    }

    #[test]
    fn output_dir_rejects_blank() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "output_dir", "  ").is_err());
        assert!(apply_value(&mut config, "output_dir", "/tmp/takes").is_ok());
        assert_eq!(read_value(&config, "output_dir").as_deref(), Some("/tmp/takes"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            ensure_known_key("api_key"),
            Err(ConfigError::ValidationError { .. })
        ));
        assert!(ensure_known_key("language").is_ok());
    }
}
