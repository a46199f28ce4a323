use async_trait::async_trait;
use std::fmt::Debug;

use crate::Config;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// External source of current-weather documents.
///
/// One call per place; a successful call yields the raw response body for
/// the parser, any transport problem or non-success status is an error.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, place: &str) -> anyhow::Result<String>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather configure` and enter your OpenWeatherMap API key."
        )
    })?;

    Ok(OpenWeatherProvider::new(
        config.endpoint().to_owned(),
        api_key.to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `weather configure`"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
