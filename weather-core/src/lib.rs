//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the weather data source
//! - The fetch / parse / sort / format pipeline
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod fetch;
pub mod format;
pub mod model;
pub mod parser;
pub mod provider;
pub mod sort;

pub use config::Config;
pub use fetch::{ExecutionMode, FetchOrchestrator};
pub use model::{Field, FieldKind, WeatherRecord};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use sort::{SortDirection, sort_records};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug)]
    struct TwoPlaceProvider;

    #[async_trait]
    impl WeatherProvider for TwoPlaceProvider {
        async fn current_weather(&self, place: &str) -> anyhow::Result<String> {
            match place {
                "London" => Ok(r#"{
                    "name": "London",
                    "sys": { "country": "GB" },
                    "weather": [ { "main": "Rain", "description": "light rain" } ],
                    "main": { "temp": 15.2, "pressure": 1012, "humidity": 81 },
                    "wind": { "speed": 4.1, "deg": 80 },
                    "clouds": { "all": 90 }
                }"#
                .to_string()),
                _ => Err(anyhow::anyhow!("request failed with status 404 Not Found")),
            }
        }
    }

    #[tokio::test]
    async fn pipeline_end_to_end_with_partial_failure() {
        let places = vec!["London".to_string(), "Nowhereville".to_string()];

        let orchestrator = FetchOrchestrator::new(
            Arc::new(TwoPlaceProvider),
            ExecutionMode::Sequential,
        )
        .with_pacing(Duration::ZERO);

        let mut records = orchestrator.fetch_all(&places).await;
        sort_records(&mut records, Field::Place, SortDirection::Ascending);

        let mut lines = vec![format::header()];
        lines.extend(records.iter().map(format::format_record));
        let output = lines.join("\n");

        let rows: Vec<&str> = output.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("place;"));

        assert!(rows[1].starts_with("London;GB;Rain;light rain;15.2;"));
        assert_eq!(rows[2], format!("Nowhereville{}", ";".repeat(15)));

        let fallback = records.iter().find(|r| r.place == "Nowhereville").unwrap();
        assert_eq!(*fallback, WeatherRecord::fallback("Nowhereville"));
    }
}
