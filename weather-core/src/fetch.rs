//! Batch fetch orchestration.
//!
//! Turns an ordered list of place names into one [`WeatherRecord`] per
//! place, in input order, with per-place failures degraded to fallback
//! records instead of aborting the batch.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::model::WeatherRecord;
use crate::parser;
use crate::provider::WeatherProvider;

/// Pause between sequential requests, respecting the upstream rate ceiling.
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Scheduling of the per-place fetches, chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One place at a time, in input order, paced between requests.
    Sequential,
    /// One task per place, unbounded fan-out, no pacing.
    Concurrent,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Concurrent => "concurrent",
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetches weather records for a batch of places through a
/// [`WeatherProvider`].
#[derive(Debug)]
pub struct FetchOrchestrator {
    provider: Arc<dyn WeatherProvider>,
    mode: ExecutionMode,
    pacing: Duration,
}

impl FetchOrchestrator {
    pub fn new(provider: Arc<dyn WeatherProvider>, mode: ExecutionMode) -> Self {
        Self {
            provider,
            mode,
            pacing: DEFAULT_PACING,
        }
    }

    /// Override the sequential inter-request pause. Tests pass zero.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Fetch one record per place.
    ///
    /// Output position i always corresponds to input place i, in both
    /// modes, regardless of which fetch completes first. Never fails:
    /// every per-place problem yields a fallback record and a warning.
    pub async fn fetch_all(&self, places: &[String]) -> Vec<WeatherRecord> {
        debug!(
            "Fetching weather data for {} places ({} mode).",
            places.len(),
            self.mode
        );

        match self.mode {
            ExecutionMode::Sequential => self.fetch_sequential(places).await,
            ExecutionMode::Concurrent => self.fetch_concurrent(places).await,
        }
    }

    async fn fetch_sequential(&self, places: &[String]) -> Vec<WeatherRecord> {
        let mut records = Vec::with_capacity(places.len());

        for (i, place) in places.iter().enumerate() {
            records.push(fetch_place(Arc::clone(&self.provider), place.clone()).await);

            if i + 1 < places.len() {
                sleep(self.pacing).await;
            }
        }

        records
    }

    async fn fetch_concurrent(&self, places: &[String]) -> Vec<WeatherRecord> {
        // Index-tagged dispatch into pre-sized slots makes the input-order
        // guarantee explicit, independent of completion order.
        let mut handles = Vec::with_capacity(places.len());
        for (index, place) in places.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let place = place.clone();
            handles.push((
                index,
                place.clone(),
                tokio::spawn(async move { fetch_place(provider, place).await }),
            ));
        }

        let mut slots: Vec<Option<WeatherRecord>> = places.iter().map(|_| None).collect();
        for (index, place, handle) in handles {
            let record = match handle.await {
                Ok(record) => record,
                Err(err) => {
                    warn!("Unable to retrieve weather data for place '{place}': {err}");
                    WeatherRecord::fallback(place)
                }
            };
            slots[index] = Some(record);
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_default())
            .collect()
    }
}

/// Fetch and parse one place. Any failure is local: the result is a
/// fallback record carrying only the place name, plus a warning.
async fn fetch_place(provider: Arc<dyn WeatherProvider>, place: String) -> WeatherRecord {
    debug!("Retrieving weather data for place '{place}'.");

    let parsed = match provider.current_weather(&place).await {
        Ok(body) => parser::parse_current(&body),
        Err(err) => Err(err),
    };

    match parsed {
        Ok(mut record) => {
            debug!("Weather data for place '{place}' successfully retrieved.");
            if record.place.is_empty() {
                record.place = place;
            }
            record
        }
        Err(err) => {
            warn!("Unable to retrieve weather data for place '{place}': {err:#}");
            WeatherRecord::fallback(place)
        }
    }
}
