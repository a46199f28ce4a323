//! Tolerant parsing of OpenWeatherMap current-weather JSON.
//!
//! Individual fields may be missing, null or malformed without failing the
//! parse; only a structurally invalid document is an error, which the fetch
//! layer treats as a failed fetch.

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::model::WeatherRecord;

/// A numeric field whose raw JSON value could not be read as a decimal.
/// Recoverable: the field is left absent and the error is only reported.
#[derive(Debug, Error)]
#[error("element '{path}' value '{raw}' is not a decimal number")]
pub struct NumericFieldError {
    pub path: String,
    pub raw: String,
}

/// Parse a current-weather response body into a [`WeatherRecord`].
///
/// The `place` field is taken from the document's `name` element and may be
/// empty when the document omits it; the caller substitutes the requested
/// place name in that case.
pub fn parse_current(json: &str) -> Result<WeatherRecord> {
    let doc: Value =
        serde_json::from_str(json).context("Response body is not well-formed JSON")?;

    Ok(WeatherRecord {
        place: string_at(&doc, "/name").unwrap_or_default(),
        region: string_at(&doc, "/sys/country"),
        condition_title: string_at(&doc, "/weather/0/main"),
        condition_description: string_at(&doc, "/weather/0/description"),
        temperature: number_at_lossy(&doc, "/main/temp"),
        pressure: number_at_lossy(&doc, "/main/pressure"),
        humidity: number_at_lossy(&doc, "/main/humidity"),
        min_temperature: number_at_lossy(&doc, "/main/temp_min"),
        max_temperature: number_at_lossy(&doc, "/main/temp_max"),
        sea_level_pressure: number_at_lossy(&doc, "/main/sea_level"),
        ground_level_pressure: number_at_lossy(&doc, "/main/grnd_level"),
        wind_speed: number_at_lossy(&doc, "/wind/speed"),
        wind_direction_degrees: number_at_lossy(&doc, "/wind/deg"),
        precipitation_3h: number_at_lossy(&doc, "/rain/3h"),
        snow_3h: number_at_lossy(&doc, "/snow/3h"),
        cloudiness: number_at_lossy(&doc, "/clouds/all"),
    })
}

/// String at a JSON pointer path. Missing, null, non-string and
/// whitespace-only values all read as absent.
fn string_at(doc: &Value, path: &str) -> Option<String> {
    doc.pointer(path)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Decimal number at a JSON pointer path.
///
/// Missing and null read as `Ok(None)`. JSON numbers are taken as-is and
/// numeric strings are coerced; any other value is a field-local error.
fn number_at(doc: &Value, path: &str) -> Result<Option<f64>, NumericFieldError> {
    let value = match doc.pointer(path) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) => Ok(Some(n)),
        None => Err(NumericFieldError {
            path: path.to_owned(),
            raw: value.to_string(),
        }),
    }
}

/// [`number_at`] with the error downgraded to a warning and an absent field.
fn number_at_lossy(doc: &Value, path: &str) -> Option<f64> {
    match number_at(doc, path) {
        Ok(value) => value,
        Err(err) => {
            warn!("{err}");
            None
        }
    }
}
