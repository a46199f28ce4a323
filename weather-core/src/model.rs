use std::cmp::Ordering;
use std::convert::TryFrom;

/// Weather data retrieved for a single requested place.
///
/// Every field except `place` is independently optional because the upstream
/// service may omit any of them. A record is created once per fetch attempt
/// and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherRecord {
    pub place: String,
    pub region: Option<String>,
    pub condition_title: Option<String>,
    pub condition_description: Option<String>,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub sea_level_pressure: Option<f64>,
    pub ground_level_pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction_degrees: Option<f64>,
    pub precipitation_3h: Option<f64>,
    pub snow_3h: Option<f64>,
    pub cloudiness: Option<f64>,
}

impl WeatherRecord {
    /// Record produced when a fetch or parse fails: only the place is set.
    pub fn fallback(place: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            ..Self::default()
        }
    }
}

/// Comparison/formatting category of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
}

/// Registry of the sixteen record fields, in canonical column order.
///
/// Sorting and formatting both go through this enum, so the set of columns
/// is exhaustive and checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Place,
    Region,
    ConditionTitle,
    ConditionDescription,
    Temperature,
    Pressure,
    Humidity,
    MinTemperature,
    MaxTemperature,
    SeaLevelPressure,
    GroundLevelPressure,
    WindSpeed,
    WindDirectionDegrees,
    Precipitation3h,
    Snow3h,
    Cloudiness,
}

impl Field {
    pub const fn all() -> &'static [Field] {
        &[
            Field::Place,
            Field::Region,
            Field::ConditionTitle,
            Field::ConditionDescription,
            Field::Temperature,
            Field::Pressure,
            Field::Humidity,
            Field::MinTemperature,
            Field::MaxTemperature,
            Field::SeaLevelPressure,
            Field::GroundLevelPressure,
            Field::WindSpeed,
            Field::WindDirectionDegrees,
            Field::Precipitation3h,
            Field::Snow3h,
            Field::Cloudiness,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Place => "place",
            Field::Region => "region",
            Field::ConditionTitle => "condition_title",
            Field::ConditionDescription => "condition_description",
            Field::Temperature => "temperature",
            Field::Pressure => "pressure",
            Field::Humidity => "humidity",
            Field::MinTemperature => "min_temperature",
            Field::MaxTemperature => "max_temperature",
            Field::SeaLevelPressure => "sea_level_pressure",
            Field::GroundLevelPressure => "ground_level_pressure",
            Field::WindSpeed => "wind_speed",
            Field::WindDirectionDegrees => "wind_direction_degrees",
            Field::Precipitation3h => "precipitation_3h",
            Field::Snow3h => "snow_3h",
            Field::Cloudiness => "cloudiness",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Place
            | Field::Region
            | Field::ConditionTitle
            | Field::ConditionDescription => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }

    /// String value of a text field. `None` for numeric fields.
    pub fn text_value<'a>(&self, record: &'a WeatherRecord) -> Option<&'a str> {
        match self {
            Field::Place => Some(record.place.as_str()),
            Field::Region => record.region.as_deref(),
            Field::ConditionTitle => record.condition_title.as_deref(),
            Field::ConditionDescription => record.condition_description.as_deref(),
            _ => None,
        }
    }

    /// Numeric value of a numeric field. `None` for text fields or when the
    /// measurement is absent.
    pub fn numeric_value(&self, record: &WeatherRecord) -> Option<f64> {
        match self {
            Field::Temperature => record.temperature,
            Field::Pressure => record.pressure,
            Field::Humidity => record.humidity,
            Field::MinTemperature => record.min_temperature,
            Field::MaxTemperature => record.max_temperature,
            Field::SeaLevelPressure => record.sea_level_pressure,
            Field::GroundLevelPressure => record.ground_level_pressure,
            Field::WindSpeed => record.wind_speed,
            Field::WindDirectionDegrees => record.wind_direction_degrees,
            Field::Precipitation3h => record.precipitation_3h,
            Field::Snow3h => record.snow_3h,
            Field::Cloudiness => record.cloudiness,
            _ => None,
        }
    }

    /// Compare two records on this field, ascending.
    ///
    /// Text fields compare lexically with absent reading as "". Numeric
    /// fields compare numerically; an absent value orders before any present
    /// value, and the incomparable NaN pair ties so the stable sort keeps
    /// the original relative order.
    pub fn compare(&self, a: &WeatherRecord, b: &WeatherRecord) -> Ordering {
        match self.kind() {
            FieldKind::Text => {
                let left = self.text_value(a).unwrap_or("");
                let right = self.text_value(b).unwrap_or("");
                left.cmp(right)
            }
            FieldKind::Numeric => match (self.numeric_value(a), self.numeric_value(b)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            },
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Field {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Field::all()
            .iter()
            .find(|field| field.as_str() == value)
            .copied()
            .ok_or_else(|| {
                let known = Field::all()
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                anyhow::anyhow!("Unknown field '{value}'. Known fields: {known}.")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_as_str_roundtrip() {
        for field in Field::all() {
            let s = field.as_str();
            let parsed = Field::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*field, parsed);
        }
    }

    #[test]
    fn unknown_field_error() {
        let err = Field::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown field"));
        assert!(err.to_string().contains("place"));
    }

    #[test]
    fn registry_covers_all_columns() {
        assert_eq!(Field::all().len(), 16);

        let text = Field::all()
            .iter()
            .filter(|f| f.kind() == FieldKind::Text)
            .count();
        assert_eq!(text, 4);
    }

    #[test]
    fn fallback_record_has_only_place() {
        let record = WeatherRecord::fallback("Nowhereville");
        assert_eq!(record.place, "Nowhereville");

        for field in Field::all() {
            if *field == Field::Place {
                continue;
            }
            assert_eq!(field.text_value(&record), None);
            assert_eq!(field.numeric_value(&record), None);
        }
    }

    #[test]
    fn numeric_compare_orders_absent_first() {
        let cold = WeatherRecord {
            place: "a".into(),
            temperature: Some(-3.0),
            ..WeatherRecord::default()
        };
        let unknown = WeatherRecord::fallback("b");

        assert_eq!(Field::Temperature.compare(&unknown, &cold), Ordering::Less);
        assert_eq!(Field::Temperature.compare(&cold, &unknown), Ordering::Greater);
        assert_eq!(
            Field::Temperature.compare(&unknown, &unknown),
            Ordering::Equal
        );
    }

    #[test]
    fn nan_pair_ties() {
        let odd = WeatherRecord {
            place: "a".into(),
            wind_speed: Some(f64::NAN),
            ..WeatherRecord::default()
        };

        assert_eq!(Field::WindSpeed.compare(&odd, &odd), Ordering::Equal);
    }
}
