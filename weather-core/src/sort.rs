//! Ordering of weather records by a chosen field.

use crate::model::{Field, WeatherRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Stable in-place sort of `records` on `field`.
///
/// Records comparing equal keep their original relative order. Descending
/// reverses the field comparator; the absent-first policy of
/// [`Field::compare`] therefore puts absent values last when descending.
pub fn sort_records(records: &mut [WeatherRecord], field: Field, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = field.compare(a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
