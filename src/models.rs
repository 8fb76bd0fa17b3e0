//! Data types and associated functions and methods

use crate::schema::measurement;

use std::collections::BTreeMap;

use diesel::prelude::*;
use serde::Serialize;

/// Precipitation reported by one station on one date
///
/// Only the columns the precipitation report needs are read, so missing metadata or
/// temperatures elsewhere in the row do not fail the query.
#[derive(Clone, Debug, PartialEq, Queryable, Selectable)]
#[diesel(table_name = measurement)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyPrecipitation {
    /// ISO `YYYY-MM-DD` date
    pub date: String,
    /// Precipitation, if recorded
    pub prcp: Option<f64>,
}

/// Precipitation by date.
///
/// Only one value is kept per date. When several stations report on the same date, the last
/// row read wins.
pub type Precipitation = BTreeMap<String, Option<f64>>;

/// Minimum, average and maximum temperature over a date range
///
/// All fields are `None` when no observations fall within the range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TemperatureStats {
    #[serde(rename = "Min Temperature")]
    pub min: Option<f64>,
    #[serde(rename = "Average Temperature")]
    pub average: Option<f64>,
    #[serde(rename = "Max Temperature")]
    pub max: Option<f64>,
}

impl From<(Option<f64>, Option<f64>, Option<f64>)> for TemperatureStats {
    fn from((min, average, max): (Option<f64>, Option<f64>, Option<f64>)) -> Self {
        Self { min, average, max }
    }
}
