//! Read-only queries over the climate database.
//!
//! Each function runs against a single session and performs no writes. Dates are stored as ISO
//! `YYYY-MM-DD` text, so date ranges are plain text comparisons.

use crate::error::ClimateApiError;
use crate::models::{DailyPrecipitation, Precipitation, TemperatureStats};
use crate::schema::{measurement, station};

use chrono::{Days, NaiveDate};
use diesel::dsl::{avg, count_star, max, min};
use diesel::prelude::*;

/// Format of dates stored in the `measurement` table.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window used by the precipitation and tobs reports.
const TRAILING_WINDOW: Days = Days::new(365);

/// Returns the most recent measurement date, or `None` if there are no measurements.
pub fn most_recent_date(conn: &mut SqliteConnection) -> Result<Option<String>, ClimateApiError> {
    Ok(measurement::table
        .select(max(measurement::date))
        .get_result::<Option<String>>(conn)?)
}

/// Returns the date 365 days before `date`.
///
/// This is a calendar subtraction, not a count of rows.
pub fn cutoff_date(date: &str) -> Result<String, ClimateApiError> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|source| {
        ClimateApiError::StoredDate {
            date: date.to_string(),
            source,
        }
    })?;
    let cutoff = parsed
        .checked_sub_days(TRAILING_WINDOW)
        .unwrap_or(NaiveDate::MIN);
    Ok(cutoff.format(DATE_FORMAT).to_string())
}

/// Returns the start of the trailing 365 day window, or `None` if there are no measurements.
fn trailing_cutoff(conn: &mut SqliteConnection) -> Result<Option<String>, ClimateApiError> {
    most_recent_date(conn)?
        .map(|date| cutoff_date(&date))
        .transpose()
}

/// Precipitation by date over the trailing 365 days.
///
/// Rows are read in store order and inserted into the map one by one, so where several stations
/// report on the same date only the last row read is kept.
#[tracing::instrument(level = "DEBUG", skip(conn))]
pub fn precipitation(conn: &mut SqliteConnection) -> Result<Precipitation, ClimateApiError> {
    let Some(cutoff) = trailing_cutoff(conn)? else {
        return Ok(Precipitation::new());
    };
    tracing::debug!("Precipitation since {}", cutoff);
    let rows = measurement::table
        .filter(measurement::date.ge(cutoff.as_str()))
        .select(DailyPrecipitation::as_select())
        .load(conn)?;
    let mut precipitation = Precipitation::new();
    for row in rows {
        precipitation.insert(row.date, row.prcp);
    }
    Ok(precipitation)
}

/// Every station code, in store order.
#[tracing::instrument(level = "DEBUG", skip(conn))]
pub fn stations(conn: &mut SqliteConnection) -> Result<Vec<String>, ClimateApiError> {
    Ok(station::table.select(station::code).load(conn)?)
}

/// Returns the code of the station with the most measurements.
///
/// Ties go to whichever station the store returns first.
pub fn most_active_station(
    conn: &mut SqliteConnection,
) -> Result<Option<String>, ClimateApiError> {
    Ok(measurement::table
        .group_by(measurement::station)
        .select(measurement::station)
        .order_by(count_star().desc())
        .first::<String>(conn)
        .optional()?)
}

/// Temperature observations of the most active station over the trailing 365 days.
#[tracing::instrument(level = "DEBUG", skip(conn))]
pub fn tobs(conn: &mut SqliteConnection) -> Result<Vec<f64>, ClimateApiError> {
    let Some(station) = most_active_station(conn)? else {
        return Ok(vec![]);
    };
    let Some(cutoff) = trailing_cutoff(conn)? else {
        return Ok(vec![]);
    };
    tracing::debug!("Temperatures for {} since {}", station, cutoff);
    Ok(measurement::table
        .filter(measurement::station.eq(station.as_str()))
        .filter(measurement::date.ge(cutoff.as_str()))
        .select(measurement::tobs)
        .load(conn)?)
}

/// Minimum, average and maximum temperature from `start`, and up to `end` if given.
///
/// Both bounds are inclusive and are compared as text without validation.
#[tracing::instrument(level = "DEBUG", skip(conn))]
pub fn temperature_stats(
    conn: &mut SqliteConnection,
    start: &str,
    end: Option<&str>,
) -> Result<TemperatureStats, ClimateApiError> {
    let mut query = measurement::table
        .select((
            min(measurement::tobs),
            avg(measurement::tobs),
            max(measurement::tobs),
        ))
        .filter(measurement::date.ge(start))
        .into_boxed();
    if let Some(end) = end {
        query = query.filter(measurement::date.le(end));
    }
    let stats = query.get_result::<(Option<f64>, Option<f64>, Option<f64>)>(conn)?;
    Ok(stats.into())
}
