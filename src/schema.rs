//! Diesel table definitions for the climate database.
//!
//! The tables are created outside this service. [crate::store::Store::open] checks at start-up
//! that the columns declared here are present.

diesel::table! {
    measurement (id) {
        id -> Integer,
        station -> Text,
        date -> Text,
        prcp -> Nullable<Double>,
        tobs -> Double,
    }
}

diesel::table! {
    station (id) {
        id -> Integer,
        #[sql_name = "station"]
        code -> Text,
        name -> Nullable<Text>,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        elevation -> Nullable<Double>,
    }
}

/// Columns of the `measurement` table as named in SQLite.
pub const MEASUREMENT_COLUMNS: &[&str] = &["id", "station", "date", "prcp", "tobs"];

/// Columns of the `station` table as named in SQLite.
pub const STATION_COLUMNS: &[&str] = &[
    "id",
    "station",
    "name",
    "latitude",
    "longitude",
    "elevation",
];
