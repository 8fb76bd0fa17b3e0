//! Query service
//!
//! [QueryService] runs the queries in [crate::queries] for the request handlers. Diesel
//! connections are blocking, so each query runs on Tokio's blocking thread pool with a session
//! checked out for the duration of the query only.

use crate::error::ClimateApiError;
use crate::metrics::QUERY_TIME_COLLECTOR;
use crate::models::{Precipitation, TemperatureStats};
use crate::queries;
use crate::store::Store;

use diesel::SqliteConnection;

/// Answers the climate report queries against a [Store].
#[derive(Clone)]
pub struct QueryService {
    store: Store,
}

impl QueryService {
    /// Returns a new QueryService using `store` for every query.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Precipitation by date over the trailing year.
    pub async fn precipitation(&self) -> Result<Precipitation, ClimateApiError> {
        self.run("precipitation", queries::precipitation).await
    }

    /// Every station code.
    pub async fn stations(&self) -> Result<Vec<String>, ClimateApiError> {
        self.run("stations", queries::stations).await
    }

    /// Trailing year of temperature observations from the most active station.
    pub async fn tobs(&self) -> Result<Vec<f64>, ClimateApiError> {
        self.run("tobs", queries::tobs).await
    }

    /// Temperature statistics from `start` onwards, or between `start` and `end` inclusive.
    pub async fn temperature_stats(
        &self,
        start: String,
        end: Option<String>,
    ) -> Result<TemperatureStats, ClimateApiError> {
        self.run("temperature_stats", move |conn| {
            queries::temperature_stats(conn, &start, end.as_deref())
        })
        .await
    }

    /// Run `query` with its own session on the blocking thread pool.
    ///
    /// The session is released when `query` returns, whether or not it succeeded.
    async fn run<T, F>(&self, name: &'static str, query: F) -> Result<T, ClimateApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, ClimateApiError> + Send + 'static,
    {
        let store = self.store.clone();
        let timer = QUERY_TIME_COLLECTOR
            .with_label_values(&[name])
            .start_timer();
        let result = tokio::task::spawn_blocking(move || {
            let mut session = store.session()?;
            query(&mut *session)
        })
        .await?;
        timer.observe_duration();
        result
    }
}
