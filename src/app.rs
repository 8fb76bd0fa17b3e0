//! climate-api application

use crate::error::ClimateApiError;
use crate::metrics::{metrics_handler, record_response_metrics, request_counter};
use crate::models::{Precipitation, TemperatureStats};
use crate::service::QueryService;
use crate::store::Store;

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Json, Router,
};
use tower::Layer;
use tower::ServiceBuilder;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// Index page listing the available routes.
const INDEX: &str = "<h1>Hawaii Climate API</h1>\
<p>Available routes:</p>\
<ul>\
<li><code>/api/v1.0/precipitation</code> Precipitation by date over the last 12 months of data</li>\
<li><code>/api/v1.0/stations</code> List of weather station codes</li>\
<li><code>/api/v1.0/tobs</code> Temperature observations of the most active station over the last 12 months of data</li>\
<li><code>/api/v1.0/&lt;start&gt;</code> Min, average and max temperature from a start date (YYYY-MM-DD)</li>\
<li><code>/api/v1.0/&lt;start&gt;/&lt;end&gt;</code> Min, average and max temperature between two dates inclusive (YYYY-MM-DD)</li>\
</ul>";

/// Shared application state passed to each request handler.
pub type SharedAppState = QueryService;

/// Returns a [axum::Router] for the climate API
///
/// The router is populated with all routes as well as the following middleware:
///
/// * a [tower_http::trace::TraceLayer] for tracing requests and responses, which also records
///   Prometheus metrics
fn router(state: SharedAppState) -> Router {
    fn v1() -> Router<SharedAppState> {
        Router::new()
            .route("/precipitation", get(precipitation))
            .route("/stations", get(stations))
            .route("/tobs", get(tobs))
            .route("/:start", get(stats_from))
            .route("/:start/:end", get(stats_between))
    }

    Router::new()
        .route("/", get(index))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1.0", v1())
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .on_request(request_counter)
                    .on_response(record_response_metrics),
            ),
        )
        .with_state(state)
}

/// climate-api Service type alias
///
/// The router wrapped in path normalisation. Implements [tower::Service].
pub type Service = NormalizePath<Router>;

/// Returns a [crate::app::Service] for the climate API
///
/// The service is populated with all routes as well as the following middleware:
///
/// * a [tower_http::trace::TraceLayer] for tracing requests and responses
/// * a [tower_http::normalize_path::NormalizePathLayer] for trimming trailing slashes from
///   requests
pub fn service(store: Store) -> Service {
    let state = QueryService::new(store);
    let router = router(state);

    // Note that any middleware that should affect routing must wrap the router.
    // See
    // https://docs.rs/axum/0.6.18/axum/middleware/index.html#rewriting-request-uri-in-middleware
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// List the available routes
async fn index() -> Html<&'static str> {
    Html(INDEX)
}

/// Precipitation by date over the last 12 months of data
async fn precipitation(
    State(service): State<SharedAppState>,
) -> Result<Json<Precipitation>, ClimateApiError> {
    Ok(Json(service.precipitation().await?))
}

/// Every weather station code
async fn stations(
    State(service): State<SharedAppState>,
) -> Result<Json<Vec<String>>, ClimateApiError> {
    Ok(Json(service.stations().await?))
}

/// Temperature observations of the most active station over the last 12 months of data
async fn tobs(State(service): State<SharedAppState>) -> Result<Json<Vec<f64>>, ClimateApiError> {
    Ok(Json(service.tobs().await?))
}

/// Temperature statistics from a start date
async fn stats_from(
    State(service): State<SharedAppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ClimateApiError> {
    Ok(Json(service.temperature_stats(start, None).await?))
}

/// Temperature statistics between two dates
async fn stats_between(
    State(service): State<SharedAppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ClimateApiError> {
    Ok(Json(service.temperature_stats(start, Some(end)).await?))
}
