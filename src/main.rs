//! This file defines the climate-api binary entry point.

use std::error::Error;
use std::process::exit;

use climate_api::app;
use climate_api::cli;
use climate_api::metrics;
use climate_api::server;
use climate_api::store::Store;
use climate_api::tracing;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing(&args);
    ::tracing::info!("{:?}", args);
    metrics::register_metrics();
    let store = match Store::open(&args) {
        Ok(store) => store,
        Err(err) => {
            ::tracing::error!("failed to open climate database: {}", err);
            let mut current = err.source();
            while let Some(source) = current {
                ::tracing::error!("Caused by: {}", source);
                current = source.source();
            }
            exit(1)
        }
    };
    let service = app::service(store);
    server::serve(&args, service).await;
}
