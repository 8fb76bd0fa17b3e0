//! This crate provides a read-only reporting API over a climate observation dataset. A
//! pre-populated SQLite store holds precipitation and temperature readings keyed by weather
//! station and date, and the service answers a small set of aggregate queries over it as JSON.
//!
//! The service is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team, on top of the [hyper] HTTP library.
//! * [Serde](serde) performs serialisation of JSON response data.
//! * [Diesel](diesel) provides typed queries and an r2d2 connection pool over SQLite.
//! * [Prometheus](prometheus) collects request and query metrics.

pub mod app;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod models;
pub mod queries;
pub mod schema;
pub mod server;
pub mod service;
pub mod store;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
