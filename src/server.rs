//! Web server

use crate::cli;

use std::{net::SocketAddr, path::PathBuf, process::exit, str::FromStr, time::Duration};

use axum::ServiceExt;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use expanduser::expanduser;
use tokio::signal;

/// Serve the climate API
///
/// # Arguments
///
/// * `args`: Command line arguments
/// * `service`: The [crate::app::Service] to serve
pub async fn serve(args: &cli::CommandLineArgs, service: crate::app::Service) {
    let Ok(addr) = SocketAddr::from_str(&format!("{}:{}", args.host, args.port)) else {
        tracing::error!("invalid host name, IP address or port number");
        exit(1)
    };

    // Catch ctrl+c and try to shutdown gracefully
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(
        handle.clone(),
        args.graceful_shutdown_timeout,
    ));

    tracing::info!("listening on {}", addr);
    let result = if args.https {
        let cert_file = tls_file(&args.cert_file, "certificate");
        let key_file = tls_file(&args.key_file, "key");
        let tls_config = match RustlsConfig::from_pem_file(cert_file, key_file).await {
            Ok(tls_config) => tls_config,
            Err(err) => {
                tracing::error!("Failed to load TLS certificate files: {}", err);
                exit(1)
            }
        };
        // run HTTPS server with hyper
        axum_server::bind_rustls(addr, tls_config)
            .handle(handle)
            .serve(service.into_make_service())
            .await
    } else {
        // run HTTP server with hyper
        axum_server::bind(addr)
            .handle(handle)
            .serve(service.into_make_service())
            .await
    };
    if let Err(err) = result {
        tracing::error!("server failed: {}", err);
        exit(1)
    }
}

/// Resolve a TLS file path, exiting if it cannot be found.
///
/// # Arguments
///
/// * `path`: Path to the file, which may begin with `~`
/// * `kind`: Description of the file used in error messages
fn tls_file(path: &str, kind: &str) -> PathBuf {
    let resolved = expanduser(path).and_then(|p| p.canonicalize());
    match resolved {
        Ok(resolved) if resolved.exists() => resolved,
        _ => {
            tracing::error!("TLS {} file expected at '{}' but not found.", kind, path);
            exit(1)
        }
    }
}

/// Graceful shutdown handler
///
/// Installs signal handlers to catch Ctrl-C or SIGTERM and trigger a graceful shutdown.
async fn shutdown_signal(handle: Handle, timeout: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
    // Force shutdown if graceful shutdown takes longer than the configured timeout
    handle.graceful_shutdown(Some(Duration::from_secs(timeout)));
}
