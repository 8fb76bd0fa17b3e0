//! Command Line Interface (CLI) arguments.

use clap::Parser;

/// climate-api command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "CLIMATE_API_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 8080, env = "CLIMATE_API_PORT")]
    pub port: u16,
    /// Path to the SQLite climate database. Opened read-only.
    #[arg(
        long,
        default_value = "Resources/hawaii.sqlite",
        env = "CLIMATE_API_DATABASE"
    )]
    pub database: String,
    /// Maximum number of concurrent database sessions
    #[arg(long, default_value_t = 5, env = "CLIMATE_API_POOL_SIZE")]
    pub pool_size: u32,
    /// Maximum time in seconds to wait for a free database session
    #[arg(long, default_value_t = 30, env = "CLIMATE_API_CONNECTION_TIMEOUT")]
    pub connection_timeout: u64,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "CLIMATE_API_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/climate-api/certs/cert.pem",
        env = "CLIMATE_API_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/climate-api/certs/key.pem",
        env = "CLIMATE_API_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for requests to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "CLIMATE_API_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Whether to emit logs as JSON lines.
    #[arg(long, default_value_t = false, env = "CLIMATE_API_LOG_JSON")]
    pub log_json: bool,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CommandLineArgs::parse_from(["climate-api"]);
        assert_eq!("0.0.0.0", args.host);
        assert_eq!(8080, args.port);
        assert_eq!("Resources/hawaii.sqlite", args.database);
        assert_eq!(5, args.pool_size);
        assert!(!args.https);
        assert!(!args.log_json);
    }

    #[test]
    fn overrides() {
        let args = CommandLineArgs::parse_from([
            "climate-api",
            "--port",
            "5000",
            "--database",
            "/data/hawaii.sqlite",
            "--pool-size",
            "2",
        ]);
        assert_eq!(5000, args.port);
        assert_eq!("/data/hawaii.sqlite", args.database);
        assert_eq!(2, args.pool_size);
    }

    #[test]
    fn command_is_valid() {
        use clap::CommandFactory;
        CommandLineArgs::command().debug_assert();
    }
}
