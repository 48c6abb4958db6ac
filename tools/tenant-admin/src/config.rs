//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

/// Tenant Admin: multi-tenant management console
#[derive(Parser, Debug, Clone)]
#[command(name = "tenant-admin")]
#[command(about = "TUI console listing managed tenants with on-demand details")]
pub struct Args {
    /// Base URL of the console API (serving /api/ListTenants)
    #[arg(short, long, default_value = "http://127.0.0.1:7071")]
    pub endpoint: String,

    /// Currently selected tenant, used to name exports
    #[arg(short, long, default_value = "AllTenants")]
    pub tenant: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Auto-refresh interval for the listing in seconds (0 disables)
    #[arg(short, long, default_value = "0")]
    pub refresh: u64,

    /// Directory CSV exports are written to
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Run in demo mode with fake data (no API connection required)
    #[arg(long)]
    pub demo: bool,
}

/// Configuration errors, reported before the terminal is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid endpoint {0:?}: expected an http(s) URL")]
    Endpoint(String),
    #[error("tenant id must not be empty")]
    EmptyTenant,
    #[error("timeout must be at least one second")]
    Timeout,
}

/// Validated console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub endpoint: String,
    pub tenant_id: String,
    pub request_timeout: Duration,
    /// `None` when auto-refresh is off.
    pub refresh_interval: Option<Duration>,
    pub export_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub demo: bool,
}

impl TryFrom<Args> for ConsoleConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let url = Url::parse(&args.endpoint).map_err(|_| ConfigError::Endpoint(args.endpoint.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Endpoint(args.endpoint));
        }

        let tenant_id = args.tenant.trim().to_string();
        if tenant_id.is_empty() {
            return Err(ConfigError::EmptyTenant);
        }
        if args.timeout == 0 {
            return Err(ConfigError::Timeout);
        }

        Ok(Self {
            endpoint: args.endpoint,
            tenant_id,
            request_timeout: Duration::from_secs(args.timeout),
            refresh_interval: (args.refresh > 0).then(|| Duration::from_secs(args.refresh)),
            export_dir: args.export_dir,
            log_file: args.log_file,
            demo: args.demo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<ConsoleConfig, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("tenant-admin").chain(argv.iter().copied()))
            .expect("arguments should parse");
        ConsoleConfig::try_from(args)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:7071");
        assert_eq!(config.tenant_id, "AllTenants");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.refresh_interval, None);
        assert!(!config.demo);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "-e",
            "https://console.example.com",
            "-t",
            "partner.onmicrosoft.com",
            "--refresh",
            "30",
            "--demo",
        ])
        .unwrap();
        assert_eq!(config.tenant_id, "partner.onmicrosoft.com");
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(30)));
        assert!(config.demo);
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert_eq!(
            parse(&["-e", "not a url"]).unwrap_err(),
            ConfigError::Endpoint("not a url".into())
        );
        assert_eq!(
            parse(&["-e", "ftp://host"]).unwrap_err(),
            ConfigError::Endpoint("ftp://host".into())
        );
    }

    #[test]
    fn test_rejects_empty_tenant_and_zero_timeout() {
        assert_eq!(parse(&["-t", "  "]).unwrap_err(), ConfigError::EmptyTenant);
        assert_eq!(parse(&["--timeout", "0"]).unwrap_err(), ConfigError::Timeout);
    }
}
