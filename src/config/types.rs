// Configuration types
// Every value here is read once at startup and immutable afterwards

use serde::Deserialize;

use crate::logger::AccessLogFormat;

/// Top-level configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub tls: TlsConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Listener address and runtime sizing
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; CPU count when unset
    pub workers: Option<usize>,
}

/// Paths of the PEM credential files
#[derive(Debug, Deserialize, Clone)]
pub struct TlsConfig {
    pub cert_file: String,
    pub key_file: String,
}

/// Static page served for GET /
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub page_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Whether to write one access line per request
    pub access_log: bool,
    #[serde(default)]
    pub access_log_format: AccessLogFormat,
    /// Append file for access/lifecycle lines; stdout when unset
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Append file for errors and warnings; stderr when unset
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Per-connection timeouts, in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// 0 disables HTTP keep-alive
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Value of the Server response header
    pub server_name: String,
    /// Adds `Access-Control-Allow-Origin: *` to every response
    pub enable_cors: bool,
}
