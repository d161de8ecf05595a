//! Hand-rolled logging.
//!
//! Access and lifecycle lines go to the out sink, errors and warnings to
//! the err sink; both default to the console and can be redirected to
//! files through the logging configuration. Validation failures on the
//! query API are not logged here, they only show up as 400s in the
//! access log.

mod format;
mod writer;

pub use format::{AccessLogEntry, AccessLogFormat};

use crate::config::{Config, LoggingConfig};
use std::net::SocketAddr;

/// Open the configured log targets. Called once before serving starts.
pub fn init(cfg: &LoggingConfig) -> std::io::Result<()> {
    writer::init(cfg.access_log_file.as_deref(), cfg.error_log_file.as_deref())
}

/// Banner announcing the bound listener
pub fn log_server_start(addr: &SocketAddr, cfg: &Config) {
    writer::out_line("======================================");
    writer::out_line("HTTPS server started successfully");
    writer::out_line(&format!("Listening on: https://{addr}"));
    writer::out_line(&format!("Log level: {}", cfg.logging.level));
    if let Some(workers) = cfg.server.workers {
        writer::out_line(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = cfg.logging.access_log_file {
        writer::out_line(&format!("Access log: {path}"));
    }
    if let Some(ref path) = cfg.logging.error_log_file {
        writer::out_line(&format!("Error log: {path}"));
    }
    writer::out_line("======================================\n");
}

/// One rendered line per completed request
pub fn log_access(entry: &AccessLogEntry, format: AccessLogFormat) {
    writer::out_line(&entry.render(format));
}

pub fn log_handshake_error(peer_addr: &SocketAddr, err: &std::io::Error) {
    writer::err_line(&format!("[TLS] Handshake with {peer_addr} failed: {err}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    writer::err_line(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    writer::err_line(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    writer::err_line(&format!("[WARN] {message}"));
}
