//! Access log line rendering.
//!
//! Three formats are supported: `common` (CLF), `combined` (CLF plus
//! referer and user-agent) and `json` (one object per line). The format
//! is fixed in configuration at startup.

use chrono::{DateTime, Local};
use serde::Deserialize;

/// Wire format of one access log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLogFormat {
    /// Apache/Nginx combined format
    Combined,
    /// Common Log Format
    #[default]
    Common,
    /// Structured JSON, one object per line
    Json,
}

/// Everything about a finished request that an access line can mention
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Handler wall time in microseconds
    pub duration_us: u64,
}

impl AccessLogEntry {
    /// Capture the request side of an entry; the response fields are
    /// filled in once the handler has returned.
    pub fn begin(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            duration_us: 0,
        }
    }

    /// Render the entry in the given format
    pub fn render(&self, format: AccessLogFormat) -> String {
        match format {
            AccessLogFormat::Combined => format!(
                "{} \"{}\" \"{}\"",
                self.clf_line(),
                self.referer.as_deref().unwrap_or("-"),
                self.user_agent.as_deref().unwrap_or("-"),
            ),
            AccessLogFormat::Common => self.clf_line(),
            AccessLogFormat::Json => self.json_line(),
        }
    }

    /// `METHOD /path?query HTTP/version`
    fn request_line(&self) -> String {
        match &self.query {
            Some(q) => format!("{} {}?{} HTTP/{}", self.method, self.path, q, self.http_version),
            None => format!("{} {} HTTP/{}", self.method, self.path, self.http_version),
        }
    }

    fn clf_line(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn json_line(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "duration_us": self.duration_us,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::begin(
            "192.168.1.1".to_string(),
            "GET".to_string(),
            "/api/dados".to_string(),
        );
        entry.query = Some("OLT=OLT01&SLOT=1&PON=2".to_string());
        entry.status = 200;
        entry.body_bytes = 95;
        entry.referer = Some("https://example.com".to_string());
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.duration_us = 1500;
        entry
    }

    #[test]
    fn test_common_line_shape() {
        let line = sample_entry().render(AccessLogFormat::Common);
        assert!(line.starts_with("192.168.1.1 - - ["));
        assert!(line.contains("\"GET /api/dados?OLT=OLT01&SLOT=1&PON=2 HTTP/1.1\""));
        assert!(line.ends_with("200 95"));
        assert!(!line.contains("Mozilla/5.0"));
    }

    #[test]
    fn test_combined_extends_common() {
        let entry = sample_entry();
        let line = entry.render(AccessLogFormat::Combined);
        assert!(line.starts_with(&entry.render(AccessLogFormat::Common)));
        assert!(line.ends_with("\"https://example.com\" \"Mozilla/5.0\""));
    }

    #[test]
    fn test_combined_dashes_for_absent_headers() {
        let entry = AccessLogEntry::begin(
            "10.0.0.1".to_string(),
            "POST".to_string(),
            "/api/dados".to_string(),
        );
        let line = entry.render(AccessLogFormat::Combined);
        assert!(line.contains("\"POST /api/dados HTTP/1.1\""));
        assert!(line.ends_with("\"-\" \"-\""));
    }

    #[test]
    fn test_json_line_round_trips() {
        let parsed: serde_json::Value =
            serde_json::from_str(&sample_entry().render(AccessLogFormat::Json)).unwrap();
        assert_eq!(parsed["remote_addr"], "192.168.1.1");
        assert_eq!(parsed["method"], "GET");
        assert_eq!(parsed["query"], "OLT=OLT01&SLOT=1&PON=2");
        assert_eq!(parsed["status"], 200);
        assert_eq!(parsed["body_bytes"], 95);
        assert_eq!(parsed["duration_us"], 1500);
    }

    #[test]
    fn test_json_null_fields() {
        let entry = AccessLogEntry::begin("::1".to_string(), "GET".to_string(), "/".to_string());
        let parsed: serde_json::Value =
            serde_json::from_str(&entry.render(AccessLogFormat::Json)).unwrap();
        assert_eq!(parsed["query"], serde_json::Value::Null);
        assert_eq!(parsed["referer"], serde_json::Value::Null);
    }

    #[test]
    fn test_format_names_deserialize() {
        for (name, expected) in [
            ("combined", AccessLogFormat::Combined),
            ("common", AccessLogFormat::Common),
            ("json", AccessLogFormat::Json),
        ] {
            let parsed: AccessLogFormat =
                serde_json::from_value(serde_json::Value::String(name.to_string())).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_unknown_format_name_is_rejected() {
        assert!(
            serde_json::from_value::<AccessLogFormat>(serde_json::Value::String(
                "verbose".to_string()
            ))
            .is_err()
        );
    }
}
