// Service Configuration
// Bind address and logging settings. No config file: values come from CLI flags or env.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid bind address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub log: LogConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub file_log: bool,
    pub log_dir: Option<PathBuf>,
    /// Session log files kept in `log_dir`; older ones are pruned at startup.
    pub keep_sessions: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_log: true,
            log_dir: None,
            keep_sessions: default_keep_sessions(),
        }
    }
}

pub fn default_host() -> String { "0.0.0.0".to_string() }
pub fn default_port() -> u16 { 5000 }
pub fn default_keep_sessions() -> usize { 30 }

impl ServiceConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        };
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}

impl LogConfig {
    /// Explicit directory if set (blank counts as unset), otherwise the platform data dir.
    pub fn resolved_log_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(p) if !p.as_os_str().is_empty() => p.clone(),
            _ => default_logs_dir(),
        }
    }
}

fn default_logs_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        return data_dir.join("veridity").join("logs");
    }
    PathBuf::from("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(config.log.file_log);
        assert_eq!(config.log.keep_sessions, 30);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_ipv6_host() {
        let config = ServiceConfig {
            host: "::1".to_string(),
            port: 8080,
            ..ServiceConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:8080");
    }

    #[test]
    fn test_invalid_host() {
        let config = ServiceConfig {
            host: "not a host".to_string(),
            ..ServiceConfig::default()
        };
        let err = config.socket_addr().unwrap_err();
        assert!(err.to_string().contains("not a host:5000"));
    }

    #[test]
    fn test_log_dir_resolution() {
        let explicit = LogConfig {
            log_dir: Some(PathBuf::from("/tmp/veridity-logs")),
            ..LogConfig::default()
        };
        assert_eq!(explicit.resolved_log_dir(), PathBuf::from("/tmp/veridity-logs"));

        let blank = LogConfig {
            log_dir: Some(PathBuf::new()),
            ..LogConfig::default()
        };
        assert!(blank.resolved_log_dir().ends_with("logs"));
    }
}
