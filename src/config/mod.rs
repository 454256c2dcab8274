use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_DOCKER_SOCKET: &str = "/var/run/docker.sock";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DockerConfig {
    /// Filesystem path of the daemon's Unix socket.
    #[serde(default = "default_socket_path")]
    pub socket_path: String,
    /// Upper bound on a single request/response exchange, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        DockerConfig {
            socket_path: default_socket_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_socket_path() -> String {
    DEFAULT_DOCKER_SOCKET.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub excluded_modules: Vec<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        TelemetryConfig {
            enabled: false,
            service_name: default_service_name(),
            otlp_endpoint: default_otlp_endpoint(),
            log_level: default_log_level(),
            excluded_modules: Vec::new(),
        }
    }
}

fn default_service_name() -> String {
    "dockside".to_string()
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file: File = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `DOCKSIDE_CONFIG` (or `config.yaml`), falling back to
    /// defaults when no file exists so the service runs against a local
    /// daemon without any setup.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("DOCKSIDE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        if Path::new(&path).exists() {
            Config::from_file(path)
        } else {
            Ok(Config::default())
        }
    }
}
