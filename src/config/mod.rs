use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::gate::{ConcurrencyLimit, RequestGate, TokenBucket, Unlimited};
use crate::api::{ClientConfig, Credentials, BASE_URL};
use crate::error::{FsrError, Result};

const CONFIG_DIR_NAME: &str = ".fsreg";
const CONFIG_FILE_NAME: &str = "config.yaml";

pub const USERNAME_ENV: &str = "FSREG_API_USERNAME";
pub const KEY_ENV: &str = "FSREG_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Register account e-mail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            username: None,
            key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Limiting strategy for outbound requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GateStrategy {
    #[default]
    Unlimited,
    Concurrency,
    TokenBucket,
}

impl GateStrategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unlimited" | "none" => Some(Self::Unlimited),
            "concurrency" => Some(Self::Concurrency),
            "token_bucket" | "token-bucket" => Some(Self::TokenBucket),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlimited => "unlimited",
            Self::Concurrency => "concurrency",
            Self::TokenBucket => "token_bucket",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GateConfig {
    #[serde(default)]
    pub strategy: GateStrategy,

    /// Requests in flight (concurrency strategy)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Requests admitted per window (token bucket strategy)
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,

    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            strategy: GateStrategy::default(),
            max_concurrent: default_max_concurrent(),
            requests_per_window: default_requests_per_window(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_max_concurrent() -> usize {
    4
}

fn default_requests_per_window() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    10
}

impl GateConfig {
    /// Instantiate the configured strategy
    pub fn build(&self) -> Arc<dyn RequestGate> {
        match self.strategy {
            GateStrategy::Unlimited => Arc::new(Unlimited),
            GateStrategy::Concurrency => Arc::new(ConcurrencyLimit::new(self.max_concurrent)),
            GateStrategy::TokenBucket => Arc::new(TokenBucket::new(
                Duration::from_secs(self.window_secs),
                self.requests_per_window,
            )),
        }
    }
}

impl Config {
    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| FsrError::Config("Could not determine home directory".to_string()))?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Initialize configuration directory and file
    pub fn initialize() -> Result<()> {
        Self::initialize_at(&Self::config_file_path()?)
    }

    /// Create `config_file` (and its directory) with defaults if missing
    pub fn initialize_at(config_file: &Path) -> Result<()> {
        if let Some(config_dir) = config_file.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).map_err(|e| {
                    FsrError::Config(format!("Failed to create config directory: {}", e))
                })?;
                restrict_permissions(config_dir, 0o700)?;
            }
        }

        if !config_file.exists() {
            Self::default().save_to(config_file)?;
        }

        Ok(())
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `config_file`, creating it if missing
    pub fn load_from(config_file: &Path) -> Result<Self> {
        Self::initialize_at(config_file)?;

        let contents = fs::read_to_string(config_file)
            .map_err(|e| FsrError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| FsrError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, config_file: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| FsrError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_file, yaml)
            .map_err(|e| FsrError::Config(format!("Failed to write config file: {}", e)))?;

        restrict_permissions(config_file, 0o600)
    }

    /// Credentials from the environment, falling back to the file
    pub fn credentials(&self) -> Result<Credentials> {
        let username = env_value(USERNAME_ENV).or_else(|| self.api.username.clone());
        let key = env_value(KEY_ENV).or_else(|| self.api.key.clone());

        match (username, key) {
            (Some(username), Some(key)) => {
                let credentials = Credentials::new(username, key);
                if credentials.is_complete() {
                    Ok(credentials)
                } else {
                    Err(FsrError::NoCredentials)
                }
            }
            _ => Err(FsrError::NoCredentials),
        }
    }

    /// Client configuration for this config
    pub fn client_config(&self) -> Result<ClientConfig> {
        Ok(ClientConfig {
            credentials: self.credentials()?,
            base_url: self.api.base_url.clone(),
            timeout: self.api.timeout,
            gate: self.gate.build(),
            ..Default::default()
        })
    }

    /// Set a configuration value by key path (does not save)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.username" => self.api.username = Some(value.to_string()),
            "api.key" => self.api.key = Some(value.to_string()),
            "api.base_url" => self.api.base_url = value.to_string(),
            "api.timeout" => self.api.timeout = parse_number(key, value)?,
            "gate.strategy" => {
                self.gate.strategy = GateStrategy::from_str(value).ok_or_else(|| {
                    FsrError::Config(format!(
                        "Unknown gate strategy '{}' (expected unlimited, concurrency or token_bucket)",
                        value
                    ))
                })?
            }
            "gate.max_concurrent" => self.gate.max_concurrent = parse_number(key, value)?,
            "gate.requests_per_window" => {
                self.gate.requests_per_window = parse_number(key, value)?
            }
            "gate.window_secs" => self.gate.window_secs = parse_number(key, value)?,
            _ => {
                return Err(FsrError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.username" => self.api.username.clone(),
            "api.key" => self.api.key.clone(),
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout" => Some(self.api.timeout.to_string()),
            "gate.strategy" => Some(self.gate.strategy.as_str().to_string()),
            "gate.max_concurrent" => Some(self.gate.max_concurrent.to_string()),
            "gate.requests_per_window" => Some(self.gate.requests_per_window.to_string()),
            "gate.window_secs" => Some(self.gate.window_secs.to_string()),
            _ => None,
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FsrError::Config(format!("'{}' expects a number, got '{}'", key, value)))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| FsrError::Config(format!("Failed to set permissions: {}", e)))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
