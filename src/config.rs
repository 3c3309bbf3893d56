use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080/geoserver/";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "geoserver";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// GeoServer base URL, e.g. `http://localhost:8080/geoserver/`
    pub server_url: ConfigValue<String>,
    pub username: ConfigValue<String>,
    pub password: ConfigValue<String>,
    /// PostgreSQL URL of the database behind the PostGIS stores. Only
    /// needed to publish layers.
    pub database_url: ConfigValue<Option<String>>,
    pub request_timeout_secs: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    server_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    database_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut server_url = ConfigValue::new(DEFAULT_SERVER_URL.to_string(), ConfigSource::Default);
        let mut username = ConfigValue::new(DEFAULT_USERNAME.to_string(), ConfigSource::Default);
        let mut password = ConfigValue::new(DEFAULT_PASSWORD.to_string(), ConfigSource::Default);
        let mut database_url = ConfigValue::new(None, ConfigSource::Default);
        let mut request_timeout_secs = ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.server_url {
                server_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(user) = file_config.username {
                username = ConfigValue::new(user, ConfigSource::File);
            }
            if let Some(pass) = file_config.password {
                password = ConfigValue::new(pass, ConfigSource::File);
            }
            if let Some(url) = file_config.database_url {
                database_url = ConfigValue::new(Some(url), ConfigSource::File);
            }
            if let Some(secs) = file_config.request_timeout_secs {
                request_timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("GEOSYNC_URL") {
            server_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(user) = std::env::var("GEOSYNC_USERNAME") {
            username = ConfigValue::new(user, ConfigSource::Environment);
        }
        if let Ok(pass) = std::env::var("GEOSYNC_PASSWORD") {
            password = ConfigValue::new(pass, ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("GEOSYNC_DATABASE_URL") {
            database_url = ConfigValue::new(Some(url), ConfigSource::Environment);
        }
        if let Ok(secs) = std::env::var("GEOSYNC_TIMEOUT") {
            let parsed = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "GEOSYNC_TIMEOUT".to_string(),
                value: secs.clone(),
            })?;
            request_timeout_secs = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        Ok(Self {
            server_url,
            username,
            password,
            database_url,
            request_timeout_secs,
            config_file,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.value)
    }

    /// Copy safe to print: the password is replaced by asterisks.
    pub fn masked(&self) -> Self {
        let mut config = self.clone();
        config.password.value = "*".repeat(8);
        config
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/geosync/
    /// - macOS: ~/Library/Application Support/geosync/
    /// - Windows: %APPDATA%/geosync/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("geosync")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
