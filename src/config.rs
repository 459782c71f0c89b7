//! Run configuration
//!
//! Every knob for a locate-and-plot run lives in one explicit structure that
//! is loaded from a JSON file and validated before any network call is made.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Environment variable that overrides the configuration file path
pub const CONFIG_PATH_ENV: &str = "FLOORPLOT_CONFIG";

/// Default configuration file, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "floorplot.json";

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// All settings for a single locate-and-plot run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Hardware address of the client device to locate
    pub hardware_address: String,
    /// Base URL of the location service, e.g. "https://10.10.10.10/api"
    pub server_url: String,
    /// API username for basic authentication
    pub username: String,
    /// API password for basic authentication
    pub password: String,
    /// Path the composite image is written to
    pub output_path: String,
    /// Marker fill color as an RGB triple
    pub marker_color: [u8; 3],
    /// Marker radius in pixels
    pub marker_radius_px: u32,
    /// Upper bound for either output dimension in pixels
    pub max_output_px: u32,
    /// Verify the server's TLS certificate (disable for self-signed setups)
    pub verify_cert: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            hardware_address: String::new(),
            server_url: String::new(),
            username: String::new(),
            password: String::new(),
            output_path: "client-location.png".to_string(),
            marker_color: [255, 0, 0],
            marker_radius_px: 50,
            max_output_px: 800,
            verify_cert: false,
        }
    }
}

impl RunConfig {
    /// Load from the path named in `FLOORPLOT_CONFIG`, falling back to
    /// `floorplot.json` in the working directory
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_file(path)
    }

    /// Load and parse a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to parse config file '{}': {}", path_str, e),
        })
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }

    /// Validate every field before a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hardware_address.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "hardware_address".to_string(),
                value: self.hardware_address.clone(),
                reason: "a client hardware address is required".to_string(),
            });
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ConfigError::InvalidParameter {
                parameter: "server_url".to_string(),
                value: self.server_url.clone(),
                reason: "must be an http(s) URL such as https://10.10.10.10/api".to_string(),
            });
        }

        if self.username.is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "username".to_string(),
                value: self.username.clone(),
                reason: "basic authentication requires a username".to_string(),
            });
        }

        if self.output_path.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "output_path".to_string(),
                value: self.output_path.clone(),
                reason: "an output file path is required".to_string(),
            });
        }

        if self.marker_radius_px == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "marker_radius_px".to_string(),
                value: self.marker_radius_px.to_string(),
                reason: "the marker must be at least one pixel wide".to_string(),
            });
        }

        if self.max_output_px == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_output_px".to_string(),
                value: self.max_output_px.to_string(),
                reason: "the output size cap must be positive".to_string(),
            });
        }

        Ok(())
    }
}
