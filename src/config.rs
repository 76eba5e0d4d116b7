use crate::keymap::Keymap;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UI theme: "dark", "light" or "nocolor"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Location shown on the safety routing screen until the user edits it
    #[serde(default = "default_location")]
    pub default_location: String,
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Keyboard bindings (preset + overrides)
    #[serde(default)]
    pub keymap: Keymap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub endpoints: EndpointPaths,
}

/// Endpoint paths, relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPaths {
    #[serde(default = "default_login_path")]
    pub login: String,
    #[serde(default = "default_signup_path")]
    pub signup: String,
    #[serde(default = "default_addresses_path")]
    pub addresses: String,
    #[serde(default = "default_safety_path")]
    pub safety: String,
    #[serde(default = "default_routes_path")]
    pub routes: String,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_location() -> String {
    "2972 Westheimer Rd Santa Ana, Illinois 60466".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_signup_path() -> String {
    "/signup".to_string()
}

fn default_addresses_path() -> String {
    "/addresses".to_string()
}

fn default_safety_path() -> String {
    "/safety".to_string()
}

fn default_routes_path() -> String {
    "/routes".to_string()
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            login: default_login_path(),
            signup: default_signup_path(),
            addresses: default_addresses_path(),
            safety: default_safety_path(),
            routes: default_routes_path(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            endpoints: EndpointPaths::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            keymap: Keymap::default(),
            theme: default_theme(),
            default_location: default_location(),
        }
    }
}

impl Config {
    /// Load configuration from file or create it with defaults
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            if config.default_location.trim().is_empty() {
                config.default_location = default_location();
            }
            if config.api.timeout_ms == 0 {
                bail!("api.timeout_ms must be at least 1 in {:?}", config_path);
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // 600: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    /// Apply one-off overrides from the command line
    pub fn apply_overrides(&mut self, base_url: Option<String>, timeout_ms: Option<u64>) {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        if let Some(ms) = timeout_ms {
            self.api.timeout_ms = ms;
        }
    }
}
