//! # Storefront Configuration
//!
//! Loaded once at startup, read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RESEND_API_KEY=re_...                                              │
//! │     BREW_EMAIL_PROVIDER=log                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BREW_CONFIG_PATH, or                                              │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Bean & Brew identity, embedded catalog, log email sender           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! name = "Bean & Brew"
//! support_email = "support@beanandbrew.com"
//!
//! [catalog]
//! path = "/srv/storefront/catalog.json"
//!
//! [email]
//! provider = "resend"   # resend | log
//! api_key = "re_..."
//!
//! [checkout]
//! notification_timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use brew_notify::{StoreIdentity, RESEND_API_BASE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BREW_CONFIG_PATH";

// =============================================================================
// Config Error
// =============================================================================

/// Why the configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Store Settings
// =============================================================================

/// Identity used in email headers, subjects and footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub name: String,
    /// `From:` header of every outgoing email.
    pub sender: String,
    pub support_email: String,
    pub site_url: String,
    pub postal_address: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let identity = StoreIdentity::default();
        StoreSettings {
            name: identity.name,
            sender: identity.sender,
            support_email: identity.support_email,
            site_url: identity.site_url,
            postal_address: identity.postal_address,
        }
    }
}

impl StoreSettings {
    pub fn identity(&self) -> StoreIdentity {
        StoreIdentity {
            name: self.name.clone(),
            sender: self.sender.clone(),
            support_email: self.support_email.clone(),
            site_url: self.site_url.trim_end_matches('/').to_string(),
            postal_address: self.postal_address.clone(),
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where products and reviews come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Catalog JSON file. The catalog bundled with the binary when absent.
    pub path: Option<PathBuf>,
}

// =============================================================================
// Email Settings
// =============================================================================

/// Which email sender the storefront uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailProvider {
    /// Resend HTTP API.
    Resend,

    /// Log the message instead of sending it.
    #[default]
    Log,
}

impl std::fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailProvider::Resend => write!(f, "resend"),
            EmailProvider::Log => write!(f, "log"),
        }
    }
}

impl std::str::FromStr for EmailProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resend" => Ok(EmailProvider::Resend),
            "log" | "none" => Ok(EmailProvider::Log),
            other => Err(ConfigError::Invalid(format!(
                "Unknown email provider: '{}'. Valid options: resend, log",
                other
            ))),
        }
    }
}

/// Email sender settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub provider: EmailProvider,

    /// Resend API key. Usually supplied through `RESEND_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    RESEND_API_BASE.to_string()
}

impl Default for EmailSettings {
    fn default() -> Self {
        EmailSettings {
            provider: EmailProvider::default(),
            api_key: None,
            api_base_url: default_api_base_url(),
        }
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

/// Checkout behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// How long checkout waits for the confirmation email (seconds).
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_secs: u64,
}

fn default_notification_timeout() -> u64 {
    10
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            notification_timeout_secs: default_notification_timeout(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub email: EmailSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, `$BREW_CONFIG_PATH`, or the platform
    ///    config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        if self.email.provider == EmailProvider::Resend
            && self.email.api_key.as_deref().map_or(true, |key| key.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "email.provider is resend but no API key is set (RESEND_API_KEY)".into(),
            ));
        }

        if self.checkout.notification_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "checkout.notification_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment overrides, reading variables through `var`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("RESEND_API_KEY") {
            debug!("Using Resend API key from environment");
            self.email.api_key = Some(key);
        }

        if let Some(provider) = var("BREW_EMAIL_PROVIDER") {
            match provider.parse() {
                Ok(parsed) => self.email.provider = parsed,
                Err(_) => warn!(provider = %provider, "Unknown email provider in environment"),
            }
        }

        if let Some(url) = var("BREW_EMAIL_API_BASE_URL") {
            self.email.api_base_url = url;
        }

        if let Some(path) = var("BREW_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(name) = var("BREW_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(email) = var("BREW_SUPPORT_EMAIL") {
            self.store.support_email = email;
        }

        if let Some(secs) = var("BREW_NOTIFICATION_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.checkout.notification_timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric notification timeout"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "beanandbrew", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.checkout.notification_timeout_secs)
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Shared, read-only configuration.
#[derive(Debug, Clone)]
pub struct ConfigState {
    config: Arc<StorefrontConfig>,
}

impl ConfigState {
    pub fn new(config: StorefrontConfig) -> Self {
        ConfigState {
            config: Arc::new(config),
        }
    }

    pub fn get(&self) -> &StorefrontConfig {
        &self.config
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::new(StorefrontConfig::default())
    }
}
