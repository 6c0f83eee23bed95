//! Configuration module for KSync.
//!
//! Provides typed configuration structs that map to the configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.
//!
//! The file is parsed as YAML. Since YAML is a superset of JSON, flat JSON
//! configuration files (`{"directory": ..., "users": [...]}`) load as well.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default API base URL (versioned path included)
pub const DEFAULT_BASE_URL: &str = "https://dashboard.hammerhead.io/v1";

/// Default file extension of route files
pub const DEFAULT_ROUTE_EXTENSION: &str = "gpx";

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for KSync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base directory holding one subfolder per collection.
    pub directory: PathBuf,
    /// Descend into nested subfolders instead of stopping at the first level.
    #[serde(default)]
    pub scan_subfolders: bool,
    /// Sanitize route file names on disk before scanning.
    #[serde(default)]
    pub clean_filenames: bool,
    /// Delete all routes of a matched collection before uploading.
    #[serde(default)]
    pub clear_collections: bool,
    /// Extension (without the dot) identifying route files. Case-sensitive.
    #[serde(default = "default_route_extension")]
    pub route_extension: String,
    /// Accounts to synchronize, processed in order.
    #[serde(default)]
    pub users: Vec<UserCredentials>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_route_extension() -> String {
    DEFAULT_ROUTE_EXTENSION.to_string()
}

/// Username/password pair for the credential exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
}

impl UserCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Versioned base URL, without trailing slash.
    pub base_url: String,
    /// Number of routes requested when listing a collection for clearing.
    ///
    /// Only one page is fetched; larger collections are cleared partially.
    pub routes_page_size: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Pause inserted after every state-mutating remote call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub enabled: bool,
    /// Lower bound of the random pause, in whole seconds.
    pub min_secs: u64,
    /// Upper bound of the random pause, in whole seconds (inclusive).
    pub max_secs: u64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Output format: `text` or `json`.
    pub format: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML (or JSON) file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load and validate in one step.
    ///
    /// All validation errors are joined into a single error message.
    pub fn load_validated(path: &Path) -> anyhow::Result<Self> {
        let config = Self::load(path)?;
        let errors = config.validate();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            anyhow::bail!("Invalid configuration in {}: {}", path.display(), joined);
        }
        Ok(config)
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/ksync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("ksync")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            scan_subfolders: false,
            clean_filenames: false,
            clear_collections: false,
            route_extension: default_route_extension(),
            users: Vec::new(),
            api: ApiConfig::default(),
            pacing: PacingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            routes_page_size: 50,
            timeout_secs: 60,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_secs: 1,
            max_secs: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"api.routes_page_size"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid values for `logging.format`.
const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

/// Upper bound accepted for `api.routes_page_size`.
const MAX_ROUTES_PAGE_SIZE: u32 = 500;

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. The existence of
    /// `directory` on disk is not checked here; the scanner reports that.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.directory.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "directory".into(),
                message: "must not be empty".into(),
            });
        }

        if self.route_extension.is_empty() {
            errors.push(ValidationError {
                field: "route_extension".into(),
                message: "must not be empty".into(),
            });
        } else if self.route_extension.starts_with('.') {
            errors.push(ValidationError {
                field: "route_extension".into(),
                message: format!(
                    "must not start with a dot (use '{}')",
                    self.route_extension.trim_start_matches('.')
                ),
            });
        }

        // --- users ---
        if self.users.is_empty() {
            errors.push(ValidationError {
                field: "users".into(),
                message: "at least one user is required".into(),
            });
        }
        for (i, user) in self.users.iter().enumerate() {
            if user.username.trim().is_empty() {
                errors.push(ValidationError {
                    field: format!("users[{i}].username"),
                    message: "must not be empty".into(),
                });
            }
        }

        // --- api ---
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            errors.push(ValidationError {
                field: "api.base_url".into(),
                message: format!("'{}' is not an http(s) URL", self.api.base_url),
            });
        }
        if self.api.routes_page_size == 0 || self.api.routes_page_size > MAX_ROUTES_PAGE_SIZE {
            errors.push(ValidationError {
                field: "api.routes_page_size".into(),
                message: format!("must be in range 1..={MAX_ROUTES_PAGE_SIZE}"),
            });
        }
        if self.api.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "api.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- pacing ---
        if self.pacing.min_secs > self.pacing.max_secs {
            errors.push(ValidationError {
                field: "pacing.min_secs".into(),
                message: format!(
                    "min_secs ({}) must not exceed max_secs ({})",
                    self.pacing.min_secs, self.pacing.max_secs
                ),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }
        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            errors.push(ValidationError {
                field: "logging.format".into(),
                message: format!(
                    "invalid format '{}'; valid options: {}",
                    self.logging.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use ksync_core::config::ConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = ConfigBuilder::new()
///     .directory(PathBuf::from("/home/user/routes"))
///     .user("rider@example.com", "secret")
///     .clear_collections(true)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = directory.into();
        self
    }

    pub fn scan_subfolders(mut self, enabled: bool) -> Self {
        self.config.scan_subfolders = enabled;
        self
    }

    pub fn clean_filenames(mut self, enabled: bool) -> Self {
        self.config.clean_filenames = enabled;
        self
    }

    pub fn clear_collections(mut self, enabled: bool) -> Self {
        self.config.clear_collections = enabled;
        self
    }

    pub fn route_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.route_extension = extension.into();
        self
    }

    /// Append an account.
    pub fn user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config
            .users
            .push(UserCredentials::new(username, password));
        self
    }

    // --- api ---

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    pub fn api_routes_page_size(mut self, n: u32) -> Self {
        self.config.api.routes_page_size = n;
        self
    }

    pub fn api_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.api.timeout_secs = seconds;
        self
    }

    // --- pacing ---

    pub fn pacing_enabled(mut self, enabled: bool) -> Self {
        self.config.pacing.enabled = enabled;
        self
    }

    pub fn pacing_bounds(mut self, min_secs: u64, max_secs: u64) -> Self {
        self.config.pacing.min_secs = min_secs;
        self.config.pacing.max_secs = max_secs;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn logging_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
