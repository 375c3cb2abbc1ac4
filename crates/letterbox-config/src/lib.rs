//! Configuration for letterbox.
//!
//! Newsletter targets live in a YAML file:
//!
//! ```yaml
//! newsletters:
//!   - name: This Week in Rust
//!     query: "from:twir@example.com newer_than:7d"
//!     folder_id: 1AbCdEf
//!     schedule: "0 9 * * MON"
//!     footer_starts_with: "You are receiving this"
//! ```
//!
//! Runtime settings (access token, webhook URL) come from the environment.

pub mod error;
pub mod settings;

pub use error::{ConfigError, Result};
pub use settings::RuntimeSettings;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "LETTERBOX_CONFIG";

/// Config file location relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/newsletters.yaml";

/// One newsletter target: which mail to look for and where to archive it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterConfig {
    /// Display name used in logs
    pub name: String,
    /// Mailbox search query
    pub query: String,
    /// Destination folder in the document store
    pub folder_id: String,
    /// Informational schedule, consumed by whatever triggers the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Literal text whose first occurrence starts the footer to drop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_starts_with: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    newsletters: Vec<NewsletterConfig>,
}

/// Loaded application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    path: PathBuf,
    newsletters: Vec<NewsletterConfig>,
}

impl AppConfig {
    /// Resolve the config path from `LETTERBOX_CONFIG` or the default
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load and validate the YAML file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    /// Parse and validate YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping
        let file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str::<Option<ConfigFile>>(contents)?.unwrap_or_default()
        };

        let config = Self {
            path: PathBuf::new(),
            newsletters: file.newsletters,
        };
        config.validate()?;
        Ok(config)
    }

    /// Registered newsletter targets, in file order
    pub fn newsletters(&self) -> &[NewsletterConfig] {
        &self.newsletters
    }

    /// Path the config was loaded from (empty when parsed from text)
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn validate(&self) -> Result<()> {
        for (index, newsletter) in self.newsletters.iter().enumerate() {
            let fields = [
                ("name", &newsletter.name),
                ("query", &newsletter.query),
                ("folder_id", &newsletter.folder_id),
            ];
            for (field, value) in fields {
                if value.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "newsletter #{} has an empty `{}`",
                        index + 1,
                        field
                    )));
                }
            }
        }
        Ok(())
    }
}
