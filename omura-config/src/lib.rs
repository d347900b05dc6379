//! Shared configuration loader for omura.
//!
//! `defaults/omura.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user files and
//! command-line overrides on top of those defaults via [`Loader`] before deserializing
//! into [`OmuraConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/omura.default.toml");

const OMURA_DIR: &str = ".omura";
const KNOWN_HOSTS_FILE: &str = "known_hosts.json";
const USER_CONFIG_FILE: &str = "omura.toml";

/// Top-level configuration consumed by omura.
#[derive(Debug, Clone, Deserialize)]
pub struct OmuraConfig {
    pub client: ClientSettings,
    pub search: SearchSettings,
    pub output: OutputSettings,
}

/// Transport settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    pub port: u16,
    pub idle_timeout_secs: u64,
    pub known_hosts: String,
}

impl ClientSettings {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// The configured known hosts file, or `~/.omura/known_hosts.json` when none is set.
    ///
    /// Without a home directory there is no stable default, and an explicit path is required.
    pub fn known_hosts_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.known_hosts.is_empty() {
            return Ok(PathBuf::from(&self.known_hosts));
        }
        omura_dir()
            .map(|dir| dir.join(KNOWN_HOSTS_FILE))
            .ok_or_else(|| {
                ConfigError::Message(
                    "no home directory found; set client.known_hosts".to_string(),
                )
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub endpoint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Gemtext,
    Tree,
    Tokens,
    AstJson,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub links: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<OmuraConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn omura_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(OMURA_DIR))
}

/// The per-user configuration file, `~/.omura/omura.toml`. It need not exist.
pub fn user_config_path() -> Option<PathBuf> {
    omura_dir().map(|dir| dir.join(USER_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = Loader::new().build().expect("defaults to deserialize");
        assert_eq!(config.client.port, 1965);
        assert_eq!(config.client.idle_timeout(), Duration::from_secs(30));
        assert!(config.client.known_hosts.is_empty());
        assert_eq!(config.search.endpoint, "gemini://geminispace.info/search");
        assert_eq!(config.output.format, OutputFormat::Gemtext);
        assert!(!config.output.links);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "ast-json")
            .expect("override to apply")
            .set_override("client.idle_timeout_secs", 5)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::AstJson);
        assert_eq!(config.client.idle_timeout_secs, 5);
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("omura.toml");
        fs::write(&path, "[client]\nknown_hosts = \"/tmp/pins.json\"\n").expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(
            config.client.known_hosts_path().expect("explicit path"),
            PathBuf::from("/tmp/pins.json")
        );
        assert_eq!(config.client.port, 1965);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .expect("config to build");
        assert_eq!(config.client.port, 1965);
    }

    #[test]
    fn required_file_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build()
            .is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Loader::new()
            .set_override("output.format", "html")
            .expect("override to apply")
            .build()
            .is_err());
    }

    #[test]
    fn default_known_hosts_live_in_home() {
        let config = Loader::new().build().expect("config to build");
        match dirs::home_dir() {
            Some(home) => {
                let path = config.client.known_hosts_path().expect("home directory");
                assert_eq!(path, home.join(".omura").join("known_hosts.json"));
                assert!(path.is_absolute());
            }
            None => assert!(config.client.known_hosts_path().is_err()),
        }
    }

    #[test]
    fn user_config_sits_next_to_known_hosts() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(user_config_path(), Some(home.join(".omura").join("omura.toml")));
        }
    }
}
