//! Validated configuration after merging CLI and TOML sources.
//!
//! All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::fcm::Credentials;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration for the API commands.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// API key and sender id, already usable as header values
    pub credentials: Credentials,

    /// URL replacing the send endpoint, if any
    pub proxy_url: Option<Url>,

    /// Per-request timeout
    pub timeout: Duration,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let proxy_str = self
            .proxy_url
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);

        write!(
            f,
            "Config {{ sender_id: {}, proxy_url: {}, timeout: {}s }}",
            self.credentials.sender_id(),
            proxy_str,
            self.timeout.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`api_key`, `sender_id`)
    /// - A credential cannot be sent as a header value
    /// - The proxy URL is invalid
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let credentials = Self::resolve_credentials(cli, toml)?;
        let proxy_url = Self::resolve_proxy_url(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;

        Ok(Self {
            credentials,
            proxy_url,
            timeout,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_credentials(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Credentials, ConfigError> {
        let section = toml.map(|t| &t.credentials);

        let api_key = cli
            .api_key
            .as_deref()
            .or_else(|| section.and_then(|s| s.api_key.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::API_KEY,
                    "Use --api-key or set credentials.api_key in config file",
                )
            })?;

        let sender_id = cli
            .sender_id
            .as_deref()
            .or_else(|| section.and_then(|s| s.sender_id.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SENDER_ID,
                    "Use --sender-id or set credentials.sender_id in config file",
                )
            })?;

        Credentials::new(api_key, sender_id).map_err(|e| ConfigError::InvalidCredential {
            reason: e.to_string(),
        })
    }

    fn resolve_proxy_url(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<Url>, ConfigError> {
        let Some(url_str) = cli
            .proxy_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.proxy_url.as_deref()))
        else {
            return Ok(None);
        };

        Url::parse(url_str)
            .map(Some)
            .map_err(|e| ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: e.to_string(),
            })
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.client.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
