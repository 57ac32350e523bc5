//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API credentials
    #[serde(default)]
    pub credentials: CredentialsSection,

    /// HTTP client settings
    #[serde(default)]
    pub client: ClientSection,
}

/// Credentials section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    /// Server API key
    pub api_key: Option<String>,

    /// Sender (project) id
    pub sender_id: Option<String>,
}

/// HTTP client section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Proxy URL replacing the send endpoint
    pub proxy_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# fcm-push configuration file

[credentials]
# Server API key (required, can be overridden by --api-key)
# api_key = "AAAA..."

# Sender (project) id, sent as the project_id header on device group requests
# (required, can be overridden by --sender-id)
# sender_id = "123456789012"

[client]
# Send messages through a proxy instead of https://fcm.googleapis.com/fcm/send
# Device group and topic requests always use the FCM endpoints.
# proxy_url = "https://proxy.example.com/fcm/send"

# Request timeout in seconds (default: 30)
timeout = 30
"#
    .to_string()
}
