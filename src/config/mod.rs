//! Configuration layer for the `fcm-push` command-line tool.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`], [`ApiCommand`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file** (`--config`)
//! 3. **Built-in defaults**
//!
//! `api_key` and `sender_id` have no default and must come from the CLI
//! or the file. The proxy URL has no default; without it messages go to
//! [`crate::fcm::DEFAULT_API_URL`].

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{ApiCommand, Cli, Command, GroupArgs, PriorityArg, SendArgs, TopicArgs};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
