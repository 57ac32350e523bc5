//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

use crate::message::{Message, Notification, Priority, Recipient};

use super::ConfigError;
use super::defaults;

/// fcm-push: Firebase Cloud Messaging client
///
/// Sends push notifications and manages device groups and topic
/// subscriptions through the FCM HTTP API.
#[derive(Debug, Parser)]
#[command(name = "fcm-push")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Server API key
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// Sender (project) id, required by device group commands
    #[arg(long = "sender-id", global = true)]
    pub sender_id: Option<String>,

    /// Send messages through this URL instead of the FCM endpoint
    #[arg(long = "proxy-url", global = true)]
    pub proxy_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for fcm-push
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Commands that call the FCM API
    #[command(flatten)]
    Api(ApiCommand),
}

/// Subcommands that issue exactly one FCM request.
#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Send a message to devices, topics or a device group
    Send(SendArgs),

    /// Create a device group
    CreateGroup {
        /// Group name, unique within the project
        #[arg(long)]
        name: String,

        /// Registration id of a member device (can be specified multiple times)
        #[arg(long = "id", value_name = "ID", required = true)]
        ids: Vec<String>,
    },

    /// Look up the notification key of a device group
    NotificationKey {
        /// Group name
        #[arg(long)]
        name: String,
    },

    /// Add devices to a device group
    AddToGroup(GroupArgs),

    /// Remove devices from a device group
    RemoveFromGroup(GroupArgs),

    /// Subscribe devices to a topic
    Subscribe(TopicArgs),

    /// Unsubscribe devices from a topic
    Unsubscribe(TopicArgs),
}

/// Arguments of the `send` command.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["tokens", "topics", "group"])))]
pub struct SendArgs {
    /// Registration token of a target device (can be specified multiple times)
    #[arg(long = "token", value_name = "TOKEN")]
    pub tokens: Vec<String>,

    /// Target topic name (can be specified multiple times)
    #[arg(long = "topic", value_name = "NAME")]
    pub topics: Vec<String>,

    /// Notification key of a target device group
    #[arg(long, value_name = "KEY")]
    pub group: Option<String>,

    /// Notification title
    #[arg(long)]
    pub title: Option<String>,

    /// Notification body
    #[arg(long)]
    pub body: Option<String>,

    /// Custom data in 'Key=Value' format (can be specified multiple times)
    #[arg(long = "data", value_name = "K=V")]
    pub data: Vec<String>,

    /// Delivery priority
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Collapse key
    #[arg(long = "collapse-key")]
    pub collapse_key: Option<String>,

    /// Seconds FCM keeps the message for offline devices
    #[arg(long)]
    pub ttl: Option<u32>,

    /// Validate the message without delivering it
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Arguments of `add-to-group` and `remove-from-group`.
#[derive(Debug, Args)]
pub struct GroupArgs {
    /// Group name
    #[arg(long)]
    pub name: String,

    /// Notification key of the group
    #[arg(long)]
    pub key: String,

    /// Registration id (can be specified multiple times)
    #[arg(long = "id", value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

/// Arguments of `subscribe` and `unsubscribe`.
#[derive(Debug, Args)]
pub struct TopicArgs {
    /// Topic name, without the `/topics/` prefix
    #[arg(long)]
    pub topic: String,

    /// Registration token (can be specified multiple times)
    #[arg(long = "token", value_name = "TOKEN", required = true)]
    pub tokens: Vec<String>,
}

/// Priority argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    /// Normal priority
    Normal,
    /// High priority
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Normal => Self::Normal,
            PriorityArg::High => Self::High,
        }
    }
}

impl SendArgs {
    /// Builds the message described by these arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--data` entry is not `Key=Value` or no
    /// target was given.
    pub fn to_message(&self) -> Result<Message, ConfigError> {
        let recipients = self
            .tokens
            .iter()
            .map(Recipient::device)
            .chain(self.topics.iter().map(Recipient::topic))
            .chain(self.group.iter().map(Recipient::group));

        let mut message = Message::new();
        for recipient in recipients {
            message = message.add_recipient(recipient)?;
        }
        message.validate()?;

        if self.title.is_some() || self.body.is_some() {
            let mut notification = Notification::default();
            if let Some(title) = &self.title {
                notification = notification.with_title(title);
            }
            if let Some(body) = &self.body {
                notification = notification.with_body(body);
            }
            message = message.with_notification(notification);
        }

        for entry in &self.data {
            let (key, value) = parse_data_entry(entry)?;
            message = message.with_data_entry(key, value);
        }

        if let Some(priority) = self.priority {
            message = message.with_priority(priority.into());
        }
        if let Some(key) = &self.collapse_key {
            message = message.with_collapse_key(key);
        }
        if let Some(ttl) = self.ttl {
            message = message.with_time_to_live(ttl);
        }

        Ok(message.with_dry_run(self.dry_run))
    }
}

fn parse_data_entry(s: &str) -> Result<(&str, &str), ConfigError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ConfigError::InvalidData {
            value: s.to_string(),
        }),
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
