//! Delivery targets for a message.

use std::fmt;

/// Where a message is delivered.
///
/// Every variant wraps the opaque string FCM uses to address it, available
/// through [`Recipient::identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// A single device, addressed by its registration token.
    Device(String),
    /// Every device subscribed to the named topic.
    Topic(String),
    /// A device group, addressed by its notification key.
    Group(String),
}

impl Recipient {
    /// Creates a device recipient from a registration token.
    #[must_use]
    pub fn device(token: impl Into<String>) -> Self {
        Self::Device(token.into())
    }

    /// Creates a topic recipient from a topic name (without `/topics/`).
    #[must_use]
    pub fn topic(name: impl Into<String>) -> Self {
        Self::Topic(name.into())
    }

    /// Creates a group recipient from a notification key.
    #[must_use]
    pub fn group(notification_key: impl Into<String>) -> Self {
        Self::Group(notification_key.into())
    }

    /// Returns the token, topic name or notification key.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Device(id) | Self::Topic(id) | Self::Group(id) => id,
        }
    }

    /// Returns the kind of this recipient.
    #[must_use]
    pub const fn kind(&self) -> RecipientKind {
        match self {
            Self::Device(_) => RecipientKind::Device,
            Self::Topic(_) => RecipientKind::Topic,
            Self::Group(_) => RecipientKind::Group,
        }
    }
}

/// Discriminant of [`Recipient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientKind {
    /// Registration token
    Device,
    /// Topic name
    Topic,
    /// Device group notification key
    Group,
}

impl fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Device => "device",
            Self::Topic => "topic",
            Self::Group => "group",
        };
        f.write_str(name)
    }
}
