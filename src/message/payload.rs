//! The send payload and its delivery options.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::{MessageError, Notification, Recipient, RecipientKind};

/// Delivery priority of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// May be delayed to save battery.
    Normal,
    /// Delivered immediately, may wake a sleeping device.
    High,
}

/// A message for the FCM send endpoint.
///
/// Serializes to the legacy HTTP body. Addressing depends on the
/// recipients:
///
/// | Recipients | JSON |
/// |---|---|
/// | one device | `"to": "<token>"` |
/// | several devices | `"registration_ids": [...]` |
/// | one topic | `"to": "/topics/<name>"` |
/// | several topics | `"condition": "'a' in topics \|\| 'b' in topics"` |
/// | a group | `"to": "<notification key>"` |
///
/// # Example
///
/// ```
/// use fcm_push::message::{Message, Notification, Priority, Recipient};
///
/// let message = Message::to(Recipient::topic("news"))
///     .with_notification(Notification::new("Hello", "World"))
///     .with_priority(Priority::High);
///
/// let json = serde_json::to_value(&message).unwrap();
/// assert_eq!(json["to"], "/topics/news");
/// assert_eq!(json["priority"], "high");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    recipients: Vec<Recipient>,
    notification: Option<Notification>,
    data: Option<Map<String, Value>>,
    priority: Option<Priority>,
    collapse_key: Option<String>,
    time_to_live: Option<u32>,
    content_available: bool,
    mutable_content: bool,
    dry_run: bool,
}

impl Message {
    /// Creates an empty message with no recipients.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a message addressed to a single recipient.
    #[must_use]
    pub fn to(recipient: Recipient) -> Self {
        Self {
            recipients: vec![recipient],
            ..Self::default()
        }
    }

    /// Adds a recipient.
    ///
    /// # Errors
    ///
    /// - [`MessageError::MixedRecipients`] if the message already targets
    ///   a different kind of recipient
    /// - [`MessageError::MultipleGroups`] if the message already targets a group
    pub fn add_recipient(mut self, recipient: Recipient) -> Result<Self, MessageError> {
        if let Some(existing) = self.recipient_kind() {
            if existing != recipient.kind() {
                return Err(MessageError::MixedRecipients {
                    existing,
                    added: recipient.kind(),
                });
            }
            if existing == RecipientKind::Group {
                return Err(MessageError::MultipleGroups);
            }
        }

        self.recipients.push(recipient);
        Ok(self)
    }

    /// Sets the notification part.
    #[must_use]
    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }

    /// Replaces the custom data payload.
    #[must_use]
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Adds one key to the custom data payload.
    #[must_use]
    pub fn with_data_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the delivery priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the collapse key; pending messages with the same key replace each other.
    #[must_use]
    pub fn with_collapse_key(mut self, key: impl Into<String>) -> Self {
        self.collapse_key = Some(key.into());
        self
    }

    /// Sets how long, in seconds, FCM keeps the message while the device is offline.
    #[must_use]
    pub const fn with_time_to_live(mut self, seconds: u32) -> Self {
        self.time_to_live = Some(seconds);
        self
    }

    /// Wakes an inactive iOS client app.
    #[must_use]
    pub const fn with_content_available(mut self, enabled: bool) -> Self {
        self.content_available = enabled;
        self
    }

    /// Lets an iOS notification service extension modify the notification.
    #[must_use]
    pub const fn with_mutable_content(mut self, enabled: bool) -> Self {
        self.mutable_content = enabled;
        self
    }

    /// Asks FCM to validate the message without delivering it.
    #[must_use]
    pub const fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Returns the recipients.
    #[must_use]
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Returns the kind shared by all recipients, if any.
    #[must_use]
    pub fn recipient_kind(&self) -> Option<RecipientKind> {
        self.recipients.first().map(Recipient::kind)
    }

    /// Returns the notification part, if set.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Checks that the message can be addressed.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NoRecipients`] if no recipient was added.
    pub fn validate(&self) -> Result<(), MessageError> {
        if self.recipients.is_empty() {
            return Err(MessageError::NoRecipients);
        }
        Ok(())
    }

    fn addressing(&self) -> Addressing<'_> {
        match self.recipients.as_slice() {
            [] => Addressing::default(),
            [Recipient::Topic(name)] => Addressing {
                to: Some(format!("/topics/{name}")),
                ..Addressing::default()
            },
            [single] => Addressing {
                to: Some(single.identifier().to_string()),
                ..Addressing::default()
            },
            many if self.recipient_kind() == Some(RecipientKind::Topic) => Addressing {
                condition: Some(
                    many.iter()
                        .map(|r| format!("'{}' in topics", r.identifier()))
                        .collect::<Vec<_>>()
                        .join(" || "),
                ),
                ..Addressing::default()
            },
            many => Addressing {
                registration_ids: Some(many.iter().map(Recipient::identifier).collect()),
                ..Addressing::default()
            },
        }
    }
}

/// Target fields of the wire body; at most one is set.
#[derive(Default)]
struct Addressing<'a> {
    to: Option<String>,
    registration_ids: Option<Vec<&'a str>>,
    condition: Option<String>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    registration_ids: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collapse_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_to_live: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    content_available: bool,
    #[serde(skip_serializing_if = "is_false")]
    mutable_content: bool,
    #[serde(skip_serializing_if = "is_false")]
    dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<&'a Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Map<String, Value>>,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde passes fields by reference
const fn is_false(value: &bool) -> bool {
    !*value
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Addressing {
            to,
            registration_ids,
            condition,
        } = self.addressing();

        WireMessage {
            to,
            registration_ids,
            condition,
            collapse_key: self.collapse_key.as_deref(),
            priority: self.priority,
            time_to_live: self.time_to_live,
            content_available: self.content_available,
            mutable_content: self.mutable_content,
            dry_run: self.dry_run,
            notification: self.notification.as_ref(),
            data: self.data.as_ref(),
        }
        .serialize(serializer)
    }
}
