//! Error types for message construction.

use thiserror::Error;

use super::RecipientKind;

/// A message that the FCM send endpoint cannot address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    /// A recipient of a different kind was added to a message.
    #[error("Cannot add a {added} recipient to a message addressed to {existing} recipients")]
    MixedRecipients {
        /// Kind already present on the message
        existing: RecipientKind,
        /// Kind that was rejected
        added: RecipientKind,
    },

    /// A second device group was added; FCM addresses one group per message.
    #[error("A message can target only one device group")]
    MultipleGroups,

    /// The message has no recipients.
    #[error("Message has no recipients")]
    NoRecipients,
}
