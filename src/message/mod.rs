//! Message model for the FCM send endpoint.
//!
//! This module provides:
//! - Delivery targets ([`Recipient`], [`RecipientKind`])
//! - The user-visible notification part ([`Notification`])
//! - The full send payload with its options ([`Message`], [`Priority`])
//! - Validation errors ([`MessageError`])

mod error;
mod notification;
mod payload;
mod recipient;

#[cfg(test)]
mod recipient_tests;

pub use error::MessageError;
pub use notification::Notification;
pub use payload::{Message, Priority};
pub use recipient::{Recipient, RecipientKind};
