//! Request builder and dispatcher for the FCM HTTP API.
//!
//! This module provides:
//! - The dispatcher ([`FcmClient`]) with one method per API operation
//! - API credentials and the headers derived from them ([`Credentials`])
//! - The fixed endpoint URLs ([`Endpoint`] and the `*_API_URL` constants)
//! - The error type for all dispatcher operations ([`FcmError`])

mod body;
mod client;
mod credentials;
mod endpoint;
mod error;

#[cfg(test)]
mod client_tests;

pub use client::FcmClient;
pub use credentials::Credentials;
pub use endpoint::{
    DEFAULT_API_URL, DEVICE_GROUP_API_URL, Endpoint, TOPIC_SUBSCRIPTION_API_URL,
    TOPIC_UNSUBSCRIPTION_API_URL,
};
pub use error::FcmError;
