//! fcm-push: Firebase Cloud Messaging client
//!
//! A thin client for the FCM HTTP API. It builds the JSON bodies and
//! headers for sending messages, managing device groups and managing
//! topic subscriptions, and forwards them through an injected HTTP client.

pub mod config;
pub mod fcm;
pub mod message;
pub mod transport;
