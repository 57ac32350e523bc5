//! HTTP transport abstraction used by the FCM dispatcher.
//!
//! This module provides:
//! - Request and response value types ([`HttpRequest`], [`HttpResponse`])
//! - The injectable client trait ([`HttpClient`])
//! - A production client backed by reqwest ([`ReqwestClient`])

mod client;
mod error;
mod http;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
