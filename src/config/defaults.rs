//! Default values for configuration options.

use std::time::Duration;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default output path of `fcm-push init`.
pub const CONFIG_FILE: &str = "fcm-push.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
