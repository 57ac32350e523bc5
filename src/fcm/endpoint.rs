//! Fixed FCM endpoint URLs.

use url::Url;

/// Default URL of the send endpoint.
pub const DEFAULT_API_URL: &str = "https://fcm.googleapis.com/fcm/send";

/// URL of the device group management endpoint.
pub const DEVICE_GROUP_API_URL: &str = "https://android.googleapis.com/gcm/notification";

/// URL of the batch topic subscription endpoint.
pub const TOPIC_SUBSCRIPTION_API_URL: &str = "https://iid.googleapis.com/iid/v1:batchAdd";

/// URL of the batch topic unsubscription endpoint.
pub const TOPIC_UNSUBSCRIPTION_API_URL: &str = "https://iid.googleapis.com/iid/v1:batchRemove";

/// One of the fixed FCM endpoints.
///
/// The send endpoint can be replaced by a proxy URL on
/// [`crate::fcm::FcmClient`]; the others are never overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Message send endpoint
    Send,
    /// Device group create/add/remove/lookup
    DeviceGroup,
    /// Topic `batchAdd`
    TopicSubscription,
    /// Topic `batchRemove`
    TopicUnsubscription,
}

impl Endpoint {
    /// Returns the endpoint URL as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Send => DEFAULT_API_URL,
            Self::DeviceGroup => DEVICE_GROUP_API_URL,
            Self::TopicSubscription => TOPIC_SUBSCRIPTION_API_URL,
            Self::TopicUnsubscription => TOPIC_UNSUBSCRIPTION_API_URL,
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(self) -> Url {
        Url::parse(self.as_str()).expect("endpoint constants are valid URLs")
    }
}
