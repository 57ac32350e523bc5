//! JSON bodies of the device group and topic endpoints.

use serde::Serialize;

/// The `operation` field of a device group request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOperation {
    Create,
    Add,
    Remove,
}

#[derive(Debug, Serialize)]
pub struct DeviceGroupBody<'a> {
    pub operation: GroupOperation,
    pub notification_key_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_key: Option<&'a str>,
    pub registration_ids: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct TopicSubscriptionBody<'a> {
    pub to: String,
    pub registration_tokens: Vec<&'a str>,
}

impl<'a> TopicSubscriptionBody<'a> {
    pub fn new(topic_name: &str, registration_tokens: &'a [impl AsRef<str>]) -> Self {
        Self {
            to: format!("/topics/{topic_name}"),
            registration_tokens: as_strs(registration_tokens),
        }
    }
}

pub fn as_strs(ids: &[impl AsRef<str>]) -> Vec<&str> {
    ids.iter().map(AsRef::as_ref).collect()
}
