//! API credentials and the request headers derived from them.

use std::fmt;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::HeaderMap;

use super::FcmError;

/// Header carrying the sender id on device group requests.
const PROJECT_ID: &str = "project_id";

/// Server API key and sender id of an FCM project.
///
/// Both values are checked once, at construction, so building headers
/// for a request cannot fail. The API key is kept only as a sensitive
/// header value and is redacted from `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    authorization: HeaderValue,
    project_id: HeaderValue,
    sender_id: String,
}

impl Credentials {
    /// Creates credentials from a server API key and a sender id.
    ///
    /// # Errors
    ///
    /// Returns [`FcmError::InvalidCredential`] if either value contains
    /// characters that are not allowed in an HTTP header.
    pub fn new(api_key: &str, sender_id: impl Into<String>) -> Result<Self, FcmError> {
        let sender_id = sender_id.into();

        let mut authorization = HeaderValue::try_from(format!("key={api_key}")).map_err(|e| {
            FcmError::InvalidCredential {
                field: "api_key",
                reason: e.to_string(),
            }
        })?;
        authorization.set_sensitive(true);

        let project_id =
            HeaderValue::from_str(&sender_id).map_err(|e| FcmError::InvalidCredential {
                field: "sender_id",
                reason: e.to_string(),
            })?;

        Ok(Self {
            authorization,
            project_id,
            sender_id,
        })
    }

    /// Returns the sender id.
    #[must_use]
    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    /// Headers sent with every request: `Authorization` and `Content-Type`.
    pub(crate) fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Headers for device group requests: [`Self::headers`] plus `project_id`.
    pub(crate) fn project_headers(&self) -> HeaderMap {
        let mut headers = self.headers();
        headers.insert(PROJECT_ID, self.project_id.clone());
        headers
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("sender_id", &self.sender_id)
            .finish()
    }
}
