//! The FCM dispatcher.

use url::Url;

use crate::message::Message;
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

use super::body::{DeviceGroupBody, GroupOperation, TopicSubscriptionBody, as_strs};
use super::{Credentials, Endpoint, FcmError};

/// Client for the FCM HTTP API.
///
/// Each operation builds one request (fixed URL, JSON body, headers from
/// the [`Credentials`]), hands it to the injected [`HttpClient`] exactly
/// once and returns the response unaltered, whatever its status. Nothing
/// is retried and no response body is interpreted.
///
/// The HTTP client is injected after construction. Until then every
/// operation fails with [`FcmError::ClientNotConfigured`] without any
/// network I/O.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
///
/// # Example
///
/// ```no_run
/// use fcm_push::fcm::FcmClient;
/// use fcm_push::message::{Message, Notification, Recipient};
/// use fcm_push::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FcmClient::new("server-key", "1234567890")?
///     .with_http_client(ReqwestClient::new());
///
/// let message = Message::to(Recipient::device("registration-token"))
///     .with_notification(Notification::new("Hello", "World"));
///
/// let response = client.send(&message).await?;
/// println!("{}: {:?}", response.status, response.body_text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FcmClient<H> {
    credentials: Credentials,
    proxy_api_url: Option<Url>,
    http_client: Option<H>,
}

impl<H> FcmClient<H> {
    /// Creates a client without an HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FcmError::InvalidCredential`] if the API key or sender id
    /// cannot be sent as a header value.
    pub fn new(api_key: &str, sender_id: impl Into<String>) -> Result<Self, FcmError> {
        Ok(Self::from_credentials(Credentials::new(api_key, sender_id)?))
    }

    /// Creates a client from already validated credentials.
    #[must_use]
    pub const fn from_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            proxy_api_url: None,
            http_client: None,
        }
    }

    /// Installs the HTTP client used for every request, replacing any previous one.
    pub fn inject_http_client(&mut self, client: H) -> &mut Self {
        self.http_client = Some(client);
        self
    }

    /// Builder form of [`Self::inject_http_client`].
    #[must_use]
    pub fn with_http_client(mut self, client: H) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sends messages to `url` instead of [`super::DEFAULT_API_URL`].
    ///
    /// The override applies to [`Self::send`] only and stays in effect
    /// for every later call.
    pub fn set_proxy_api_url(&mut self, url: Url) -> &mut Self {
        self.proxy_api_url = Some(url);
        self
    }

    /// Builder form of [`Self::set_proxy_api_url`].
    #[must_use]
    pub fn with_proxy_api_url(mut self, url: Url) -> Self {
        self.proxy_api_url = Some(url);
        self
    }

    /// Returns the URL [`Self::send`] posts to.
    #[must_use]
    pub fn api_url(&self) -> Url {
        self.proxy_api_url.clone().unwrap_or_else(|| Endpoint::Send.url())
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the injected HTTP client, if any.
    #[must_use]
    pub const fn http_client(&self) -> Option<&H> {
        self.http_client.as_ref()
    }
}

impl<H: HttpClient> FcmClient<H> {
    /// Sends a message.
    ///
    /// POSTs the JSON-encoded message to [`Self::api_url`].
    ///
    /// # Errors
    ///
    /// - [`FcmError::Message`] if the message has no recipients
    /// - [`FcmError::ClientNotConfigured`] if no HTTP client was injected
    /// - [`FcmError::Http`] if the HTTP client fails
    pub async fn send(&self, message: &Message) -> Result<HttpResponse, FcmError> {
        message.validate()?;
        let body = serde_json::to_vec(message)?;

        let request = HttpRequest::post(self.api_url())
            .with_headers(self.credentials.headers())
            .with_body(body);

        self.dispatch(request).await
    }

    /// Creates a device group and returns FCM's answer with its notification key.
    ///
    /// # Errors
    ///
    /// - [`FcmError::ClientNotConfigured`] if no HTTP client was injected
    /// - [`FcmError::Http`] if the HTTP client fails
    pub async fn create_device_group(
        &self,
        group_name: &str,
        registration_ids: &[impl AsRef<str>],
    ) -> Result<HttpResponse, FcmError> {
        let body = DeviceGroupBody {
            operation: GroupOperation::Create,
            notification_key_name: group_name,
            notification_key: None,
            registration_ids: as_strs(registration_ids),
        };

        self.dispatch_group(&body).await
    }

    /// Looks up the notification key of a device group.
    ///
    /// Issues a GET with the group name as the `notification_key_name`
    /// query parameter. The name is percent-encoded.
    ///
    /// # Errors
    ///
    /// - [`FcmError::ClientNotConfigured`] if no HTTP client was injected
    /// - [`FcmError::Http`] if the HTTP client fails
    pub async fn retrieve_notification_key(
        &self,
        group_name: &str,
    ) -> Result<HttpResponse, FcmError> {
        let mut url = Endpoint::DeviceGroup.url();
        url.query_pairs_mut().append_pair("notification_key_name", group_name);

        let request = HttpRequest::get(url).with_headers(self.credentials.project_headers());

        self.dispatch(request).await
    }

    /// Adds devices to an existing device group.
    ///
    /// # Errors
    ///
    /// - [`FcmError::ClientNotConfigured`] if no HTTP client was injected
    /// - [`FcmError::Http`] if the HTTP client fails
    pub async fn add_device_to_group(
        &self,
        group_name: &str,
        notification_key: &str,
        registration_ids: &[impl AsRef<str>],
    ) -> Result<HttpResponse, FcmError> {
        let body = DeviceGroupBody {
            operation: GroupOperation::Add,
            notification_key_name: group_name,
            notification_key: Some(notification_key),
            registration_ids: as_strs(registration_ids),
        };

        self.dispatch_group(&body).await
    }

    /// Removes devices from a device group.
    ///
    /// FCM deletes the group once its last device is removed.
    ///
    /// # Errors
    ///
    /// - [`FcmError::ClientNotConfigured`] if no HTTP client was injected
    /// - [`FcmError::Http`] if the HTTP client fails
    pub async fn remove_device_from_group(
        &self,
        group_name: &str,
        notification_key: &str,
        registration_ids: &[impl AsRef<str>],
    ) -> Result<HttpResponse, FcmError> {
        let body = DeviceGroupBody {
            operation: GroupOperation::Remove,
            notification_key_name: group_name,
            notification_key: Some(notification_key),
            registration_ids: as_strs(registration_ids),
        };

        self.dispatch_group(&body).await
    }

    /// Subscribes registration tokens to a topic.
    ///
    /// # Errors
    ///
    /// - [`FcmError::ClientNotConfigured`] if no HTTP client was injected
    /// - [`FcmError::Http`] if the HTTP client fails
    pub async fn add_topic_subscription(
        &self,
        topic_name: &str,
        registration_tokens: &[impl AsRef<str>],
    ) -> Result<HttpResponse, FcmError> {
        let body = TopicSubscriptionBody::new(topic_name, registration_tokens);
        self.dispatch_topic(Endpoint::TopicSubscription, &body).await
    }

    /// Unsubscribes registration tokens from a topic.
    ///
    /// # Errors
    ///
    /// - [`FcmError::ClientNotConfigured`] if no HTTP client was injected
    /// - [`FcmError::Http`] if the HTTP client fails
    pub async fn remove_topic_subscription(
        &self,
        topic_name: &str,
        registration_tokens: &[impl AsRef<str>],
    ) -> Result<HttpResponse, FcmError> {
        let body = TopicSubscriptionBody::new(topic_name, registration_tokens);
        self.dispatch_topic(Endpoint::TopicUnsubscription, &body).await
    }

    async fn dispatch_group(&self, body: &DeviceGroupBody<'_>) -> Result<HttpResponse, FcmError> {
        let request = HttpRequest::post(Endpoint::DeviceGroup.url())
            .with_headers(self.credentials.project_headers())
            .with_body(serde_json::to_vec(body)?);

        self.dispatch(request).await
    }

    async fn dispatch_topic(
        &self,
        endpoint: Endpoint,
        body: &TopicSubscriptionBody<'_>,
    ) -> Result<HttpResponse, FcmError> {
        let request = HttpRequest::post(endpoint.url())
            .with_headers(self.credentials.headers())
            .with_body(serde_json::to_vec(body)?);

        self.dispatch(request).await
    }

    /// Hands the request to the HTTP client, once.
    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, FcmError> {
        let Some(client) = &self.http_client else {
            return Err(FcmError::ClientNotConfigured);
        };

        tracing::debug!(method = %request.method, url = %request.url, "Dispatching FCM request");

        Ok(client.request(request).await?)
    }
}
