//! Tests for `FcmClient`.

use super::{DEFAULT_API_URL, DEVICE_GROUP_API_URL, FcmClient, FcmError};
use crate::message::{Message, MessageError, Notification, Recipient};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

const API_KEY: &str = "AIzaSyTestKey";
const SENDER_ID: &str = "123456789012";

/// Mock HTTP client that records requests and replays canned results.
#[derive(Debug)]
struct MockClient {
    responses: std::sync::Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: std::sync::Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            requests: std::sync::Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn with_status(status: http::StatusCode, times: usize) -> Self {
        let responses = (0..times)
            .map(|_| {
                Ok(HttpResponse::new(
                    status,
                    http::HeaderMap::new(),
                    br#"{"success":1}"#.to_vec(),
                ))
            })
            .collect();
        Self::new(responses)
    }

    fn ok() -> Self {
        Self::with_status(http::StatusCode::OK, 1)
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> HttpRequest {
        let requests = self.captured_requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

fn client_with(mock: MockClient) -> FcmClient<MockClient> {
    FcmClient::new(API_KEY, SENDER_ID)
        .unwrap()
        .with_http_client(mock)
}

fn mock_of(client: &FcmClient<MockClient>) -> &MockClient {
    client.http_client().unwrap()
}

fn body_json(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
}

fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request.headers.get(name).map(|v| v.to_str().unwrap())
}

fn assert_base_headers(request: &HttpRequest) {
    assert_eq!(header(request, "authorization"), Some("key=AIzaSyTestKey"));
    assert_eq!(header(request, "content-type"), Some("application/json"));
}

fn proxy_url() -> url::Url {
    url::Url::parse("https://proxy.example.com/fcm/send").unwrap()
}

fn device_message() -> Message {
    Message::to(Recipient::device("token-1")).with_notification(Notification::new("Hi", "There"))
}

mod construction {
    use super::*;

    #[test]
    fn new_without_http_client() {
        let client: FcmClient<MockClient> = FcmClient::new(API_KEY, SENDER_ID).unwrap();

        assert!(client.http_client().is_none());
        assert_eq!(client.credentials().sender_id(), SENDER_ID);
    }

    #[test]
    fn api_url_defaults_to_send_endpoint() {
        let client: FcmClient<MockClient> = FcmClient::new(API_KEY, SENDER_ID).unwrap();
        assert_eq!(client.api_url().as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn set_proxy_api_url_overrides_api_url() {
        let mut client: FcmClient<MockClient> = FcmClient::new(API_KEY, SENDER_ID).unwrap();
        client.set_proxy_api_url(proxy_url());

        assert_eq!(client.api_url(), proxy_url());
    }

    #[test]
    fn inject_http_client_installs_client() {
        let mut client = FcmClient::new(API_KEY, SENDER_ID).unwrap();
        client.inject_http_client(MockClient::ok());

        assert!(client.http_client().is_some());
    }

    #[test]
    fn invalid_api_key_is_rejected() {
        let result = FcmClient::<MockClient>::new("bad\nkey", SENDER_ID);

        assert!(matches!(
            result,
            Err(FcmError::InvalidCredential {
                field: "api_key",
                ..
            })
        ));
    }
}

mod unconfigured {
    use super::*;

    fn unconfigured() -> FcmClient<MockClient> {
        FcmClient::new(API_KEY, SENDER_ID).unwrap()
    }

    #[tokio::test]
    async fn every_operation_fails_without_http_client() {
        let client = unconfigured();
        let ids = ["id1"];

        let results = [
            client.send(&device_message()).await,
            client.create_device_group("group1", &ids).await,
            client.retrieve_notification_key("group1").await,
            client.add_device_to_group("group1", "key", &ids).await,
            client.remove_device_from_group("group1", "key", &ids).await,
            client.add_topic_subscription("news", &ids).await,
            client.remove_topic_subscription("news", &ids).await,
        ];

        for result in results {
            assert!(matches!(result, Err(FcmError::ClientNotConfigured)));
        }
    }

    #[tokio::test]
    async fn injecting_later_makes_client_usable() {
        let mut client = unconfigured();
        assert!(client.send(&device_message()).await.is_err());

        client.inject_http_client(MockClient::ok());
        client.send(&device_message()).await.unwrap();

        assert_eq!(mock_of(&client).calls(), 1);
    }
}

mod send {
    use super::*;

    #[tokio::test]
    async fn posts_message_to_default_endpoint() {
        let client = client_with(MockClient::ok());

        client.send(&device_message()).await.unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.as_str(), DEFAULT_API_URL);
        assert_eq!(
            body_json(&request),
            json!({ "to": "token-1", "notification": { "title": "Hi", "body": "There" } })
        );
    }

    #[tokio::test]
    async fn sends_auth_and_content_type_without_project_id() {
        let client = client_with(MockClient::ok());

        client.send(&device_message()).await.unwrap();

        let request = mock_of(&client).only_request();
        assert_base_headers(&request);
        assert_eq!(header(&request, "project_id"), None);
        assert_eq!(request.headers.len(), 2);
    }

    #[tokio::test]
    async fn proxy_url_persists_across_calls() {
        let mut client = client_with(MockClient::with_status(http::StatusCode::OK, 2));
        client.set_proxy_api_url(proxy_url());

        client.send(&device_message()).await.unwrap();
        client.send(&device_message()).await.unwrap();

        let requests = mock_of(&client).captured_requests();
        assert_eq!(requests.len(), 2);
        for request in requests {
            assert_eq!(request.url, proxy_url());
        }
    }

    #[tokio::test]
    async fn message_without_recipients_is_rejected_before_dispatch() {
        let client = client_with(MockClient::ok());

        let result = client.send(&Message::new()).await;

        assert!(matches!(
            result,
            Err(FcmError::Message(MessageError::NoRecipients))
        ));
        assert_eq!(mock_of(&client).calls(), 0);
    }

    #[tokio::test]
    async fn non_success_status_is_passed_through() {
        let client = client_with(MockClient::with_status(http::StatusCode::UNAUTHORIZED, 1));

        let response = client.send(&device_message()).await.unwrap();

        assert_eq!(response.status, http::StatusCode::UNAUTHORIZED);
        assert_eq!(response.body_text(), Some(r#"{"success":1}"#));
    }

    #[tokio::test]
    async fn transport_error_is_propagated_without_retry() {
        let client = client_with(MockClient::new(vec![Err(HttpError::Timeout)]));

        let result = client.send(&device_message()).await;

        assert!(matches!(result, Err(FcmError::Http(HttpError::Timeout))));
        assert_eq!(mock_of(&client).calls(), 1);
    }
}

mod device_groups {
    use super::*;

    #[tokio::test]
    async fn create_device_group_builds_body_and_headers() {
        let client = client_with(MockClient::ok());

        client
            .create_device_group("group1", &["id1", "id2"])
            .await
            .unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.as_str(), DEVICE_GROUP_API_URL);
        assert_eq!(
            request.body.as_deref(),
            Some(
                br#"{"operation":"create","notification_key_name":"group1","registration_ids":["id1","id2"]}"#
                    .as_slice()
            )
        );
        assert_base_headers(&request);
        assert_eq!(header(&request, "project_id"), Some(SENDER_ID));
    }

    #[tokio::test]
    async fn create_device_group_accepts_owned_ids() {
        let client = client_with(MockClient::ok());
        let ids = vec!["id1".to_string()];

        client.create_device_group("group1", &ids).await.unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(body_json(&request)["registration_ids"], json!(["id1"]));
    }

    #[tokio::test]
    async fn retrieve_notification_key_issues_get_with_query() {
        let client = client_with(MockClient::ok());

        client.retrieve_notification_key("group1").await.unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://android.googleapis.com/gcm/notification?notification_key_name=group1"
        );
        assert!(request.body.is_none());
        assert_base_headers(&request);
        assert_eq!(header(&request, "project_id"), Some(SENDER_ID));
    }

    #[tokio::test]
    async fn retrieve_notification_key_encodes_group_name() {
        let client = client_with(MockClient::ok());

        client.retrieve_notification_key("a&b=c d").await.unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(request.url.query(), Some("notification_key_name=a%26b%3Dc+d"));
        let pairs: Vec<_> = request.url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, "a&b=c d");
    }

    #[tokio::test]
    async fn add_device_to_group_includes_notification_key() {
        let client = client_with(MockClient::ok());

        client
            .add_device_to_group("group1", "APA91bKey", &["id3"])
            .await
            .unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(request.url.as_str(), DEVICE_GROUP_API_URL);
        assert_eq!(
            body_json(&request),
            json!({
                "operation": "add",
                "notification_key_name": "group1",
                "notification_key": "APA91bKey",
                "registration_ids": ["id3"]
            })
        );
        assert_eq!(header(&request, "project_id"), Some(SENDER_ID));
    }

    #[tokio::test]
    async fn remove_device_from_group_uses_remove_operation() {
        let client = client_with(MockClient::ok());

        client
            .remove_device_from_group("group1", "APA91bKey", &["id1", "id2"])
            .await
            .unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(
            body_json(&request),
            json!({
                "operation": "remove",
                "notification_key_name": "group1",
                "notification_key": "APA91bKey",
                "registration_ids": ["id1", "id2"]
            })
        );
        assert_base_headers(&request);
    }

    #[tokio::test]
    async fn group_operations_ignore_proxy_url() {
        let mut client = client_with(MockClient::ok());
        client.set_proxy_api_url(proxy_url());

        client.create_device_group("group1", &["id1"]).await.unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(request.url.as_str(), DEVICE_GROUP_API_URL);
    }
}

mod topics {
    use super::*;

    #[tokio::test]
    async fn add_topic_subscription_builds_body_without_project_id() {
        let client = client_with(MockClient::ok());

        client.add_topic_subscription("news", &["tok1"]).await.unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(
            request.url.as_str(),
            "https://iid.googleapis.com/iid/v1:batchAdd"
        );
        assert_eq!(
            request.body.as_deref(),
            Some(br#"{"to":"/topics/news","registration_tokens":["tok1"]}"#.as_slice())
        );
        assert_base_headers(&request);
        assert_eq!(header(&request, "project_id"), None);
    }

    #[tokio::test]
    async fn remove_topic_subscription_posts_to_batch_remove() {
        let client = client_with(MockClient::ok());

        client
            .remove_topic_subscription("news", &["tok1", "tok2"])
            .await
            .unwrap();

        let request = mock_of(&client).only_request();
        assert_eq!(
            request.url.as_str(),
            "https://iid.googleapis.com/iid/v1:batchRemove"
        );
        assert_eq!(
            body_json(&request),
            json!({ "to": "/topics/news", "registration_tokens": ["tok1", "tok2"] })
        );
        assert_eq!(header(&request, "project_id"), None);
    }
}
