//! Command execution.
//!
//! Turns one API command into exactly one FCM request and reports the
//! answer on stdout.

use thiserror::Error;

use fcm_push::config::{ApiCommand, ConfigError, ValidatedConfig};
use fcm_push::fcm::{FcmClient, FcmError};
use fcm_push::transport::{HttpClient, HttpError, HttpResponse, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// The `send` arguments do not describe a valid message.
    #[error("Invalid send arguments: {0}")]
    Arguments(#[source] ConfigError),

    /// The dispatcher failed.
    #[error("{0}")]
    Fcm(#[from] FcmError),

    /// FCM answered with a non-2xx status.
    #[error("FCM rejected the request: {0}")]
    Rejected(#[source] HttpError),
}

/// Executes a single API command.
///
/// This function:
/// 1. Creates the HTTP client with the configured timeout
/// 2. Creates the FCM client, applying the proxy URL if configured
/// 3. Dispatches the command
/// 4. Prints the response status and body
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created, the request
/// fails, or FCM answers with a non-2xx status.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it talks to the real
/// FCM endpoints.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: &ApiCommand) -> Result<(), RunError> {
    let http_client = ReqwestClient::with_timeout(config.timeout).map_err(RunError::HttpClient)?;

    let mut client = FcmClient::from_credentials(config.credentials).with_http_client(http_client);
    if let Some(url) = config.proxy_url {
        tracing::info!("Sending messages through proxy {url}");
        client.set_proxy_api_url(url);
    }

    let response = dispatch(&client, command).await?;
    report(&response);

    response
        .error_for_status()
        .map(drop)
        .map_err(RunError::Rejected)
}

/// Issues the FCM request matching `command`.
async fn dispatch<H: HttpClient>(
    client: &FcmClient<H>,
    command: &ApiCommand,
) -> Result<HttpResponse, RunError> {
    let response = match command {
        ApiCommand::Send(args) => {
            let message = args.to_message().map_err(RunError::Arguments)?;
            client.send(&message).await?
        }
        ApiCommand::CreateGroup { name, ids } => client.create_device_group(name, ids).await?,
        ApiCommand::NotificationKey { name } => client.retrieve_notification_key(name).await?,
        ApiCommand::AddToGroup(args) => {
            client
                .add_device_to_group(&args.name, &args.key, &args.ids)
                .await?
        }
        ApiCommand::RemoveFromGroup(args) => {
            client
                .remove_device_from_group(&args.name, &args.key, &args.ids)
                .await?
        }
        ApiCommand::Subscribe(args) => {
            client
                .add_topic_subscription(&args.topic, &args.tokens)
                .await?
        }
        ApiCommand::Unsubscribe(args) => {
            client
                .remove_topic_subscription(&args.topic, &args.tokens)
                .await?
        }
    };

    Ok(response)
}

/// Prints the response as-is.
fn report(response: &HttpResponse) {
    println!("{}", render_response(response));
}

fn render_response(response: &HttpResponse) -> String {
    match response.body_text() {
        Some("") => response.status.to_string(),
        Some(text) => format!("{}\n{text}", response.status),
        None => format!(
            "{}\n<{} bytes of binary data>",
            response.status,
            response.body.len()
        ),
    }
}
