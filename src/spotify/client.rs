use std::{sync::Arc, time::Duration};

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tokio::time::sleep;

use crate::{
    config::Settings,
    error::ApiError,
    info,
    traits::HttpTransport,
    types::{HttpRequest, HttpResponse},
    utils, warning,
};

/// Per-call knobs for [`SpotifyClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    /// Attempt budget. `None` falls back to the client's configured default.
    pub retries: Option<u32>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            retries: None,
        }
    }
}

/// Authenticated Spotify Web API client with retry and rate-limit handling.
///
/// Every call goes through [`SpotifyClient::request`], which owns the retry
/// policy:
///
/// - `429 Too Many Requests`: waits for `retry-after` (default one second)
///   and tries again. Each 429 uses up one attempt. Values above the
///   configured ceiling are not waited on and fail with
///   [`ApiError::RateLimited`].
/// - `401 Unauthorized`: fails at once with [`ApiError::AuthExpired`]. The
///   token is known to be bad, so retrying is pointless.
/// - other non-2xx statuses, transport failures and undecodable bodies: wait
///   the fixed retry delay and try again while attempts remain.
///
/// The client never touches persisted state or UI.
#[derive(Clone)]
pub struct SpotifyClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    max_retries: u32,
    retry_delay: Duration,
    max_retry_after: Duration,
}

impl SpotifyClient {
    pub fn new(transport: Arc<dyn HttpTransport>, settings: &Settings) -> Self {
        Self {
            transport,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries,
            retry_delay: settings.retry_delay,
            max_retry_after: settings.max_retry_after,
        }
    }

    /// Base URL endpoints are joined onto, without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<T, ApiError> {
        self.request(url, token, RequestOptions::default()).await
    }

    /// Issues one logical request, retrying as described on the type.
    ///
    /// # Errors
    ///
    /// - [`ApiError::AuthExpired`] on the first `401`
    /// - [`ApiError::RateLimited`] when the last attempt was rate limited or the
    ///   server asked for an excessive wait
    /// - [`ApiError::Status`], [`ApiError::Transport`] or [`ApiError::Decode`]
    ///   from the last attempt once the budget is spent
    pub async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let retries = options.retries.unwrap_or(self.max_retries).max(1);
        let body = options
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut attempts = 0;
        loop {
            attempts += 1;

            let request = HttpRequest {
                method: options.method.clone(),
                url: url.to_string(),
                headers: vec![
                    ("Authorization".to_string(), format!("Bearer {token}")),
                    ("Content-Type".to_string(), "application/json".to_string()),
                ],
                body: body.clone(),
            };

            let failure = match self.transport.send(request).await {
                Ok(response) if response.status == 429 => {
                    let wait = utils::parse_retry_after(response.header("retry-after"));
                    if wait > self.max_retry_after {
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds. Giving up on {}.",
                            wait.as_secs(),
                            url
                        );
                        return Err(ApiError::RateLimited(wait));
                    }
                    if attempts >= retries {
                        return Err(ApiError::RateLimited(wait));
                    }

                    info!("Rate limited, waiting {}s", wait.as_secs());
                    sleep(wait).await;
                    continue;
                }
                Ok(response) if response.status == 401 => return Err(ApiError::AuthExpired),
                Ok(response) => match decode::<T>(&response) {
                    Ok(value) => return Ok(value),
                    Err(e) => e,
                },
                Err(e) => ApiError::Transport(e),
            };

            if attempts >= retries {
                return Err(failure);
            }

            info!(
                "Request failed ({}/{}), retrying... Err: {}",
                attempts, retries, failure
            );
            sleep(self.retry_delay).await;
        }
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if !(200..300).contains(&response.status) {
        return Err(ApiError::Status(response.status));
    }

    // 204 and friends carry no body
    let body = match response.body.trim() {
        "" => "null",
        body => body,
    };

    Ok(serde_json::from_str(body)?)
}
