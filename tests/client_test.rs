mod common;

use std::time::Duration;

use common::{FakeTransport, client, json, rate_limited};
use discspot::{
    error::{ApiError, TransportError},
    spotify::client::RequestOptions,
    types::CurrentUser,
};
use tokio::time::Instant;

const ME: &str = "https://api.spotify.com/v1/me";
const PROFILE: &str = r#"{"id":"user-1","display_name":"Tester"}"#;

#[tokio::test(start_paused = true)]
async fn test_rate_limit_waits_and_retries() {
    let transport = FakeTransport::scripted(vec![
        Ok(rate_limited("1")),
        Ok(rate_limited("1")),
        Ok(json(200, PROFILE)),
    ]);
    let client = client(transport.clone());

    let start = Instant::now();
    let user: CurrentUser = client.get(ME, "token").await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(user.id, "user-1");
    assert_eq!(transport.count(), 3);
    assert!(elapsed >= Duration::from_secs(2));
    assert!(elapsed < Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_on_last_attempt_fails() {
    let transport = FakeTransport::scripted(vec![
        Ok(rate_limited("1")),
        Ok(rate_limited("1")),
        Ok(rate_limited("1")),
    ]);
    let client = client(transport.clone());

    let result = client.get::<CurrentUser>(ME, "token").await;

    assert!(matches!(result, Err(ApiError::RateLimited(_))));
    assert_eq!(transport.count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_excessive_retry_after_is_not_waited_on() {
    let transport = FakeTransport::scripted(vec![Ok(rate_limited("3600"))]);
    let client = client(transport.clone());

    let start = Instant::now();
    let result = client.get::<CurrentUser>(ME, "token").await;

    assert!(matches!(
        result,
        Err(ApiError::RateLimited(wait)) if wait == Duration::from_secs(3600)
    ));
    assert_eq!(transport.count(), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_oversized_retry_after_is_not_waited_on() {
    let transport = FakeTransport::scripted(vec![Ok(rate_limited("99999999999999999999999"))]);
    let client = client(transport.clone());

    let result = client.get::<CurrentUser>(ME, "token").await;

    assert!(matches!(result, Err(ApiError::RateLimited(_))));
    assert_eq!(transport.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unauthorized_is_never_retried() {
    let transport = FakeTransport::scripted(vec![Ok(json(401, "{}")), Ok(json(200, PROFILE))]);
    let client = client(transport.clone());

    let result = client.get::<CurrentUser>(ME, "token").await;

    assert!(matches!(result, Err(ApiError::AuthExpired)));
    assert_eq!(transport.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_server_errors_exhaust_attempts() {
    let transport = FakeTransport::scripted(vec![
        Ok(json(500, "{}")),
        Ok(json(500, "{}")),
        Ok(json(500, "{}")),
        Ok(json(200, PROFILE)),
    ]);
    let client = client(transport.clone());

    let start = Instant::now();
    let result = client.get::<CurrentUser>(ME, "token").await;

    assert!(matches!(result, Err(ApiError::Status(500))));
    assert_eq!(transport.count(), 3);
    assert!(start.elapsed() >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_is_retried() {
    let transport = FakeTransport::scripted(vec![
        Err(TransportError::Timeout),
        Ok(json(200, PROFILE)),
    ]);
    let client = client(transport.clone());

    let user: CurrentUser = client.get(ME, "token").await.unwrap();

    assert_eq!(user.id, "user-1");
    assert_eq!(transport.count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_body_is_a_decode_error() {
    let transport = FakeTransport::scripted(vec![Ok(json(200, "<html>"))]);
    let client = client(transport.clone());

    let options = RequestOptions {
        retries: Some(1),
        ..RequestOptions::default()
    };
    let result = client.request::<CurrentUser>(ME, "token", options).await;

    assert!(matches!(result, Err(ApiError::Decode(_))));
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_sends_bearer_token() {
    let transport = FakeTransport::scripted(vec![Ok(json(200, PROFILE))]);
    let client = client(transport.clone());

    let _: CurrentUser = client.get(ME, "secret").await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.url, ME);
    assert!(
        request
            .headers
            .iter()
            .any(|(name, value)| name == "Authorization" && value == "Bearer secret")
    );
}
