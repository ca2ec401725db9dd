//! Integration tests for the spot price client

use crate::server::{Reply, TestServer};
use btc_ticker::price::{FetchError, PriceSource, SpotPriceClient, SpotPriceConfig};
use rust_decimal_macros::dec;
use std::time::Duration;

const SPOT_BODY: &str = r#"{"data":{"base":"BTC","currency":"USD","amount":"65000.50"}}"#;

fn client(url: &str, timeout: Duration) -> SpotPriceClient {
    SpotPriceClient::with_config(SpotPriceConfig {
        url: url.to_string(),
        timeout,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_spot_price() {
    let server = TestServer::start(vec![Reply::ok(SPOT_BODY)]).await;
    let client = client(&server.url, Duration::from_secs(15));

    let price = tokio_test::assert_ok!(client.fetch_price().await);
    assert_eq!(price.amount(), dec!(65000.50));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_request_headers() {
    let server = TestServer::start(vec![Reply::ok(SPOT_BODY)]).await;
    let client = client(&server.url, Duration::from_secs(15));
    client.fetch_price().await.unwrap();

    let head = server.requests()[0].to_lowercase();
    assert!(head.starts_with("get /v2/prices/btc-usd/spot "));
    assert!(head.contains("accept: application/json"));
    assert!(head.contains("user-agent: btc-ticker/"));
}

#[tokio::test]
async fn test_non_success_status() {
    let server = TestServer::start(vec![Reply::status(503, "{}")]).await;
    let client = client(&server.url, Duration::from_secs(15));

    let err = tokio_test::assert_err!(client.fetch_price().await);
    assert!(matches!(err, FetchError::Http(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_missing_amount() {
    let server = TestServer::start(vec![Reply::ok(r#"{"data":{"base":"BTC"}}"#)]).await;
    let client = client(&server.url, Duration::from_secs(15));

    let err = client.fetch_price().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = TestServer::start(vec![Reply::ok("not json")]).await;
    let client = client(&server.url, Duration::from_secs(15));

    let err = client.fetch_price().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_timeout() {
    let server =
        TestServer::start(vec![Reply::ok(SPOT_BODY).delayed(Duration::from_secs(5))]).await;
    let client = client(&server.url, Duration::from_millis(200));

    let err = client.fetch_price().await.unwrap_err();
    assert_eq!(err, FetchError::Timeout(Duration::from_millis(200)));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{}/spot", addr), Duration::from_secs(2));
    let err = client.fetch_price().await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}

#[tokio::test]
async fn test_no_internal_retry() {
    let server = TestServer::start(vec![Reply::status(500, ""), Reply::ok(SPOT_BODY)]).await;
    let client = client(&server.url, Duration::from_secs(15));

    assert!(client.fetch_price().await.is_err());
    assert_eq!(server.hits(), 1);
}
