//! End-to-end tests: HTTP endpoint -> poller -> status display

use crate::server::{Reply, TestServer};
use btc_ticker::config::DisplayConfig;
use btc_ticker::display::{RecordingDisplay, StatusState};
use btc_ticker::poller::PricePoller;
use btc_ticker::price::{FetchError, SpotPriceClient, SpotPriceConfig, PLACEHOLDER_TEXT};
use std::sync::Arc;
use std::time::Duration;

const SPOT_BODY: &str = r#"{"data":{"base":"BTC","currency":"USD","amount":"65000.50"}}"#;

fn poller(url: &str) -> (PricePoller, Arc<RecordingDisplay>) {
    let source = SpotPriceClient::with_config(SpotPriceConfig {
        url: url.to_string(),
        ..Default::default()
    })
    .unwrap();
    let display = Arc::new(RecordingDisplay::new());
    let poller = PricePoller::new(Arc::new(source), display.clone(), DisplayConfig::default());
    (poller, display)
}

#[tokio::test]
async fn test_spot_price_rendered() {
    let server = TestServer::start(vec![Reply::ok(SPOT_BODY)]).await;
    let (poller, display) = poller(&server.url);

    poller.refresh_once().await.unwrap();

    let item = display.last().unwrap();
    assert_eq!(item.text, "BTC $ 65,000.50");
    assert_eq!(item.state, StatusState::Ok);
}

#[tokio::test]
async fn test_http_error_shows_placeholder() {
    let server = TestServer::start(vec![Reply::status(404, "{}")]).await;
    let (poller, display) = poller(&server.url);

    let err = poller.refresh_once().await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));

    let item = display.last().unwrap();
    assert_eq!(item.text, PLACEHOLDER_TEXT);
    assert!(item.tooltip.starts_with("Failed to fetch BTC price: "));
}

#[tokio::test]
async fn test_concurrent_triggers_issue_one_request() {
    let server =
        TestServer::start(vec![Reply::ok(SPOT_BODY).delayed(Duration::from_millis(300))]).await;
    let (poller, display) = poller(&server.url);

    let timer_tick = poller.refresh_once();
    let click = poller.refresh_once();
    let (a, b) = tokio::join!(timer_tick, click);

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(server.hits(), 1);
    assert_eq!(display.items().len(), 1);
}

#[tokio::test]
async fn test_recovers_after_failure() {
    let server = TestServer::start(vec![Reply::status(503, ""), Reply::ok(SPOT_BODY)]).await;
    let (poller, display) = poller(&server.url);

    assert!(poller.refresh_once().await.is_err());
    assert!(poller.refresh_once().await.is_ok());

    let texts: Vec<_> = display.items().into_iter().map(|i| i.text).collect();
    assert_eq!(texts, vec![PLACEHOLDER_TEXT, "BTC $ 65,000.50"]);
    assert_eq!(server.hits(), 2);
}
