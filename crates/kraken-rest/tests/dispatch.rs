//! Request dispatch tests against a local fake Kraken server

mod common;

use common::*;
use kraken_rest::{
    ClientConfig, KrakenRestClient, OrderRequest, OrderSide, RestError, ServerTime,
};
use rust_decimal_macros::dec;

fn field<'a>(form: &'a [(String, String)], name: &str) -> Option<&'a str> {
    form.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

// ============================================================================
// Public requests
// ============================================================================

#[tokio::test]
async fn test_public_get_with_query() {
    let server = FakeKraken::start(vec![(200, DEPTH_RESPONSE)]).await;
    let client = server.public_client();

    let books = client.get_orderbook("XBTEUR", Some(2)).await.unwrap();
    assert_eq!(books.require("XXBTZEUR").unwrap().asks.len(), 2);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path(), "/0/public/Depth");
    assert_eq!(requests[0].query(), Some("pair=XBTEUR&count=2"));
    assert!(requests[0].header("API-Key").is_none());
}

#[tokio::test]
async fn test_public_get_without_params() {
    let server = FakeKraken::start(vec![(200, TIME_RESPONSE)]).await;
    let client = server.public_client();

    let time = client.get_server_time().await.unwrap();
    assert_eq!(time.unixtime, 1688669448);

    let requests = server.requests();
    assert_eq!(requests[0].target, "/0/public/Time");
}

#[tokio::test]
async fn test_query_public_by_name() {
    let server = FakeKraken::start(vec![(200, TIME_RESPONSE)]).await;
    let client = server.public_client();

    let time: ServerTime = client.query_public("Time", &[]).await.unwrap();
    assert_eq!(time.unixtime, 1688669448);
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = FakeKraken::start(vec![(200, TIME_RESPONSE)]).await;
    let config = ClientConfig::new()
        .with_base_url(&server.base_url)
        .with_user_agent("depth-poller/1.0");
    let client = KrakenRestClient::with_config(config).unwrap();

    client.get_server_time().await.unwrap();
    assert_eq!(server.requests()[0].header("user-agent"), Some("depth-poller/1.0"));
}

// ============================================================================
// Private requests
// ============================================================================

#[tokio::test]
async fn test_private_post_is_signed() {
    let server = FakeKraken::start(vec![(200, BALANCE_RESPONSE)]).await;
    let (client, credentials) = server.private_client();

    let balances = client.get_balance().await.unwrap();
    assert_eq!(balances.get("XETH"), Some(dec!(5.25)));

    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/0/private/Balance");
    assert_eq!(request.header("API-Key"), Some(TEST_API_KEY));
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert!(request.body.starts_with("nonce="));

    let form = request.form();
    let nonce = field(&form, "nonce").unwrap();
    let expected = credentials
        .sign("/0/private/Balance", nonce, &request.body)
        .unwrap();
    assert_eq!(request.header("API-Sign"), Some(expected.as_str()));
}

#[tokio::test]
async fn test_nonce_increases_across_requests() {
    let server = FakeKraken::start(vec![(200, BALANCE_RESPONSE), (200, BALANCE_RESPONSE)]).await;
    let (client, _) = server.private_client();

    // Clones share the nonce counter
    let other = client.clone();
    client.get_balance().await.unwrap();
    other.get_balance().await.unwrap();

    let nonces: Vec<u64> = server
        .requests()
        .iter()
        .map(|r| field(&r.form(), "nonce").unwrap().parse().unwrap())
        .collect();
    assert_eq!(nonces.len(), 2);
    assert!(nonces[1] > nonces[0]);
}

#[tokio::test]
async fn test_add_order_form_fields() {
    let server = FakeKraken::start(vec![(200, ADD_ORDER_VALIDATE_RESPONSE)]).await;
    let (client, _) = server.private_client();

    let order = OrderRequest::limit("XBTUSD", OrderSide::Buy, dec!(1.25), dec!(27500.0))
        .validate_only();
    let response = client.add_order(&order).await.unwrap();
    assert!(response.txid.is_empty());
    assert_eq!(
        response.descr.order,
        "buy 1.25000000 XBTUSD @ limit 27500.0"
    );

    let request = &server.requests()[0];
    assert_eq!(request.path(), "/0/private/AddOrder");

    let form = request.form();
    assert_eq!(form[0].0, "nonce");
    assert_eq!(field(&form, "pair"), Some("XBTUSD"));
    assert_eq!(field(&form, "type"), Some("buy"));
    assert_eq!(field(&form, "ordertype"), Some("limit"));
    assert_eq!(field(&form, "volume"), Some("1.25"));
    assert_eq!(field(&form, "price"), Some("27500.0"));
    assert_eq!(field(&form, "validate"), Some("true"));
}

#[tokio::test]
async fn test_query_private_without_credentials() {
    let server = FakeKraken::start(vec![]).await;
    let client = server.public_client();

    let err = client
        .query_private::<serde_json::Value>("Balance", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::AuthRequired));
    assert!(matches!(
        client.get_balance().await,
        Err(RestError::AuthRequired)
    ));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_order_is_not_sent() {
    let server = FakeKraken::start(vec![(200, ADD_ORDER_VALIDATE_RESPONSE)]).await;
    let (client, _) = server.private_client();

    let order = OrderRequest::limit("XBTUSD", OrderSide::Sell, dec!(0), dec!(27500));
    let err = client.add_order(&order).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_depth_count_is_not_sent() {
    let server = FakeKraken::start(vec![(200, DEPTH_RESPONSE)]).await;
    let client = server.public_client();

    let err = client.get_orderbook("XBTEUR", Some(501)).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_trade_count_is_not_sent() {
    let server = FakeKraken::start(vec![]).await;
    let client = server.public_client();

    for count in [0, 1001] {
        let err = client
            .market()
            .get_recent_trades("XBTUSD", None, Some(count))
            .await
            .unwrap_err();
        assert!(matches!(err, RestError::InvalidParameter(_)), "{count}");
    }
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_empty_asset_filters_are_not_sent() {
    let server = FakeKraken::start(vec![]).await;
    let client = server.public_client();

    assert!(matches!(
        client.market().get_assets(Some(&[][..])).await,
        Err(RestError::InvalidParameter(_))
    ));
    assert!(matches!(
        client.market().get_asset_pairs(Some(&[][..])).await,
        Err(RestError::InvalidParameter(_))
    ));
    assert!(server.requests().is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_exchange_error() {
    let server = FakeKraken::start(vec![(200, INVALID_ARGUMENTS_RESPONSE)]).await;
    let client = server.public_client();

    let err = client.get_ticker("NOTAPAIR").await.unwrap_err();
    assert_eq!(
        err.api_errors(),
        Some(&["EGeneral:Invalid arguments".to_string()][..])
    );
    assert_eq!(err.to_string(), "API error: EGeneral:Invalid arguments");
}

#[tokio::test]
async fn test_envelope_read_on_error_status() {
    let server = FakeKraken::start(vec![(500, INVALID_NONCE_RESPONSE)]).await;
    let (client, _) = server.private_client();

    let err = client.get_balance().await.unwrap_err();
    match err {
        RestError::Api { error, .. } => assert!(error.is_auth_error()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_envelope_error_status() {
    let server = FakeKraken::start(vec![(502, "<html><body>Bad Gateway</body></html>")]).await;
    let client = server.public_client();

    let err = client.get_server_time().await.unwrap_err();
    assert!(err.is_retryable());
    match err {
        RestError::Status { status, body } => {
            assert_eq!(status, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = FakeKraken::start(vec![(200, "not json")]).await;
    let client = server.public_client();

    let err = client.get_server_time().await.unwrap_err();
    assert!(matches!(err, RestError::Decode(_)));
}
