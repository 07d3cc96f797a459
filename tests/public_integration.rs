use rust_decimal::Decimal;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zaif_api_client::rest::{FuturesPublicApi, PublicApi, TradeType, endpoints};
use zaif_api_client::{ParamValue, Params, ZaifError};

fn build_public_client(server: &MockServer) -> PublicApi {
    PublicApi::builder().base_url(server.uri()).build().unwrap()
}

fn build_futures_client(server: &MockServer) -> FuturesPublicApi {
    FuturesPublicApi::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_ticker_uses_path_arguments() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "last": 4500000.0,
        "high": 4600000.0,
        "low": 4400000.0,
        "vwap": 4512345.6789,
        "volume": 1234.5,
        "bid": 4499995.0,
        "ask": 4500005.0
    });

    Mock::given(method("GET"))
        .and(path("/api/1/ticker/btc_jpy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let ticker = build_public_client(&server).ticker("btc_jpy").await.unwrap();
    assert_eq!(ticker.last, Decimal::new(4_500_000, 0));
    assert_eq!(ticker.ask, Decimal::new(4_500_005, 0));
}

#[tokio::test]
async fn test_last_price_and_trades() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/last_price/xem_jpy"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"last_price": 12.34})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/1/trades/xem_jpy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"date": 1700000000, "price": 12.34, "amount": 100, "tid": 42,
             "currency_pair": "xem_jpy", "trade_type": "bid"}
        ])))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let price = client.last_price("xem_jpy").await.unwrap();
    assert_eq!(price.last_price, Decimal::new(1234, 2));

    let trades = client.trades("xem_jpy").await.unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].tid, 42);
    assert_eq!(trades[0].trade_type, TradeType::Bid);
}

#[tokio::test]
async fn test_currencies_all() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/currencies/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"name": "btc", "is_token": false}])),
        )
        .mount(&server)
        .await;

    let currencies = build_public_client(&server).currencies("all").await.unwrap();
    assert_eq!(currencies[0]["name"], "btc");
}

#[tokio::test]
async fn test_query_parameters_are_appended() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/trades/btc_jpy"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let query = Params::new().with("count", 5);
    let trades: serde_json::Value = client
        .request(
            &endpoints::Endpoint::new("trades", &["currency_pair", "count"]),
            &[("currency_pair", ParamValue::from("btc_jpy"))],
            &query,
        )
        .await
        .unwrap();
    assert_eq!(trades, serde_json::json!([]));
}

#[tokio::test]
async fn test_path_arguments_are_escaped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/ticker/btc_jpy%3Fx=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "last": 1, "high": 1, "low": 1, "vwap": 1, "volume": 1, "bid": 1, "ask": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    build_public_client(&server)
        .ticker("btc_jpy?x=1")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_non_200_status_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/depth/btc_jpy"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = build_public_client(&server)
        .depth("btc_jpy")
        .await
        .unwrap_err();
    match err {
        ZaifError::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_params_never_reach_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client
        .request::<serde_json::Value>(
            &endpoints::public::TICKER,
            &[("currency_pair", ParamValue::from(1))],
            &Params::new().with("limit", 10),
        )
        .await
        .unwrap_err();

    let errors = err.validation_errors().unwrap();
    assert_eq!(
        errors.get("currency_pair").unwrap(),
        ["must be of string type"]
    );
    assert_eq!(errors.get("limit").unwrap(), ["unknown field"]);
}

#[tokio::test]
async fn test_futures_null_pair_is_omitted_from_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fapi/1/last_price/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"last_price": 1.0})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fapi/1/ticker/all/btc_jpy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"last": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_futures_client(&server);
    let price = client.last_price(1, None).await.unwrap();
    assert_eq!(price["last_price"], 1.0);

    let ticker = client.ticker("all", "btc_jpy").await.unwrap();
    assert_eq!(ticker["last"], 1);
}

#[tokio::test]
async fn test_spot_pair_rejects_null() {
    let server = MockServer::start().await;
    let client = build_public_client(&server);

    let err = client
        .request::<serde_json::Value>(
            &endpoints::public::TICKER,
            &[("currency_pair", ParamValue::Null)],
            &Params::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().get("currency_pair").unwrap(),
        ["null value not allowed"]
    );
}
