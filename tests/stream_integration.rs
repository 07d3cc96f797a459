use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use zaif_api_client::ZaifError;
use zaif_api_client::stream::{StreamApi, stop_channel};

/// Serve one connection: send `frames`, then count close frames until the
/// client goes away.
async fn serve(frames: Vec<&'static str>) -> (String, JoinHandle<usize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(tcp).await.unwrap();
        for frame in frames {
            if ws.send(Message::text(frame)).await.is_err() {
                break;
            }
        }

        let mut closes = 0;
        while let Some(Ok(message)) = ws.next().await {
            if message.is_close() {
                closes += 1;
            }
        }
        closes
    });

    (format!("ws://{addr}"), server)
}

fn build_stream_client(base_url: &str) -> StreamApi {
    StreamApi::builder().base_url(base_url).build().unwrap()
}

#[tokio::test]
async fn test_stop_ends_stream_and_closes_once() {
    let (url, server) = serve(vec![
        r#"{"currency_pair":"btc_jpy","last_price":{"price":1}}"#,
        r#"{"currency_pair":"btc_jpy","last_price":{"price":2}}"#,
        r#"{"currency_pair":"btc_jpy","last_price":{"price":3}}"#,
    ])
    .await;

    let (handle, signal) = stop_channel();
    let mut stream = build_stream_client(&url)
        .execute("btc_jpy", signal)
        .await
        .unwrap();
    assert!(stream.url().ends_with("/stream?currency_pair=btc_jpy"));

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first["last_price"]["price"], 1);

    handle.stop();
    let mut after_stop = 0;
    while let Some(message) = stream.next().await {
        message.unwrap();
        after_stop += 1;
    }
    assert!(after_stop <= 1);
    assert!(stream.next().await.is_none());

    drop(stream);
    assert_eq!(server.await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_frame_terminates_with_error() {
    let (url, server) = serve(vec![r#"{"ok":true}"#, "not json", r#"{"ok":false}"#]).await;

    let (_handle, signal) = stop_channel();
    let mut stream = build_stream_client(&url)
        .execute("btc_jpy", signal)
        .await
        .unwrap();

    assert_eq!(stream.next().await.unwrap().unwrap()["ok"], true);
    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, ZaifError::Json(_)));
    assert!(stream.next().await.is_none());

    drop(stream);
    assert_eq!(server.await.unwrap(), 1);
}

#[tokio::test]
async fn test_server_close_ends_stream() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(tcp).await.unwrap();
        ws.send(Message::text(r#"{"n":1}"#)).await.unwrap();
        ws.close(None).await.unwrap();
    });

    let (_handle, signal) = stop_channel();
    let mut stream = build_stream_client(&format!("ws://{addr}"))
        .execute("xem_jpy", signal)
        .await
        .unwrap();

    assert_eq!(stream.next().await.unwrap().unwrap()["n"], 1);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_connect_failure_is_websocket_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (_handle, signal) = stop_channel();
    let err = build_stream_client(&format!("ws://{addr}"))
        .execute("btc_jpy", signal)
        .await
        .unwrap_err();
    assert!(matches!(err, ZaifError::WebSocketMsg(_)));
}
