//! Pair stream and its stop signal.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::ZaifError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Create a linked stop handle and signal.
///
/// The handle stays with the caller; the signal is passed to
/// [`StreamApi::execute`](crate::stream::StreamApi::execute).
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (sender, receiver) = watch::channel(false);
    (
        StopHandle {
            sender: Arc::new(sender),
        },
        StopSignal { receiver },
    )
}

/// Caller side of a stop channel. Cloneable; any clone can stop the stream.
#[derive(Debug, Clone)]
pub struct StopHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Ask the stream to finish.
    ///
    /// Checked between receives: a receive already in progress completes
    /// and its message is still delivered.
    pub fn stop(&self) {
        self.sender.send_replace(true);
    }

    /// Whether stop has been requested.
    pub fn is_stopped(&self) -> bool {
        *self.sender.borrow()
    }
}

/// Stream side of a stop channel.
#[derive(Debug, Clone)]
pub struct StopSignal {
    receiver: watch::Receiver<bool>,
}

impl StopSignal {
    /// Whether stop has been requested.
    pub fn is_stopped(&self) -> bool {
        *self.receiver.borrow()
    }
}

enum State {
    Open { ws: Box<WsStream>, stop: StopSignal },
    Done,
}

/// Decoded JSON messages from one pair subscription.
///
/// Ends when stop is signalled, when the server closes the connection, or
/// after yielding the first error (transport failure or a frame that is not
/// valid JSON). The connection is closed exactly once.
pub struct PairStream {
    inner: Pin<Box<dyn Stream<Item = Result<Value, ZaifError>> + Send>>,
    url: String,
}

impl PairStream {
    pub(crate) fn new(ws: WsStream, stop: StopSignal, url: String) -> Self {
        let state = State::Open {
            ws: Box::new(ws),
            stop,
        };
        let inner = futures_util::stream::unfold(state, next_message).fuse();
        Self {
            inner: Box::pin(inner),
            url,
        }
    }

    /// The URL this stream is connected to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for PairStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairStream").field("url", &self.url).finish()
    }
}

impl Stream for PairStream {
    type Item = Result<Value, ZaifError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

async fn next_message(state: State) -> Option<(Result<Value, ZaifError>, State)> {
    let State::Open { mut ws, stop } = state else {
        return None;
    };

    loop {
        if stop.is_stopped() {
            tracing::debug!("Stop requested, closing stream");
            close(&mut ws).await;
            return None;
        }

        let frame = match ws.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Stream receive failed");
                return Some((Err(e.into()), State::Done));
            }
            None => return None,
        };

        let text = match frame {
            WsMessage::Text(text) => text.as_str().to_owned(),
            WsMessage::Binary(data) => match String::from_utf8(data.to_vec()) {
                Ok(text) => text,
                Err(e) => {
                    close(&mut ws).await;
                    return Some((
                        Err(ZaifError::InvalidResponse(format!("non UTF-8 frame: {e}"))),
                        State::Done,
                    ));
                }
            },
            WsMessage::Close(frame) => {
                tracing::debug!(?frame, "Server closed stream");
                return None;
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => continue,
        };

        return match serde_json::from_str::<Value>(&text) {
            Ok(value) => Some((Ok(value), State::Open { ws, stop })),
            Err(e) => {
                close(&mut ws).await;
                Some((Err(e.into()), State::Done))
            }
        };
    }
}

async fn close(ws: &mut WsStream) {
    if let Err(e) = ws.close(None).await {
        tracing::debug!(error = %e, "Error closing stream");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_channel_links_handle_and_signal() {
        let (handle, signal) = stop_channel();
        let other = handle.clone();
        assert!(!signal.is_stopped());

        other.stop();
        assert!(signal.is_stopped());
        assert!(handle.is_stopped());
    }

    #[test]
    fn test_stop_survives_dropped_signal() {
        let (handle, signal) = stop_channel();
        drop(signal);
        handle.stop();
        assert!(handle.is_stopped());
    }
}
