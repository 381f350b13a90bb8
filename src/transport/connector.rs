//! # Channel Connector
//!
//! Opens one WebSocket connection per feed and pumps its frames into a
//! dispatcher from a background reader task.
//!
//! A channel is strictly receive-only: the only frames ever sent are
//! pong replies and the close handshake. Frame errors are fatal to the
//! channel that saw them; the reader logs the error and exits, leaving
//! recovery to whoever owns the client.

use futures_util::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use std::fmt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as WsMessage};
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::relay::{ChangeDispatcher, FeedKind};

use super::errors::{TransportError, TransportResult};
use super::wire::ChangeFrame;

type WsStream = tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<TcpStream>>;

/// Build the channel address for a feed from the configured base
/// address. `http`/`https` map to `ws`/`wss`; `ws` and `wss` pass
/// through unchanged.
pub fn channel_url(api_base: &str, kind: FeedKind) -> TransportResult<String> {
    let base = api_base.trim().trim_end_matches('/');

    let (scheme, rest) = if let Some(rest) = base.strip_prefix("http://") {
        ("ws", rest)
    } else if let Some(rest) = base.strip_prefix("https://") {
        ("wss", rest)
    } else if let Some(rest) = base.strip_prefix("ws://") {
        ("ws", rest)
    } else if let Some(rest) = base.strip_prefix("wss://") {
        ("wss", rest)
    } else {
        return Err(TransportError::InvalidBaseUrl(api_base.to_string()));
    };

    if rest.is_empty() {
        return Err(TransportError::InvalidBaseUrl(api_base.to_string()));
    }

    Ok(format!("{}://{}{}", scheme, rest, kind.path_suffix()))
}

/// Open the channel for `dispatcher`'s feed and spawn its reader task.
///
/// Returns once the WebSocket handshake completed (or failed). From
/// then on every received frame is decoded and dispatched on the
/// background task until the channel closes from either side.
pub async fn open_channel<P>(
    config: &FeedConfig,
    dispatcher: ChangeDispatcher<P>,
) -> TransportResult<ChannelHandle>
where
    P: DeserializeOwned + fmt::Debug + Send + 'static,
{
    let kind = dispatcher.kind();
    let url = channel_url(&config.api_base, kind)?;
    let connection_id = Uuid::new_v4().to_string();

    let connected = tokio::time::timeout(config.connect_timeout(), connect_async(&url)).await;
    let ws_stream = match connected {
        Ok(Ok((stream, _response))) => stream,
        Ok(Err(e)) => {
            return Err(TransportError::Handshake {
                url,
                reason: e.to_string(),
            })
        }
        Err(_) => return Err(TransportError::ConnectTimeout(config.connect_timeout_secs)),
    };

    log::info!(
        "[CHANNEL] connected kind={} url={} connection_id={}",
        kind,
        url,
        connection_id
    );

    let (close_tx, close_rx) = oneshot::channel();
    let reader_handle = tokio::spawn(reader_loop(
        ws_stream,
        dispatcher,
        close_rx,
        connection_id.clone(),
    ));

    Ok(ChannelHandle {
        kind,
        connection_id,
        close_tx: Some(close_tx),
        _reader_handle: reader_handle,
    })
}

/// Background task that owns the WebSocket stream for one feed.
///
/// Exits on: close signal, close frame, end of stream, transport
/// error, or the first malformed frame.
async fn reader_loop<P>(
    mut ws_stream: WsStream,
    dispatcher: ChangeDispatcher<P>,
    mut close_rx: oneshot::Receiver<()>,
    connection_id: String,
) where
    P: DeserializeOwned + fmt::Debug + Send + 'static,
{
    let kind = dispatcher.kind();

    loop {
        tokio::select! {
            biased;

            // Graceful shutdown requested by close() / Drop.
            _ = &mut close_rx => {
                let _ = ws_stream.close(None).await;
                log::info!(
                    "[CHANNEL] closed by client kind={} connection_id={}",
                    kind, connection_id
                );
                return;
            }

            frame = ws_stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        if let Err(e) = decode_and_dispatch(&dispatcher, &text) {
                            log::error!(
                                "[CHANNEL] {} connection_id={}, channel terminated",
                                e, connection_id
                            );
                            return;
                        }
                    }
                    Some(Ok(WsMessage::Binary(_))) => {
                        log::error!(
                            "[CHANNEL] {} connection_id={}, channel terminated",
                            TransportError::BinaryFrame(kind), connection_id
                        );
                        return;
                    }
                    Some(Ok(WsMessage::Ping(payload))) => {
                        let _ = ws_stream.send(WsMessage::Pong(payload)).await;
                    }
                    Some(Ok(WsMessage::Pong(_))) | Some(Ok(WsMessage::Frame(_))) => {}
                    Some(Ok(WsMessage::Close(_))) => {
                        log::info!(
                            "[CHANNEL] closed by server kind={} connection_id={}",
                            kind, connection_id
                        );
                        return;
                    }
                    Some(Err(e)) => {
                        log::error!(
                            "[CHANNEL] websocket error kind={} connection_id={}: {}",
                            kind, connection_id, e
                        );
                        return;
                    }
                    None => {
                        log::info!(
                            "[CHANNEL] stream ended kind={} connection_id={}",
                            kind, connection_id
                        );
                        return;
                    }
                }
            }
        }
    }
}

/// Decode one text frame into the feed's payload type and dispatch it.
fn decode_and_dispatch<P>(dispatcher: &ChangeDispatcher<P>, text: &str) -> TransportResult<()>
where
    P: DeserializeOwned + fmt::Debug,
{
    let kind = dispatcher.kind();

    let frame = ChangeFrame::parse(text).map_err(|e| TransportError::MalformedFrame {
        kind,
        reason: format!("invalid frame: {}", e),
    })?;

    let payload: P =
        serde_json::from_value(frame.data).map_err(|e| TransportError::MalformedFrame {
            kind,
            reason: format!("invalid payload: {}", e),
        })?;

    dispatcher.dispatch(frame.event, &payload);
    Ok(())
}

/// Owner-side handle to one open channel.
///
/// Dropping the handle signals the reader task to close the connection,
/// so the handle must be kept alive for as long as the feed should stay
/// subscribed.
#[derive(Debug)]
pub struct ChannelHandle {
    kind: FeedKind,
    connection_id: String,
    /// Signals the reader task to initiate graceful shutdown.
    /// `None` once `close()` has been called (or `Drop` has run).
    close_tx: Option<oneshot::Sender<()>>,
    /// Reader task handle, kept so shutdown can be awaited later if the
    /// handle ever grows a joining close.
    _reader_handle: JoinHandle<()>,
}

impl ChannelHandle {
    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    /// Identifier correlating this connection's log lines.
    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Ask the reader task to close the connection. Safe to call more
    /// than once; later calls are no-ops.
    pub fn close(&mut self) {
        if let Some(tx) = self.close_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_closed(&self) -> bool {
        self.close_tx.is_none()
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        // Best-effort close signal. If close() already ran this is a
        // no-op; if the reader already exited the send fails harmlessly.
        if let Some(tx) = self.close_tx.take() {
            let _ = tx.send(());
        }
    }
}
