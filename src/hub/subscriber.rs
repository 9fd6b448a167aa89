use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use tokio::sync::mpsc;

use crate::domain::Update;
use crate::error::DeliveryError;

/// A live recipient of broadcast updates.
///
/// An error from `deliver` means the subscriber is gone; the hub drops it and
/// never retries.
#[async_trait]
pub trait Subscriber: Send + 'static {
    async fn deliver(&mut self, update: &Update) -> Result<(), DeliveryError>;

    /// Short label for logs
    fn describe(&self) -> String {
        "subscriber".to_string()
    }
}

/// Forwards updates into an in-process channel
pub struct ChannelSubscriber {
    tx: mpsc::Sender<Update>,
}

impl ChannelSubscriber {
    pub fn new(tx: mpsc::Sender<Update>) -> Self {
        Self { tx }
    }

    /// Subscriber plus the receiving end, `capacity` updates deep
    pub fn pair(capacity: usize) -> (Self, mpsc::Receiver<Update>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl Subscriber for ChannelSubscriber {
    async fn deliver(&mut self, update: &Update) -> Result<(), DeliveryError> {
        self.tx
            .send(update.clone())
            .await
            .map_err(|_| DeliveryError::Closed)
    }

    fn describe(&self) -> String {
        "channel".to_string()
    }
}

/// Writes updates as JSON text frames to the sending half of a WebSocket
pub struct WebSocketSubscriber {
    sink: SplitSink<WebSocket, Message>,
    peer: String,
}

impl WebSocketSubscriber {
    pub fn new(sink: SplitSink<WebSocket, Message>, peer: impl Into<String>) -> Self {
        Self {
            sink,
            peer: peer.into(),
        }
    }
}

#[async_trait]
impl Subscriber for WebSocketSubscriber {
    async fn deliver(&mut self, update: &Update) -> Result<(), DeliveryError> {
        let json = serde_json::to_string(update)
            .map_err(|e| DeliveryError::Transport(format!("serialize: {}", e)))?;
        self.sink
            .send(Message::Text(json))
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))
    }

    fn describe(&self) -> String {
        format!("websocket {}", self.peer)
    }
}
