use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::stream::StreamExt;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::hub::WebSocketSubscriber;

/// GET /ws/live-feed
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (sender, mut receiver) = socket.split();

    // The hub owns the sink from here on; its delivery task does the writing
    let handle = state
        .hub
        .register(WebSocketSubscriber::new(sender, "ws/live-feed"));

    // Inbound traffic is only watched for disconnects
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Close(_) => break,
            other => debug!("Ignoring inbound frame on {}: {:?}", handle, other),
        }
    }

    // Already gone if a failed send dropped it first
    state.hub.unregister(handle);
    info!("WebSocket connection {} closed", handle);
}
