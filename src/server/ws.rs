use crate::server::routes::serve_analysis;
use crate::state::AppState;
use crate::types::AnalysisRequest;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use portable_atomic::Ordering;
use std::sync::Arc;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Request/reply loop: every text frame is an analyze request, every reply
/// is the analysis or `{"error": ...}`. Frames are answered in order.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    while let Some(msg) = receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            _ => continue, // pings are answered by axum; binary frames are ignored
        };

        let reply = reply_for(&state, text.as_str());
        if sender.send(Message::Text(reply.into())).await.is_err() {
            break;
        }
        state.counters.ws_messages_sent.fetch_add(1, Ordering::Relaxed);
    }
}

fn reply_for(state: &AppState, frame: &str) -> String {
    let outcome = serde_json::from_str::<AnalysisRequest>(frame)
        .map_err(crate::errors::EngineError::from)
        .and_then(|request| serve_analysis(state, &request));

    let value = match outcome {
        Ok(result) => serde_json::to_value(&result),
        Err(e) => Ok(serde_json::json!({ "error": e.to_string() })),
    };

    match value {
        Ok(v) => v.to_string(),
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}
