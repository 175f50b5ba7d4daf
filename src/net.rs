// ==============================================================================
// net.rs — VIEWER WEBSOCKET (KEYS IN, SNAPSHOTS OUT)
// ==============================================================================
// Each connection is one viewer with its own key map:
//   -> {"type":"key","key":"ArrowUp","pressed":true}
//   -> {"type":"release_all"}
//   -> {"type":"ping"}
//   <- {"type":"welcome", ...} once, then {"type":"snapshot", ...} every frame
// The frame loop in main.rs is the only caller of SimState::step.
// ==============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::accept_async;
use tungstenite::Message;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::state::{ServerMessage, SimState};

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Key { key: String, pressed: bool },
    ReleaseAll,
    Ping,
}

impl ClientMessage {
    pub fn from_json(txt: &str) -> Option<Self> {
        match serde_json::from_str(txt) {
            Ok(msg) => Some(msg),
            Err(e) => {
                debug!(%e, "ignoring malformed viewer message");
                None
            }
        }
    }
}

pub async fn bind(addr: &str) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind websocket port {addr}"))?;
    info!("🌐 WebSocket listening on ws://{addr}");
    Ok(listener)
}

pub async fn serve_viewers(listener: TcpListener, state: Arc<Mutex<SimState>>) {
    loop {
        let (raw, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(%e, "accept failed");
                continue;
            }
        };

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_viewer(raw, state).await {
                warn!(%peer, "viewer connection ended: {e:#}");
            }
        });
    }
}

async fn handle_viewer(raw: TcpStream, state: Arc<Mutex<SimState>>) -> Result<()> {
    let ws = accept_async(raw).await.context("websocket handshake failed")?;
    let (mut write, mut read) = ws.split();

    // -------------------------------
    // 1) Outgoing channel + send loop
    // -------------------------------
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if write.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // -------------------------------
    // 2) Register (sends welcome)
    // -------------------------------
    let viewer_id = Uuid::new_v4().to_string();
    state.lock().await.register_viewer(&viewer_id, tx.clone());
    info!("🟢 Viewer connected: {viewer_id}");

    // -------------------------------
    // 3) Receive loop
    // -------------------------------
    let result = async {
        while let Some(msg) = read.next().await {
            let msg = msg.context("websocket read failed")?;
            let text = match msg {
                Message::Text(t) => t,
                Message::Close(_) => break,
                _ => continue,
            };

            match ClientMessage::from_json(&text) {
                Some(ClientMessage::Key { key, pressed }) => {
                    state.lock().await.set_key(&viewer_id, &key, pressed);
                }
                Some(ClientMessage::ReleaseAll) => {
                    state.lock().await.release_all(&viewer_id);
                }
                Some(ClientMessage::Ping) => {
                    let _ = tx.send(ServerMessage::Pong.to_json());
                }
                None => {}
            }
        }
        anyhow::Ok(())
    }
    .await;

    info!("🔴 Viewer disconnected: {viewer_id}");
    state.lock().await.remove_viewer(&viewer_id);
    result
}
