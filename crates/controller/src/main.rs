use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{MatchState, Player},
    protocol::Dictionary,
};
use tokio::{
    net::TcpListener,
    sync::{broadcast, Mutex},
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod authority;
mod config;

use authority::MatchAuthority;
use config::load_settings;

const UPDATE_BUFFER: usize = 64;

#[derive(Clone)]
struct AppState {
    authority: Arc<Mutex<MatchAuthority>>,
    updates: broadcast::Sender<Dictionary>,
}

impl AppState {
    fn new(authority: MatchAuthority) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);
        Self {
            authority: Arc::new(Mutex::new(authority)),
            updates,
        }
    }

    /// Sends changed fields to every connected display. Called with the
    /// authority locked so displays see updates in the order they were applied.
    fn publish(&self, changed: Dictionary) {
        if changed.is_empty() {
            return;
        }
        let receivers = self.updates.send(changed).unwrap_or(0);
        debug!(receivers, "published update");
    }

    async fn handle_action_frame(&self, raw: &str) {
        let action = match Dictionary::from_json(raw).and_then(|dict| dict.action_code()) {
            Ok(action) => action,
            Err(err) => {
                warn!(%err, "dropping action frame");
                return;
            }
        };

        let mut authority = self.authority.lock().await;
        let changed = authority.apply_action(action);
        info!(?action, fields = changed.len(), "action applied");
        self.publish(changed);
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StateResponse {
    state: MatchState,
    player1_name: String,
    player2_name: String,
}

impl StateResponse {
    fn from_authority(authority: &MatchAuthority) -> Self {
        let [player1_name, player2_name] = authority.names().clone();
        Self {
            state: *authority.state(),
            player1_name,
            player2_name,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RenameRequest {
    #[serde(default)]
    player1_name: Option<String>,
    #[serde(default)]
    player2_name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let addr = settings.socket_addr()?;
    let state = AppState::new(MatchAuthority::new(settings.player_names()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind controller on {addr}"))?;
    info!(%addr, "controller listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/state", get(get_state))
        .route("/players", post(rename_players))
        .route("/reset", post(reset_match))
        .with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| display_session(socket, state))
}

async fn display_session(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut updates = state.updates.subscribe();
    let snapshot = state.authority.lock().await.snapshot();
    info!("display connected");

    let send_state = state.clone();
    let send_task = tokio::spawn(async move {
        if send_dict(&mut sender, &snapshot).await.is_err() {
            return;
        }
        loop {
            let changed = match updates.recv().await {
                Ok(changed) => changed,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "display lagged; resending snapshot");
                    send_state.authority.lock().await.snapshot()
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            if send_dict(&mut sender, &changed).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(raw)) => state.handle_action_frame(&raw).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "display socket failed");
                break;
            }
        }
    }

    send_task.abort();
    info!("display disconnected");
}

async fn send_dict(
    sender: &mut SplitSink<WebSocket, Message>,
    dict: &Dictionary,
) -> anyhow::Result<()> {
    let frame = dict.to_json()?;
    sender
        .send(Message::Text(frame))
        .await
        .context("failed to write display frame")
}

async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let authority = state.authority.lock().await;
    Json(StateResponse::from_authority(&authority))
}

async fn rename_players(
    State(state): State<AppState>,
    Json(request): Json<RenameRequest>,
) -> Json<StateResponse> {
    let mut authority = state.authority.lock().await;
    let renames = [
        (Player::One, request.player1_name),
        (Player::Two, request.player2_name),
    ];
    let mut changed = Dictionary::new();
    for (player, name) in renames {
        if let Some(name) = name {
            for (tag, value) in authority.rename(player, name).iter() {
                changed.insert_raw(tag, value.clone());
            }
        }
    }
    state.publish(changed);
    Json(StateResponse::from_authority(&authority))
}

async fn reset_match(State(state): State<AppState>) -> Json<StateResponse> {
    let mut authority = state.authority.lock().await;
    let changed = authority.reset();
    info!("match reset");
    state.publish(changed);
    Json(StateResponse::from_authority(&authority))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
