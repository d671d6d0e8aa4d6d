use shared::{
    domain::Player,
    protocol::{ActionCode, Dictionary, MessageKey, TupleValue},
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::projection::DisplayProjection;

/// One decoded inbound state field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Score(Player, u32),
    Games(Player, u32),
    Sets(Player, u32),
    Server(Player),
    Name(Player, String),
}

/// Decodes the recognized fields of an inbound message in key order.
/// Unknown keys and unexpected payload types are skipped.
pub fn decode_fields(dict: &Dictionary) -> Vec<FieldUpdate> {
    dict.iter()
        .filter_map(|(tag, value)| {
            let Some(key) = MessageKey::from_tag(tag) else {
                debug!(tag, "ignoring unknown inbound key");
                return None;
            };
            let update = decode_field(key, value);
            if update.is_none() {
                debug!(?key, ?value, "ignoring inbound field");
            }
            update
        })
        .collect()
}

fn decode_field(key: MessageKey, value: &TupleValue) -> Option<FieldUpdate> {
    let uint = || value.as_uint();
    let text = || value.as_text().map(str::to_string);
    match key {
        MessageKey::Action => None,
        MessageKey::ScoreP1 => uint().map(|v| FieldUpdate::Score(Player::One, v)),
        MessageKey::ScoreP2 => uint().map(|v| FieldUpdate::Score(Player::Two, v)),
        MessageKey::GamesP1 => uint().map(|v| FieldUpdate::Games(Player::One, v)),
        MessageKey::GamesP2 => uint().map(|v| FieldUpdate::Games(Player::Two, v)),
        MessageKey::SetsP1 => uint().map(|v| FieldUpdate::Sets(Player::One, v)),
        MessageKey::SetsP2 => uint().map(|v| FieldUpdate::Sets(Player::Two, v)),
        MessageKey::Server => uint().and_then(Player::from_index).map(FieldUpdate::Server),
        MessageKey::Player1Name => text().map(|v| FieldUpdate::Name(Player::One, v)),
        MessageKey::Player2Name => text().map(|v| FieldUpdate::Name(Player::Two, v)),
    }
}

/// Fire-and-forget delivery of action intents to the controller.
pub trait ActionSink: Send {
    fn send_action(&self, action: ActionCode);
}

#[derive(Debug, Clone)]
pub struct ChannelActionSink {
    tx: mpsc::UnboundedSender<Dictionary>,
}

impl ChannelActionSink {
    pub fn new(tx: mpsc::UnboundedSender<Dictionary>) -> Self {
        Self { tx }
    }
}

impl ActionSink for ChannelActionSink {
    fn send_action(&self, action: ActionCode) {
        match self.tx.send(Dictionary::action(action)) {
            Ok(()) => debug!(?action, "queued action for controller"),
            Err(_) => warn!(?action, "controller link closed; action dropped"),
        }
    }
}

/// Remote-mode side of a session: forwards intents and mirrors the feed.
pub struct FeedMirror {
    sink: Box<dyn ActionSink>,
}

impl FeedMirror {
    pub fn new(sink: impl ActionSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    pub fn send(&self, action: ActionCode) {
        self.sink.send_action(action);
    }

    /// Returns how many fields were applied.
    pub fn apply(&self, dict: &Dictionary, projection: &mut DisplayProjection) -> usize {
        let updates = decode_fields(dict);
        for update in &updates {
            projection.apply(update);
        }
        updates.len()
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
