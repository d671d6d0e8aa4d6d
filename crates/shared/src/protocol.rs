use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    domain::{MatchState, Player},
    error::ProtocolError,
};

/// Integer tags shared with the paired controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum MessageKey {
    Action = 0,
    ScoreP1 = 1,
    ScoreP2 = 2,
    GamesP1 = 3,
    GamesP2 = 4,
    SetsP1 = 5,
    SetsP2 = 6,
    Server = 7,
    Player1Name = 8,
    Player2Name = 9,
}

impl MessageKey {
    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        Some(match tag {
            0 => Self::Action,
            1 => Self::ScoreP1,
            2 => Self::ScoreP2,
            3 => Self::GamesP1,
            4 => Self::GamesP2,
            5 => Self::SetsP1,
            6 => Self::SetsP2,
            7 => Self::Server,
            8 => Self::Player1Name,
            9 => Self::Player2Name,
            _ => return None,
        })
    }

    pub fn score(player: Player) -> Self {
        match player {
            Player::One => Self::ScoreP1,
            Player::Two => Self::ScoreP2,
        }
    }

    pub fn games(player: Player) -> Self {
        match player {
            Player::One => Self::GamesP1,
            Player::Two => Self::GamesP2,
        }
    }

    pub fn sets(player: Player) -> Self {
        match player {
            Player::One => Self::SetsP1,
            Player::Two => Self::SetsP2,
        }
    }

    pub fn name(player: Player) -> Self {
        match player {
            Player::One => Self::Player1Name,
            Player::Two => Self::Player2Name,
        }
    }
}

/// Outbound intents sent by a display that is not the scoring authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCode {
    PointP1,
    PointP2,
    /// Undo on the controller; the display's select button maps here.
    Undo,
}

impl ActionCode {
    pub fn code(self) -> u32 {
        match self {
            Self::PointP1 => 0,
            Self::PointP2 => 1,
            Self::Undo => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::PointP1),
            1 => Some(Self::PointP2),
            2 => Some(Self::Undo),
            _ => None,
        }
    }

    pub fn point_for(player: Player) -> Self {
        match player {
            Player::One => Self::PointP1,
            Player::Two => Self::PointP2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TupleValue {
    Uint(u32),
    Int(i64),
    Text(String),
}

impl TupleValue {
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Self::Uint(v) => Some(*v),
            Self::Int(v) => u32::try_from(*v).ok(),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    fn from_json_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Self::Uint)
                .or_else(|| n.as_i64().map(Self::Int)),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }
}

impl From<u32> for TupleValue {
    fn from(value: u32) -> Self {
        Self::Uint(value)
    }
}

impl From<&str> for TupleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Keyed message exchanged with the controller. Serialized as a JSON object
/// whose member names are the decimal tags, ordered by tag.
///
/// Decoding only fails when the input is not a JSON object. Members whose
/// name is not a tag, or whose value is not an integer or a string, are
/// dropped one by one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: BTreeMap<u32, TupleValue>,
}

impl<'de> Deserialize<'de> for Dictionary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let members = Map::<String, Value>::deserialize(deserializer)?;
        let mut dict = Self::new();
        for (name, value) in &members {
            let Ok(tag) = name.parse::<u32>() else {
                debug!(%name, "skipping member with non-numeric key");
                continue;
            };
            match TupleValue::from_json_value(value) {
                Some(value) => dict.insert_raw(tag, value),
                None => debug!(tag, %value, "skipping member with unsupported value"),
            }
        }
        Ok(dict)
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(action: ActionCode) -> Self {
        let mut dict = Self::new();
        dict.insert(MessageKey::Action, action.code());
        dict
    }

    /// Every state field, as pushed to a display that just connected.
    pub fn snapshot(state: &MatchState, names: &[String; 2]) -> Self {
        let mut dict = Self::new();
        for player in Player::BOTH {
            dict.insert(MessageKey::score(player), state.score(player).value());
            dict.insert(MessageKey::games(player), u32::from(state.games(player)));
            dict.insert(MessageKey::sets(player), state.sets(player));
            dict.insert(
                MessageKey::name(player),
                names[player.index() as usize].as_str(),
            );
        }
        dict.insert(MessageKey::Server, state.server.index());
        dict
    }

    pub fn insert(&mut self, key: MessageKey, value: impl Into<TupleValue>) {
        self.entries.insert(key.tag(), value.into());
    }

    pub fn insert_raw(&mut self, tag: u32, value: TupleValue) {
        self.entries.insert(tag, value);
    }

    pub fn get(&self, key: MessageKey) -> Option<&TupleValue> {
        self.entries.get(&key.tag())
    }

    /// Raw entries in tag order, including tags this build does not know.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &TupleValue)> {
        self.entries.iter().map(|(tag, value)| (*tag, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of `self` that are absent from or differ in `previous`.
    pub fn changed_since(&self, previous: &Dictionary) -> Dictionary {
        let entries = self
            .entries
            .iter()
            .filter(|(tag, value)| previous.entries.get(tag) != Some(value))
            .map(|(tag, value)| (*tag, value.clone()))
            .collect();
        Dictionary { entries }
    }

    pub fn action_code(&self) -> Result<ActionCode, ProtocolError> {
        let value = self
            .get(MessageKey::Action)
            .ok_or(ProtocolError::MissingAction)?;
        value
            .as_uint()
            .and_then(ActionCode::from_code)
            .ok_or_else(|| ProtocolError::UnknownAction(value.clone()))
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(raw)?)
    }
}
