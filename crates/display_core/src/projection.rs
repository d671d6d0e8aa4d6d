use chrono::NaiveTime;
use shared::domain::{MatchState, ModeKind, Player, PointScore};

use crate::{menu::MenuView, sync::FieldUpdate};

/// Longest player name kept from the feed, in characters.
pub const NAME_CAPACITY: usize = 31;
const SERVE_SUFFIX: &str = " : Serve";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardLabels {
    pub status: &'static str,
    pub clock: String,
    pub scores: [String; 2],
    pub games: [String; 2],
    pub sets: [String; 2],
    pub names: [String; 2],
    pub serve_marker: Player,
}

/// Screen surface the projection is drawn onto.
pub trait Renderer {
    fn render(&mut self, labels: &ScoreboardLabels);
    fn render_menu(&mut self, menu: &MenuView);
    /// Short haptic acknowledgement of a button press.
    fn pulse(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl ClockFormat {
    pub fn format(self, time: NaiveTime) -> String {
        match self {
            Self::TwentyFourHour => time.format("%H:%M").to_string(),
            Self::TwelveHour => time.format("%I:%M").to_string(),
        }
    }
}

pub fn score_label(value: u32) -> String {
    if value == PointScore::ADVANTAGE_VALUE {
        "Ad".to_string()
    } else {
        value.to_string()
    }
}

pub fn games_label(value: u32) -> String {
    format!("G:{value}")
}

pub fn sets_label(value: u32) -> String {
    format!("S:{value}")
}

/// Read-only view of a match: label buffers plus the name and server
/// sources they are recombined from.
#[derive(Debug, Clone)]
pub struct DisplayProjection {
    labels: ScoreboardLabels,
    name_sources: [String; 2],
    server: Player,
}

impl DisplayProjection {
    pub fn new(mode: ModeKind) -> Self {
        let status = match mode {
            ModeKind::Standalone => "Standalone",
            ModeKind::Remote => "AT Remote",
        };
        let mut projection = Self {
            labels: ScoreboardLabels {
                status,
                clock: String::new(),
                scores: [score_label(0), score_label(0)],
                games: [games_label(0), games_label(0)],
                sets: [sets_label(0), sets_label(0)],
                names: [String::new(), String::new()],
                serve_marker: Player::One,
            },
            name_sources: ["P1".to_string(), "P2".to_string()],
            server: Player::One,
        };
        projection.recompose_names();
        projection
    }

    pub fn labels(&self) -> &ScoreboardLabels {
        &self.labels
    }

    pub fn refresh_from_state(&mut self, state: &MatchState) {
        for player in Player::BOTH {
            let slot = slot(player);
            self.labels.scores[slot] = score_label(state.score(player).value());
            self.labels.games[slot] = games_label(u32::from(state.games(player)));
            self.labels.sets[slot] = sets_label(state.sets(player));
        }
        self.server = state.server;
        self.recompose_names();
    }

    /// Applies one inbound field; every other label keeps its value.
    pub fn apply(&mut self, update: &FieldUpdate) {
        match update {
            FieldUpdate::Score(player, value) => self.labels.scores[slot(*player)] = score_label(*value),
            FieldUpdate::Games(player, value) => self.labels.games[slot(*player)] = games_label(*value),
            FieldUpdate::Sets(player, value) => self.labels.sets[slot(*player)] = sets_label(*value),
            FieldUpdate::Server(player) => {
                self.server = *player;
                self.recompose_names();
            }
            FieldUpdate::Name(player, name) => {
                self.name_sources[slot(*player)] = name.chars().take(NAME_CAPACITY).collect();
                self.recompose_names();
            }
        }
    }

    pub fn set_clock(&mut self, clock: String) {
        self.labels.clock = clock;
    }

    fn recompose_names(&mut self) {
        for player in Player::BOTH {
            let slot = slot(player);
            let suffix = if player == self.server { SERVE_SUFFIX } else { "" };
            self.labels.names[slot] = format!("{}{suffix}", self.name_sources[slot]);
        }
        self.labels.serve_marker = self.server;
    }
}

fn slot(player: Player) -> usize {
    player.index() as usize
}
