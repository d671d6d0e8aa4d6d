use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    #[default]
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Wire index: 0 for player one, 1 for player two.
    pub fn index(self) -> u32 {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::One),
            1 => Some(Self::Two),
            _ => None,
        }
    }
}

/// Within-game point score. Advantage travels as the sentinel value 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum PointScore {
    #[default]
    Love,
    Fifteen,
    Thirty,
    Forty,
    Advantage,
}

impl PointScore {
    pub const ADVANTAGE_VALUE: u32 = 50;

    pub fn value(self) -> u32 {
        match self {
            Self::Love => 0,
            Self::Fifteen => 15,
            Self::Thirty => 30,
            Self::Forty => 40,
            Self::Advantage => Self::ADVANTAGE_VALUE,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Love),
            15 => Some(Self::Fifteen),
            30 => Some(Self::Thirty),
            40 => Some(Self::Forty),
            Self::ADVANTAGE_VALUE => Some(Self::Advantage),
            _ => None,
        }
    }
}

impl From<PointScore> for u32 {
    fn from(value: PointScore) -> Self {
        value.value()
    }
}

impl TryFrom<u32> for PointScore {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| format!("invalid point score {value}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchState {
    pub p1_score: PointScore,
    pub p2_score: PointScore,
    pub p1_games: u8,
    pub p2_games: u8,
    pub p1_sets: u32,
    pub p2_sets: u32,
    pub server: Player,
    /// Reserved for a tiebreak game; no transition sets it.
    pub tiebreak: bool,
}

impl MatchState {
    pub fn score(&self, player: Player) -> PointScore {
        match player {
            Player::One => self.p1_score,
            Player::Two => self.p2_score,
        }
    }

    pub fn score_mut(&mut self, player: Player) -> &mut PointScore {
        match player {
            Player::One => &mut self.p1_score,
            Player::Two => &mut self.p2_score,
        }
    }

    pub fn games(&self, player: Player) -> u8 {
        match player {
            Player::One => self.p1_games,
            Player::Two => self.p2_games,
        }
    }

    pub fn games_mut(&mut self, player: Player) -> &mut u8 {
        match player {
            Player::One => &mut self.p1_games,
            Player::Two => &mut self.p2_games,
        }
    }

    pub fn sets(&self, player: Player) -> u32 {
        match player {
            Player::One => self.p1_sets,
            Player::Two => self.p2_sets,
        }
    }

    pub fn sets_mut(&mut self, player: Player) -> &mut u32 {
        match player {
            Player::One => &mut self.p1_sets,
            Player::Two => &mut self.p2_sets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Remote,
    Standalone,
}
