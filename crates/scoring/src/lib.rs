use shared::domain::{MatchState, Player, PointScore};
use tracing::debug;

mod tiebreak;
pub use tiebreak::TiebreakGame;

const SET_GAMES: u8 = 6;
const SET_MARGIN: u8 = 2;
/// Games at which a 7-6 set is awarded outright.
const CAPPED_SET_GAMES: u8 = 7;

/// Holds at most one prior state. Consumed by a single undo, never chained.
#[derive(Debug, Clone, Default)]
pub struct UndoBuffer {
    snapshot: Option<MatchState>,
}

impl UndoBuffer {
    pub fn record(&mut self, state: MatchState) {
        self.snapshot = Some(state);
    }

    pub fn take(&mut self) -> Option<MatchState> {
        self.snapshot.take()
    }

    pub fn is_valid(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }
}

/// What a single point did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    Scored,
    Advantage,
    /// The opponent's advantage was cancelled.
    Deuce,
    GameWon(Player),
    SetWon(Player),
}

#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    state: MatchState,
    undo: UndoBuffer,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = MatchState::default();
        self.undo.clear();
    }

    pub fn add_point(&mut self, player: Player) -> PointOutcome {
        self.undo.record(self.state);

        let opponent = player.opponent();
        let scorer = self.state.score(player);
        let other = self.state.score(opponent);

        let outcome = match scorer {
            PointScore::Love => self.set_score(player, PointScore::Fifteen),
            PointScore::Fifteen => self.set_score(player, PointScore::Thirty),
            PointScore::Thirty => self.set_score(player, PointScore::Forty),
            PointScore::Forty => match other {
                PointScore::Forty => {
                    self.set_score(player, PointScore::Advantage);
                    PointOutcome::Advantage
                }
                PointScore::Advantage => {
                    self.set_score(opponent, PointScore::Forty);
                    PointOutcome::Deuce
                }
                _ => self.win_game(player),
            },
            PointScore::Advantage => self.win_game(player),
        };

        debug!(?player, ?outcome, state = ?self.state, "point applied");
        outcome
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_valid()
    }

    /// Restores the state before the last point. Returns false when there is
    /// nothing to roll back.
    pub fn undo(&mut self) -> bool {
        match self.undo.take() {
            Some(previous) => {
                self.state = previous;
                debug!(state = ?self.state, "point undone");
                true
            }
            None => false,
        }
    }

    fn set_score(&mut self, player: Player, score: PointScore) -> PointOutcome {
        *self.state.score_mut(player) = score;
        PointOutcome::Scored
    }

    fn win_game(&mut self, player: Player) -> PointOutcome {
        self.state.p1_score = PointScore::Love;
        self.state.p2_score = PointScore::Love;
        self.state.server = self.state.server.opponent();
        *self.state.games_mut(player) += 1;

        if !wins_set(
            self.state.games(player),
            self.state.games(player.opponent()),
        ) {
            return PointOutcome::GameWon(player);
        }

        *self.state.sets_mut(player) += 1;
        self.state.p1_games = 0;
        self.state.p2_games = 0;
        debug!(?player, p1_sets = self.state.p1_sets, p2_sets = self.state.p2_sets, "set won");
        PointOutcome::SetWon(player)
    }
}

fn wins_set(games: u8, opponent_games: u8) -> bool {
    (games >= SET_GAMES && games >= opponent_games + SET_MARGIN)
        || (games == CAPPED_SET_GAMES && opponent_games == CAPPED_SET_GAMES - 1)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
