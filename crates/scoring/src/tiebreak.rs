use shared::domain::Player;

const TIEBREAK_TARGET: u32 = 7;
const TIEBREAK_MARGIN: u32 = 2;

/// Point-to-target sub-game. Nothing in the engine enters it yet; the
/// trigger condition has not been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiebreakGame {
    points: [u32; 2],
    target: u32,
}

impl Default for TiebreakGame {
    fn default() -> Self {
        Self::with_target(TIEBREAK_TARGET)
    }
}

impl TiebreakGame {
    pub fn with_target(target: u32) -> Self {
        Self {
            points: [0, 0],
            target,
        }
    }

    pub fn points(&self, player: Player) -> u32 {
        self.points[player.index() as usize]
    }

    pub fn winner(&self) -> Option<Player> {
        Player::BOTH.into_iter().find(|player| {
            let own = self.points(*player);
            own >= self.target && own >= self.points(player.opponent()) + TIEBREAK_MARGIN
        })
    }

    /// Adds a point unless the tiebreak is already decided; returns the winner
    /// once the target is reached with the required margin.
    pub fn score_point(&mut self, player: Player) -> Option<Player> {
        if self.winner().is_none() {
            self.points[player.index() as usize] += 1;
        }
        self.winner()
    }
}
