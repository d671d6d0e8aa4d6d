use scoring::ScoreEngine;
use shared::{
    domain::{MatchState, Player},
    protocol::{ActionCode, Dictionary},
};

/// The scoring authority paired displays mirror. Every mutation returns the
/// fields that changed, ready to broadcast.
#[derive(Debug, Clone)]
pub struct MatchAuthority {
    engine: ScoreEngine,
    names: [String; 2],
}

impl MatchAuthority {
    pub fn new(names: [String; 2]) -> Self {
        Self {
            engine: ScoreEngine::new(),
            names,
        }
    }

    pub fn state(&self) -> &MatchState {
        self.engine.state()
    }

    pub fn names(&self) -> &[String; 2] {
        &self.names
    }

    pub fn snapshot(&self) -> Dictionary {
        Dictionary::snapshot(self.engine.state(), &self.names)
    }

    pub fn apply_action(&mut self, action: ActionCode) -> Dictionary {
        self.mutate(|authority| match action {
            ActionCode::PointP1 => {
                authority.engine.add_point(Player::One);
            }
            ActionCode::PointP2 => {
                authority.engine.add_point(Player::Two);
            }
            ActionCode::Undo => {
                authority.engine.undo();
            }
        })
    }

    pub fn rename(&mut self, player: Player, name: String) -> Dictionary {
        self.mutate(|authority| authority.names[player.index() as usize] = name)
    }

    pub fn reset(&mut self) -> Dictionary {
        self.mutate(|authority| authority.engine.reset())
    }

    fn mutate(&mut self, change: impl FnOnce(&mut Self)) -> Dictionary {
        let before = self.snapshot();
        change(self);
        self.snapshot().changed_since(&before)
    }
}

#[cfg(test)]
mod tests {
    use shared::protocol::{MessageKey, TupleValue};

    use super::*;

    fn authority() -> MatchAuthority {
        MatchAuthority::new(["Ana".to_string(), "Bea".to_string()])
    }

    #[test]
    fn point_reports_only_the_score_field() {
        let mut authority = authority();
        let changed = authority.apply_action(ActionCode::PointP2);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed.get(MessageKey::ScoreP2), Some(&TupleValue::Uint(15)));
    }

    #[test]
    fn game_win_reports_scores_games_and_server() {
        let mut authority = authority();
        for _ in 0..3 {
            authority.apply_action(ActionCode::PointP1);
        }
        let changed = authority.apply_action(ActionCode::PointP1);

        assert_eq!(changed.get(MessageKey::ScoreP1), Some(&TupleValue::Uint(0)));
        assert_eq!(changed.get(MessageKey::GamesP1), Some(&TupleValue::Uint(1)));
        assert_eq!(changed.get(MessageKey::Server), Some(&TupleValue::Uint(1)));
        assert!(changed.get(MessageKey::ScoreP2).is_none());
    }

    #[test]
    fn undo_without_history_reports_nothing() {
        let mut authority = authority();
        assert!(authority.apply_action(ActionCode::Undo).is_empty());

        authority.apply_action(ActionCode::PointP1);
        let changed = authority.apply_action(ActionCode::Undo);
        assert_eq!(changed.get(MessageKey::ScoreP1), Some(&TupleValue::Uint(0)));
        assert!(authority.apply_action(ActionCode::Undo).is_empty());
    }

    #[test]
    fn rename_reports_the_name_field() {
        let mut authority = authority();
        let changed = authority.rename(Player::Two, "Cleo".to_string());
        assert_eq!(changed.len(), 1);
        assert_eq!(
            changed.get(MessageKey::Player2Name),
            Some(&TupleValue::Text("Cleo".to_string()))
        );
        assert!(authority.rename(Player::Two, "Cleo".to_string()).is_empty());
    }

    #[test]
    fn reset_returns_to_love_all() {
        let mut authority = authority();
        authority.apply_action(ActionCode::PointP1);
        authority.apply_action(ActionCode::PointP2);
        let changed = authority.reset();
        assert_eq!(changed.len(), 2);
        assert_eq!(*authority.state(), MatchState::default());
        assert_eq!(authority.names()[0], "Ana");
    }
}
