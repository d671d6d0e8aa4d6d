use super::*;

fn score_points(engine: &mut ScoreEngine, player: Player, count: usize) -> PointOutcome {
    let mut outcome = PointOutcome::Scored;
    for _ in 0..count {
        outcome = engine.add_point(player);
    }
    outcome
}

fn win_games(engine: &mut ScoreEngine, player: Player, count: usize) {
    for _ in 0..count {
        score_points(engine, player, 4);
    }
}

fn deuce() -> ScoreEngine {
    let mut engine = ScoreEngine::new();
    score_points(&mut engine, Player::One, 3);
    score_points(&mut engine, Player::Two, 3);
    engine
}

fn scores(engine: &ScoreEngine) -> (PointScore, PointScore) {
    (engine.state().p1_score, engine.state().p2_score)
}

#[test]
fn standard_game_progresses_and_flips_server() {
    let mut engine = ScoreEngine::new();

    assert_eq!(engine.add_point(Player::One), PointOutcome::Scored);
    assert_eq!(engine.state().p1_score, PointScore::Fifteen);
    engine.add_point(Player::One);
    assert_eq!(engine.state().p1_score, PointScore::Thirty);
    engine.add_point(Player::One);
    assert_eq!(engine.state().p1_score, PointScore::Forty);
    assert_eq!(
        engine.add_point(Player::One),
        PointOutcome::GameWon(Player::One)
    );

    let state = engine.state();
    assert_eq!(state.p1_games, 1);
    assert_eq!(state.p2_games, 0);
    assert_eq!((state.p1_score, state.p2_score), (PointScore::Love, PointScore::Love));
    assert_eq!(state.server, Player::Two);
}

#[test]
fn deuce_and_advantage_cycle() {
    let mut engine = deuce();
    assert_eq!(scores(&engine), (PointScore::Forty, PointScore::Forty));

    assert_eq!(engine.add_point(Player::One), PointOutcome::Advantage);
    assert_eq!(scores(&engine), (PointScore::Advantage, PointScore::Forty));

    assert_eq!(engine.add_point(Player::Two), PointOutcome::Deuce);
    assert_eq!(scores(&engine), (PointScore::Forty, PointScore::Forty));

    engine.add_point(Player::Two);
    assert_eq!(scores(&engine), (PointScore::Forty, PointScore::Advantage));

    engine.add_point(Player::One);
    assert_eq!(scores(&engine), (PointScore::Forty, PointScore::Forty));

    engine.add_point(Player::One);
    assert_eq!(
        engine.add_point(Player::One),
        PointOutcome::GameWon(Player::One)
    );
    assert_eq!(engine.state().p1_games, 1);
    assert_eq!(scores(&engine), (PointScore::Love, PointScore::Love));
}

#[test]
fn forty_against_lower_score_wins_game() {
    let mut engine = ScoreEngine::new();
    score_points(&mut engine, Player::Two, 2);
    score_points(&mut engine, Player::One, 3);
    assert_eq!(
        engine.add_point(Player::One),
        PointOutcome::GameWon(Player::One)
    );
}

#[test]
fn set_won_by_margin_resets_games() {
    let mut engine = ScoreEngine::new();
    win_games(&mut engine, Player::Two, 4);
    win_games(&mut engine, Player::One, 5);
    assert_eq!(engine.state().p1_games, 5);

    assert_eq!(
        score_points(&mut engine, Player::One, 4),
        PointOutcome::SetWon(Player::One)
    );
    let state = engine.state();
    assert_eq!(state.p1_sets, 1);
    assert_eq!(state.p2_sets, 0);
    assert_eq!((state.p1_games, state.p2_games), (0, 0));
}

#[test]
fn six_five_is_not_a_set() {
    let mut engine = ScoreEngine::new();
    win_games(&mut engine, Player::One, 5);
    win_games(&mut engine, Player::Two, 5);
    win_games(&mut engine, Player::One, 1);

    assert_eq!(engine.state().p1_games, 6);
    assert_eq!(engine.state().p2_games, 5);
    assert_eq!(engine.state().p1_sets, 0);

    assert_eq!(
        score_points(&mut engine, Player::One, 4),
        PointOutcome::SetWon(Player::One)
    );
    assert_eq!(engine.state().p1_sets, 1);
}

#[test]
fn seven_six_is_awarded_outright() {
    let mut engine = ScoreEngine::new();
    win_games(&mut engine, Player::One, 5);
    win_games(&mut engine, Player::Two, 6);
    win_games(&mut engine, Player::One, 1);
    assert_eq!((engine.state().p1_games, engine.state().p2_games), (6, 6));

    assert_eq!(
        score_points(&mut engine, Player::One, 4),
        PointOutcome::SetWon(Player::One)
    );
    let state = engine.state();
    assert_eq!(state.p1_sets, 1);
    assert_eq!((state.p1_games, state.p2_games), (0, 0));
    assert!(!state.tiebreak);
}

#[test]
fn sets_accumulate_without_a_match_winner() {
    let mut engine = ScoreEngine::new();
    for _ in 0..4 {
        win_games(&mut engine, Player::Two, 6);
    }
    assert_eq!(engine.state().p2_sets, 4);
    assert_eq!(engine.state().p1_sets, 0);
}

#[test]
fn undo_restores_exact_prior_state() {
    let mut engine = deuce();
    engine.add_point(Player::Two);
    let before = *engine.state();

    engine.add_point(Player::Two);
    assert_ne!(*engine.state(), before);
    assert!(engine.can_undo());

    assert!(engine.undo());
    assert_eq!(*engine.state(), before);
    assert!(!engine.can_undo());
}

#[test]
fn undo_reverts_a_set_win() {
    let mut engine = ScoreEngine::new();
    win_games(&mut engine, Player::One, 5);
    score_points(&mut engine, Player::One, 3);
    let before = *engine.state();

    engine.add_point(Player::One);
    assert_eq!(engine.state().p1_sets, 1);

    engine.undo();
    assert_eq!(*engine.state(), before);
}

#[test]
fn undo_without_history_is_a_no_op() {
    let mut engine = ScoreEngine::new();
    assert!(!engine.can_undo());
    assert!(!engine.undo());
    assert_eq!(*engine.state(), MatchState::default());

    engine.add_point(Player::One);
    engine.undo();
    let after_first_undo = *engine.state();
    assert!(!engine.undo());
    assert_eq!(*engine.state(), after_first_undo);
}

#[test]
fn reset_clears_state_and_history() {
    let mut engine = ScoreEngine::new();
    win_games(&mut engine, Player::One, 3);
    engine.add_point(Player::Two);

    engine.reset();

    assert_eq!(*engine.state(), MatchState::default());
    assert_eq!(engine.state().server, Player::One);
    assert!(!engine.can_undo());
}

#[test]
fn reachable_states_respect_invariants() {
    let mut engine = ScoreEngine::new();
    let mut seed: u64 = 0x5eed_cafe;
    let mut sets_seen = 0;

    for _ in 0..20_000 {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let player = if seed >> 63 == 0 {
            Player::One
        } else {
            Player::Two
        };

        let outcome = if (seed >> 40) % 17 == 0 {
            engine.undo();
            None
        } else {
            Some(engine.add_point(player))
        };

        let state = engine.state();
        assert!(
            !(state.p1_score == PointScore::Advantage && state.p2_score == PointScore::Advantage)
        );
        assert!(state.p1_games <= 7 && state.p2_games <= 7);
        if let Some(PointOutcome::SetWon(_)) = outcome {
            sets_seen += 1;
            assert_eq!((state.p1_games, state.p2_games), (0, 0));
        }
    }

    assert!(sets_seen > 0);
}
