//! Integration tests for the Kalah rules engine.
//!
//! These tests verify complete move flows: sowing, extra turns, captures,
//! rejections and the end-of-game sweep, plus the seed conservation
//! invariant over whole games.

use kalah_core::*;

/// Play the lowest legal house for the current player, panicking if the
/// game offers no legal move while still in progress.
fn play_any(game: &mut GameState) -> Vec<MoveEvent> {
    let player = game.current_player;
    for pit in player.house_range() {
        match game.apply_move(pit) {
            Ok(events) => return events,
            Err(GameError::EmptyPit { .. }) => continue,
            Err(e) => panic!("unexpected rejection for pit {}: {}", pit, e),
        }
    }
    panic!("no legal move for {} in a game still in progress", player);
}

#[test]
fn test_opening_move_earns_extra_turn() {
    // Scenario A: Player 1 picks house 1 holding 6 seeds. Houses 2-6 and
    // store 7 each gain one seed and Player 1 keeps the turn.
    let mut game = GameState::new();

    let events = game.apply_move(1).unwrap();

    assert_eq!(game.board.seeds(1).unwrap(), 0);
    for pit in 2..=6 {
        assert_eq!(game.board.seeds(pit).unwrap(), 7, "house {}", pit);
    }
    assert_eq!(game.board.store_seeds(Player::One), 1);
    for pit in 8..=13 {
        assert_eq!(game.board.seeds(pit).unwrap(), 6, "house {}", pit);
    }
    assert_eq!(game.board.store_seeds(Player::Two), 0);

    assert_eq!(game.current_player, Player::One);
    assert!(events.contains(&MoveEvent::ExtraTurn {
        player: Player::One
    }));
    assert_eq!(game.board.total_seeds(), TOTAL_SEEDS);
}

#[test]
fn test_single_seed_capture_after_extra_turn() {
    // Scenario B: continuing from the opening move, arrange house 1 with a
    // single seed and house 2 empty. The lone seed lands on the empty own
    // house and captures the mirrored house 9 plus itself.
    let mut game = GameState::new();
    game.apply_move(1).unwrap();

    game.board.set_seeds(1, 1).unwrap();
    game.board.set_seeds(2, 0).unwrap();
    let total_before = game.board.total_seeds();
    let opposite_seeds = game.board.seeds(9).unwrap();
    let store_before = game.board.store_seeds(Player::One);

    let events = game.apply_move(1).unwrap();

    assert!(events.contains(&MoveEvent::Captured {
        player: Player::One,
        house: 2,
        opposite: 9,
        seeds: opposite_seeds + 1,
    }));
    assert_eq!(game.board.seeds(2).unwrap(), 0);
    assert_eq!(game.board.seeds(9).unwrap(), 0);
    assert_eq!(
        game.board.store_seeds(Player::One),
        store_before + opposite_seeds + 1
    );
    assert_eq!(game.current_player, Player::Two);
    assert_eq!(game.board.total_seeds(), total_before);
}

#[test]
fn test_empty_pit_rejection_keeps_board_and_turn() {
    // Scenario C: picking an empty house is rejected without consuming
    // the turn.
    let mut game = GameState::new();
    game.board.set_seeds(4, 0).unwrap();
    let snapshot = game.clone();

    assert_eq!(game.apply_move(4), Err(GameError::EmptyPit { pit: 4 }));
    assert_eq!(game, snapshot);
    assert_eq!(game.current_player, Player::One);
}

#[test]
fn test_wrong_turn_rejection_keeps_board() {
    // Scenario D: Player 1 is active, so every Player 2 house is rejected.
    let game = GameState::new();

    for pit in Player::Two.house_range() {
        let mut attempt = game.clone();
        assert_eq!(
            attempt.apply_move(pit),
            Err(GameError::WrongTurn {
                pit,
                player: Player::One
            })
        );
        assert_eq!(attempt, game, "pit {} mutated the board", pit);
    }
}

#[test]
fn test_game_end_sweeps_opponent_side() {
    // Scenario E: Player 1's final seed reaches their store, leaving their
    // side empty. Player 2's remaining seeds are swept into store 14 and
    // no further moves are accepted.
    let mut game = GameState::new();
    for pit in Player::One.house_range() {
        game.board.set_seeds(pit, 0).unwrap();
    }
    game.board.set_seeds(6, 1).unwrap();
    for pit in Player::Two.house_range() {
        game.board.set_seeds(pit, 2).unwrap();
    }
    game.board.set_seeds(7, 30).unwrap();
    game.board.set_seeds(14, 5).unwrap();
    let total_before = game.board.total_seeds();

    let events = game.apply_move(6).unwrap();

    assert!(events.contains(&MoveEvent::GameEnded {
        swept_from: Player::Two,
        swept_seeds: 12,
        winner: Some(Player::One),
    }));
    assert!(game.is_finished());
    assert_eq!(game.winner(), Some(Player::One));
    assert_eq!(game.board.store_seeds(Player::One), 31);
    assert_eq!(game.board.store_seeds(Player::Two), 17);
    assert_eq!(game.board.house_sum(Player::One), 0);
    assert_eq!(game.board.house_sum(Player::Two), 0);
    assert_eq!(game.board.total_seeds(), total_before);

    assert_eq!(game.apply_move(8), Err(GameError::GameOver));
}

#[test]
fn test_game_end_can_be_a_draw() {
    let mut game = GameState::new();
    for pit in Player::One.house_range() {
        game.board.set_seeds(pit, 0).unwrap();
    }
    game.board.set_seeds(6, 1).unwrap();
    for pit in Player::Two.house_range() {
        game.board.set_seeds(pit, 0).unwrap();
    }
    game.board.set_seeds(8, 10).unwrap();
    game.board.set_seeds(7, 10).unwrap();
    game.board.set_seeds(14, 1).unwrap();

    game.apply_move(6).unwrap();

    // Both stores end at 11
    assert_eq!(game.board.store_seeds(Player::One), 11);
    assert_eq!(game.board.store_seeds(Player::Two), 11);
    assert!(game.is_finished());
    assert_eq!(game.winner(), None);
}

#[test]
fn test_sowing_wraps_past_opponent_store() {
    // Player 2 sows 9 seeds from house 13: store 14, houses 1-6 on the
    // opponent's side, then (skipping store 7) houses 8 and 9.
    let mut game = GameState::new();
    game.current_player = Player::Two;
    game.board.set_seeds(13, 9).unwrap();

    game.apply_move(13).unwrap();

    assert_eq!(game.board.seeds(13).unwrap(), 0);
    assert_eq!(game.board.store_seeds(Player::Two), 1);
    for pit in 1..=6 {
        assert_eq!(game.board.seeds(pit).unwrap(), 7, "house {}", pit);
    }
    // Opponent's store is never sown into
    assert_eq!(game.board.store_seeds(Player::One), 0);
    assert_eq!(game.board.seeds(8).unwrap(), 7);
    assert_eq!(game.board.seeds(9).unwrap(), 7);
    assert_eq!(game.board.seeds(10).unwrap(), 6);

    assert_eq!(game.current_player, Player::One);
}

#[test]
fn test_opponent_store_only_changes_via_capture_or_sweep() {
    let mut game = GameState::new();

    for _ in 0..200 {
        if game.is_finished() {
            break;
        }
        let opponent = game.current_player.other();
        let store_before = game.board.store_seeds(opponent);

        let events = play_any(&mut game);

        let touched = events.iter().any(|e| {
            matches!(e, MoveEvent::GameEnded { .. })
        });
        if !touched {
            assert_eq!(
                game.board.store_seeds(opponent),
                store_before,
                "opponent store changed during sowing at move {}",
                game.turn_number
            );
        }
    }
}

#[test]
fn test_seed_conservation_over_full_game() {
    let mut game = GameState::new();

    let mut moves = 0;
    while !game.is_finished() && moves < 500 {
        play_any(&mut game);
        assert_eq!(
            game.board.total_seeds(),
            TOTAL_SEEDS,
            "conservation broken at move {}",
            game.turn_number
        );
        moves += 1;
    }

    assert!(game.is_finished(), "game should end within {} moves", moves);
    // Everything ends up in the stores
    assert_eq!(
        game.board.store_seeds(Player::One) + game.board.store_seeds(Player::Two),
        TOTAL_SEEDS
    );
    assert_eq!(game.board.house_sum(Player::One), 0);
    assert_eq!(game.board.house_sum(Player::Two), 0);
}

#[test]
fn test_state_survives_persistence_round_trip_mid_game() {
    let mut game = GameState::new();
    for _ in 0..5 {
        play_any(&mut game);
    }

    let json = game.to_json().unwrap();
    let mut restored = GameState::from_json(&json).unwrap();
    assert_eq!(restored, game);

    // The restored game keeps playing by the same rules
    let events_restored = play_any(&mut restored);
    let events_original = play_any(&mut game);
    assert_eq!(events_restored, events_original);
    assert_eq!(restored, game);
}
