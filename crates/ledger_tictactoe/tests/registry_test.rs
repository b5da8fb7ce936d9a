//! Tests for the game registry state machine.

use ledger_tictactoe::{
    Cell, GameEvent, GameRegistry, Identity, Mark, MemoryStore, Phase, Position, RegistryError,
};

fn alice() -> Identity {
    Identity::new("0xA11CE00000000000000000000000000000000001").expect("valid identity")
}

fn bob() -> Identity {
    Identity::new("0xB0B0000000000000000000000000000000000002").expect("valid identity")
}

fn mallory() -> Identity {
    Identity::new("0x3A11079000000000000000000000000000000003").expect("valid identity")
}

/// Creates game 0 between alice (X) and bob (O).
fn setup_game() -> GameRegistry<MemoryStore> {
    let registry = GameRegistry::new(MemoryStore::new());
    registry.create_game(&alice(), 1).expect("create");
    registry.accept_game(0, &bob(), 2).expect("accept");
    registry
}

/// Plays `moves` alternately starting with alice; turn marks count up from 10.
fn play(registry: &GameRegistry<MemoryStore>, moves: &[(u8, u8)]) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for (ply, &(row, col)) in moves.iter().enumerate() {
        let caller = if ply % 2 == 0 { alice() } else { bob() };
        let receipt = registry
            .make_move(0, &caller, row, col, 10 + ply as u64)
            .expect("valid move");
        events.extend(receipt.into_events());
    }
    events
}

#[test]
fn test_create_game() {
    let registry = GameRegistry::new(MemoryStore::new());

    let receipt = registry.create_game(&alice(), 1).expect("create");
    assert_eq!(*receipt.game_id(), 0);
    assert_eq!(
        receipt.events(),
        &vec![GameEvent::GameCreated {
            game_id: 0,
            creator: alice(),
        }]
    );

    let game = registry.game(0).expect("game exists");
    assert_eq!(game.player(), &alice());
    assert_eq!(game.opponent(), None);
    assert_eq!(game.moves_left(), 9);
    assert!(!game.is_finished());
    assert_eq!(game.phase(), Phase::Open);
    assert_eq!(game.turn_marks().player(), 1);
}

#[test]
fn test_ids_are_sequential() {
    let registry = GameRegistry::new(MemoryStore::new());
    for expected in 0..5 {
        let receipt = registry.create_game(&alice(), expected).expect("create");
        assert_eq!(*receipt.game_id(), expected);
    }
    assert_eq!(registry.game_count().expect("count"), 5);
}

#[test]
fn test_accept_game() {
    let registry = GameRegistry::new(MemoryStore::new());
    registry.create_game(&alice(), 1).expect("create");

    let receipt = registry.accept_game(0, &bob(), 4).expect("accept");
    assert_eq!(
        receipt.events(),
        &vec![GameEvent::GameAccepted {
            game_id: 0,
            acceptor: bob(),
            creator: alice(),
        }]
    );

    let game = registry.game(0).expect("game exists");
    assert_eq!(game.opponent(), Some(&bob()));
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.turn_marks().opponent(), 4);
}

#[test]
fn test_creator_cannot_accept_own_game() {
    let registry = GameRegistry::new(MemoryStore::new());
    registry.create_game(&alice(), 1).expect("create");

    let result = registry.accept_game(0, &alice(), 2);
    assert!(matches!(result, Err(RegistryError::InvalidOpponent(_))));
    assert_eq!(registry.phase(0).expect("game exists"), Phase::Open);
}

#[test]
fn test_identity_comparison_ignores_case() {
    let registry = GameRegistry::new(MemoryStore::new());
    registry.create_game(&alice(), 1).expect("create");

    let shouting = Identity::new("0xA11CE00000000000000000000000000000000001".to_uppercase())
        .expect("valid identity");
    let result = registry.accept_game(0, &shouting, 2);
    assert!(matches!(result, Err(RegistryError::InvalidOpponent(_))));
}

#[test]
fn test_accept_twice_rejected() {
    let registry = setup_game();
    let result = registry.accept_game(0, &mallory(), 3);
    assert_eq!(result, Err(RegistryError::AlreadyAccepted(0)));
    assert_eq!(registry.game(0).expect("game").opponent(), Some(&bob()));
}

#[test]
fn test_accept_unknown_game() {
    let registry = GameRegistry::new(MemoryStore::new());
    assert_eq!(
        registry.accept_game(42, &bob(), 1),
        Err(RegistryError::GameNotFound(42))
    );
}

#[test]
fn test_valid_moves_emit_events() {
    let registry = setup_game();

    let receipt = registry.make_move(0, &alice(), 0, 0, 10).expect("valid move");
    assert_eq!(
        receipt.events(),
        &vec![GameEvent::MovePlayed {
            game_id: 0,
            mover: alice(),
            row: 0,
            col: 0,
        }]
    );

    let receipt = registry.make_move(0, &bob(), 1, 0, 11).expect("valid move");
    assert_eq!(
        receipt.events(),
        &vec![GameEvent::MovePlayed {
            game_id: 0,
            mover: bob(),
            row: 1,
            col: 0,
        }]
    );

    let game = registry.game(0).expect("game");
    assert_eq!(game.board().get(Position::TopLeft), Cell::Occupied(Mark::X));
    assert_eq!(game.board().get(Position::MiddleLeft), Cell::Occupied(Mark::O));
    assert_eq!(game.turn_marks().player(), 10);
    assert_eq!(game.turn_marks().opponent(), 11);
}

#[test]
fn test_moves_left_tracks_board() {
    let registry = setup_game();
    let moves = [(0, 0), (1, 1), (2, 2), (0, 1), (2, 1), (2, 0)];

    for (k, &(row, col)) in moves.iter().enumerate() {
        let caller = if k % 2 == 0 { alice() } else { bob() };
        registry
            .make_move(0, &caller, row, col, 10 + k as u64)
            .expect("valid move");

        let game = registry.game(0).expect("game");
        assert_eq!(usize::from(game.moves_left()), 9 - (k + 1));
        assert_eq!(game.board().occupied(), k + 1);
    }
}

#[test]
fn test_move_on_taken_cell_rejected() {
    let registry = setup_game();
    registry.make_move(0, &alice(), 0, 0, 10).expect("valid move");

    let result = registry.make_move(0, &bob(), 0, 0, 11);
    assert_eq!(result, Err(RegistryError::CellOccupied(Position::TopLeft)));
    assert_eq!(registry.game(0).expect("game").moves_left(), 8);
}

#[test]
fn test_alternating_turns_enforced() {
    let registry = setup_game();
    registry.make_move(0, &alice(), 0, 0, 10).expect("valid move");
    let before = registry.game(0).expect("game");

    let result = registry.make_move(0, &alice(), 1, 0, 11);
    assert!(matches!(
        result,
        Err(RegistryError::WrongTurn {
            expected: Mark::O,
            ..
        })
    ));
    assert_eq!(registry.game(0).expect("game"), before);

    let receipt = registry.make_move(0, &bob(), 1, 0, 12).expect("bob's turn");
    assert_eq!(
        receipt.events(),
        &vec![GameEvent::MovePlayed {
            game_id: 0,
            mover: bob(),
            row: 1,
            col: 0,
        }]
    );
}

#[test]
fn test_opponent_cannot_open() {
    let registry = setup_game();
    let result = registry.make_move(0, &bob(), 1, 1, 10);
    assert!(matches!(result, Err(RegistryError::WrongTurn { .. })));
}

#[test]
fn test_move_before_accept_rejected() {
    let registry = GameRegistry::new(MemoryStore::new());
    registry.create_game(&alice(), 1).expect("create");

    let result = registry.make_move(0, &alice(), 1, 1, 2);
    assert_eq!(result, Err(RegistryError::OpponentNotSet(0)));

    let game = registry.game(0).expect("game");
    assert_eq!(game.board().occupied(), 0);
    assert_eq!(game.moves_left(), 9);
}

#[test]
fn test_stranger_cannot_move() {
    let registry = setup_game();
    let result = registry.make_move(0, &mallory(), 1, 1, 10);
    assert!(matches!(
        result,
        Err(RegistryError::UnauthorizedCaller { game_id: 0, .. })
    ));
}

#[test]
fn test_out_of_bounds_rejected() {
    let registry = setup_game();
    assert_eq!(
        registry.make_move(0, &alice(), 3, 0, 10),
        Err(RegistryError::OutOfBounds { row: 3, col: 0 })
    );
    assert_eq!(
        registry.make_move(0, &alice(), 0, 7, 10),
        Err(RegistryError::OutOfBounds { row: 0, col: 7 })
    );
}

#[test]
fn test_unknown_game_reported_first() {
    let registry = setup_game();
    assert_eq!(
        registry.make_move(9, &mallory(), 5, 5, 0),
        Err(RegistryError::GameNotFound(9))
    );
}

#[test]
fn test_turn_mark_must_not_regress() {
    let registry = setup_game();
    registry.make_move(0, &alice(), 0, 0, 10).expect("valid move");
    registry.make_move(0, &bob(), 1, 1, 11).expect("valid move");

    let result = registry.make_move(0, &alice(), 2, 2, 9);
    assert_eq!(
        result,
        Err(RegistryError::TurnMarkRegressed { given: 9, last: 10 })
    );

    // Equal marks are allowed: several calls can share one ledger height.
    registry.make_move(0, &alice(), 2, 2, 10).expect("same height");
}

#[test]
fn test_diagonal_win() {
    let registry = setup_game();
    let events = play(&registry, &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);

    assert_eq!(
        events.last(),
        Some(&GameEvent::GameWon {
            game_id: 0,
            winner: alice(),
            row: 2,
            col: 2,
        })
    );

    let game = registry.game(0).expect("game");
    assert!(game.is_finished());
    assert_eq!(game.winner(), Some(&alice()));
    assert_eq!(game.moves_left(), 4);
    assert_eq!(game.phase(), Phase::Finished);
}

#[test]
fn test_win_fires_on_completing_move_only() {
    let registry = setup_game();
    let moves = [(0, 0), (0, 1), (1, 1), (0, 2)];
    let events = play(&registry, &moves);

    assert!(
        events
            .iter()
            .all(|e| !matches!(e, GameEvent::GameWon { .. }))
    );
    assert!(!registry.game(0).expect("game").is_finished());
}

#[test]
fn test_opponent_can_win() {
    let registry = setup_game();
    // O takes the middle column.
    let events = play(&registry, &[(0, 0), (0, 1), (2, 2), (1, 1), (1, 0), (2, 1)]);

    assert_eq!(
        events.last(),
        Some(&GameEvent::GameWon {
            game_id: 0,
            winner: bob(),
            row: 2,
            col: 1,
        })
    );
    assert_eq!(registry.game(0).expect("game").winner(), Some(&bob()));
}

#[test]
fn test_no_moves_after_finish() {
    let registry = setup_game();
    play(&registry, &[(0, 0), (1, 0), (1, 1), (2, 0), (2, 2)]);
    let finished = registry.game(0).expect("game");

    let result = registry.make_move(0, &bob(), 0, 2, 20);
    assert_eq!(result, Err(RegistryError::GameFinished(0)));
    assert_eq!(registry.game(0).expect("game"), finished);
}

#[test]
fn test_draw() {
    let registry = setup_game();
    // X O X / X O O / O X X
    let events = play(
        &registry,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ],
    );

    assert_eq!(events.last(), Some(&GameEvent::GameDrawn { game_id: 0 }));
    assert!(
        events
            .iter()
            .all(|e| !matches!(e, GameEvent::GameWon { .. }))
    );

    let game = registry.game(0).expect("game");
    assert!(game.is_finished());
    assert_eq!(game.winner(), None);
    assert_eq!(game.moves_left(), 0);
}

#[test]
fn test_ninth_move_win_is_not_a_draw() {
    let registry = setup_game();
    // X O X / O X O / O X X: X completes the main diagonal on the last move.
    let events = play(
        &registry,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ],
    );

    assert!(matches!(events.last(), Some(GameEvent::GameWon { .. })));
    assert!(
        events
            .iter()
            .all(|e| !matches!(e, GameEvent::GameDrawn { .. }))
    );
    assert_eq!(registry.game(0).expect("game").winner(), Some(&alice()));
}

#[test]
fn test_games_are_independent() {
    let registry = setup_game();
    registry.create_game(&mallory(), 3).expect("create");

    registry.make_move(0, &alice(), 1, 1, 10).expect("valid move");
    assert_eq!(
        registry.make_move(1, &mallory(), 1, 1, 11),
        Err(RegistryError::OpponentNotSet(1))
    );

    let other = registry.game(1).expect("game");
    assert_eq!(other.board().occupied(), 0);
    assert_eq!(other.phase(), Phase::Open);
    assert_eq!(registry.game(0).expect("game").board().occupied(), 1);
}

#[test]
fn test_events_serialize_tagged() {
    let event = GameEvent::GameWon {
        game_id: 0,
        winner: alice(),
        row: 2,
        col: 2,
    };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(json["event"], "game_won");
    assert_eq!(json["winner"], "0xa11ce00000000000000000000000000000000001");
    assert_eq!(json["row"], 2);
}

#[test]
fn test_concurrent_creates_get_unique_ids() {
    let registry = GameRegistry::new(MemoryStore::new());

    let mut ids: Vec<u64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let registry = &registry;
                scope.spawn(move || {
                    (0..10u64)
                        .map(|i| {
                            *registry
                                .create_game(&alice(), t * 10 + i)
                                .expect("create")
                                .game_id()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    ids.sort_unstable();
    assert_eq!(ids, (0..80).collect::<Vec<u64>>());
    assert_eq!(registry.game_count().expect("count"), 80);
}

#[test]
fn test_racing_first_moves_admit_one() {
    let registry = setup_game();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = Position::ALL
            .into_iter()
            .take(8)
            .map(|pos| {
                let registry = &registry;
                scope.spawn(move || registry.make_move(0, &alice(), pos.row(), pos.col(), 10))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RegistryError::WrongTurn { expected: Mark::O, .. }))
    );
    let game = registry.game(0).expect("game");
    assert_eq!(game.board().occupied(), 1);
    assert_eq!(game.moves_left(), 8);
}

#[test]
fn test_receipt_events_carry_game_id() {
    let registry = setup_game();
    registry.create_game(&mallory(), 3).expect("create");
    registry.accept_game(1, &bob(), 4).expect("accept");

    let events = registry
        .make_move(1, &mallory(), 0, 0, 5)
        .expect("valid move")
        .into_events();
    assert!(events.iter().all(|e| e.game_id() == 1));

    let game = registry.game(1).expect("game");
    assert_eq!(game.seat(Mark::X), Some(&mallory()));
    assert_eq!(game.seat(Mark::O), Some(&bob()));
}
