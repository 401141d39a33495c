//! Integration tests for HEXCLAIM
//!
//! Tests the full stack through the public API: setup, human turns,
//! automated turns on a scheduler, scoring and configuration files.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use hexclaim_core::{
    choose_direction, fair_spawn_points, hex_region, Board, Color, Direction, Game, GameConfig,
    GameError, Hex, ManualScheduler, PacingConfig, Phase, Rotation, SpawnMode, TileState,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn shared_scheduler() -> Rc<RefCell<ManualScheduler>> {
    Rc::new(RefCell::new(ManualScheduler::new()))
}

fn open_board_config(humans: usize, bots: usize, radius: u32, seed: u64) -> GameConfig {
    GameConfig {
        humans,
        bots,
        radius,
        wall_density: 0.0,
        seed: Some(seed),
        ..Default::default()
    }
}

// ============================================================================
// SETUP TESTS
// ============================================================================

#[test]
fn test_board_sizes() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for radius in 0..=3u32 {
        let r = radius as usize;
        let board = Board::new(radius, 0.0, &mut rng);
        assert_eq!(board.len(), 3 * r * r + 3 * r + 1);
    }
}

#[test]
fn test_six_players_get_distinct_colors_and_corners() {
    let game = Game::new(open_board_config(2, 4, 3, 21)).unwrap();
    assert_eq!(game.players().len(), 6);

    let colors: HashSet<Color> = game.players().iter().map(|p| p.color()).collect();
    assert_eq!(colors.len(), 6);

    for (player, hex) in game.players().iter().zip(fair_spawn_points(6, 3)) {
        assert_eq!(game.board().state(hex), Some(TileState::Owned(player.color())));
    }
}

#[test]
fn test_player_counts_are_clamped() {
    let game = Game::new(open_board_config(0, 0, 2, 1)).unwrap();
    assert_eq!(game.players().len(), 1);
    assert!(game.players()[0].is_automated());

    let game = Game::new(open_board_config(4, 10, 3, 1)).unwrap();
    assert_eq!(game.players().len(), 6);
    assert_eq!(game.players().iter().filter(|p| p.is_human()).count(), 4);
}

#[test]
fn test_fair_three_player_layout() {
    let game = Game::new(open_board_config(3, 0, 2, 2)).unwrap();
    let expected = [Hex::new(0, -2), Hex::new(2, 0), Hex::new(-2, 2)];
    for (player, hex) in game.players().iter().zip(expected) {
        assert_eq!(game.board().state(hex), Some(TileState::Owned(player.color())));
    }
}

// ============================================================================
// TURN TESTS
// ============================================================================

#[test]
fn test_human_turns_alternate() {
    let mut game = Game::new(open_board_config(2, 0, 2, 5)).unwrap();
    assert_eq!(game.active_index(), 0);

    // Player one sits at the North corner; South is legal
    for _ in 0..3 {
        assert!(game.human_input(Rotation::Clockwise));
    }
    let report = game.human_select().unwrap().unwrap();
    assert_eq!(report.direction, Direction::South);
    assert_eq!(game.active_index(), 1);

    // Player two's selector was untouched
    assert_eq!(game.active_selector().direction(), Direction::North);
    assert_eq!(game.selectors()[0].direction(), Direction::South);
}

#[test]
fn test_captured_tiles_never_revert() {
    let config = GameConfig {
        pacing: PacingConfig::instant(),
        ..open_board_config(0, 4, 3, 77)
    };
    let mut game = Game::new(config).unwrap();

    let mut owners: Vec<(Hex, Color)> = Vec::new();
    while !game.is_over() {
        game.run_automated_turn().unwrap();
        for (hex, color) in &owners {
            assert_eq!(game.board().state(*hex), Some(TileState::Owned(*color)));
        }
        owners = game
            .board()
            .tiles()
            .filter_map(|t| t.state.owner().map(|c| (t.hex, c)))
            .collect();
    }
}

#[test]
fn test_bot_turn_uses_one_timer_per_turn() {
    let scheduler = shared_scheduler();
    let config = open_board_config(0, 3, 3, 31);
    let mut game = Game::with_scheduler(config, Box::new(scheduler.clone())).unwrap();

    assert_eq!(scheduler.borrow().started(), 1);
    assert_eq!(scheduler.borrow().active().len(), 1);

    let mut ticks = 0;
    while !game.is_over() {
        game.tick().unwrap();
        ticks += 1;
        assert!(scheduler.borrow().active().len() <= 1);
        assert!(ticks < 100_000, "game never finished");
    }

    let scheduler = scheduler.borrow();
    assert_eq!(scheduler.started() as u32, game.turns());
    assert_eq!(scheduler.cancelled() as u32, game.turns());
    assert!(scheduler.active().is_empty());
    // default pacing never commits on the first tick
    assert!(ticks > game.turns() as usize);
}

#[test]
fn test_timer_interval_follows_pacing() {
    let scheduler = shared_scheduler();
    let config = GameConfig {
        pacing: PacingConfig {
            tick_interval_ms: 40,
            ..PacingConfig::default()
        },
        ..open_board_config(0, 2, 2, 8)
    };
    let _game = Game::with_scheduler(config, Box::new(scheduler.clone())).unwrap();

    let active = scheduler.borrow().active().to_vec();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].1.as_millis(), 40);
}

#[test]
fn test_driver_commits_chosen_direction() {
    let config = open_board_config(0, 2, 3, 13);
    let mut game = Game::new(config).unwrap();

    let target = game.driver().unwrap().target();
    let player = game.active_player().color();
    let report = game.run_automated_turn().unwrap().unwrap();
    assert_eq!(report.player, player);
    assert_eq!(report.direction, target);
    assert_eq!(game.selectors()[0].direction(), target);
}

#[test]
fn test_human_input_ignored_on_bot_turn() {
    let mut game = Game::new(open_board_config(1, 1, 2, 4)).unwrap();
    // South from the North corner
    for _ in 0..3 {
        game.human_input(Rotation::Clockwise);
    }
    game.human_select().unwrap().unwrap();
    assert!(game.active_player().is_automated());

    let before = game.selectors()[1].direction();
    assert!(!game.human_input(Rotation::Clockwise));
    assert_eq!(game.human_select().unwrap(), None);
    assert_eq!(game.selectors()[1].direction(), before);
    assert_eq!(game.turns(), 1);
}

#[test]
fn test_full_game_scoring() {
    let config = GameConfig {
        pacing: PacingConfig::instant(),
        ..open_board_config(0, 5, 4, 2024)
    };
    let mut game = Game::new(config).unwrap();
    while !game.is_over() {
        game.run_automated_turn().unwrap();
    }

    assert_eq!(game.phase(), Phase::GameOver);
    let summary = game.summary().unwrap();
    let total: usize = summary.scores.iter().map(|s| s.tiles).sum();
    assert_eq!(total, hex_region(4).count());
    for score in &summary.scores {
        assert_eq!(score.tiles, game.board().num_tiles_owned_by(score.player.color()));
    }
    assert!(summary.to_string().starts_with("Game over! CPU "));
}

#[test]
fn test_walls_stay_walls() {
    let config = GameConfig {
        wall_density: 0.3,
        spawn_mode: SpawnMode::Random,
        pacing: PacingConfig::instant(),
        ..open_board_config(0, 3, 4, 55)
    };
    let mut game = Game::new(config).unwrap();
    let walls: Vec<Hex> = game
        .board()
        .tiles()
        .filter(|t| t.state == TileState::Wall)
        .map(|t| t.hex)
        .collect();

    while !game.is_over() {
        game.run_automated_turn().unwrap();
    }
    for hex in walls {
        assert_eq!(game.board().state(hex), Some(TileState::Wall));
    }
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig {
        wall_density: 0.2,
        pacing: PacingConfig::instant(),
        ..open_board_config(0, 4, 3, 404)
    };

    let play = || {
        let mut game = Game::new(config.clone()).unwrap();
        let mut reports = Vec::new();
        while !game.is_over() {
            if let Some(report) = game.run_automated_turn().unwrap() {
                reports.push(report);
            }
        }
        reports
    };
    assert_eq!(play(), play());
}

// ============================================================================
// POLICY TESTS
// ============================================================================

#[test]
fn test_policy_never_picks_zero_weight() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let weights = [
        (Direction::North, 0),
        (Direction::NorthEast, 0),
        (Direction::SouthEast, 4),
        (Direction::South, 0),
        (Direction::SouthWest, 0),
        (Direction::NorthWest, 0),
    ];
    for _ in 0..1000 {
        assert_eq!(choose_direction(&weights, &mut rng), Some(Direction::SouthEast));
    }
}

// ============================================================================
// CONFIGURATION TESTS
// ============================================================================

#[test]
fn test_config_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("hexclaim-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("game.json");

    let config = GameConfig {
        favorite_color: Color::Purple,
        spawn_mode: SpawnMode::Random,
        ..open_board_config(1, 2, 6, 1234)
    };
    config.save(&path).unwrap();
    let loaded = GameConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    std::fs::write(&path, r#"{"spawn_mode": "scatter"}"#).unwrap();
    assert!(GameConfig::load(&path).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_unknown_spawn_mode() {
    assert_eq!(
        "ring".parse::<SpawnMode>(),
        Err(GameError::UnknownSpawnMode("ring".to_string()))
    );
}
