//! End-to-end games between AI seats

use seven_seals::config::GameConfig;
use seven_seals::core::{Alignment, Side, SEAL_COUNT};
use seven_seals::game::{
    GameEndReason, GameLoop, GameResult, GameSnapshot, GameState, HeuristicController,
    OutputMode, Phase, PlayerController, RandomController, VerbosityLevel,
};

fn quiet_game(seed: u64) -> GameState {
    let mut game = GameState::new(GameConfig::default().with_seed(seed));
    game.logger.set_output_mode(OutputMode::Memory);
    game.logger.set_verbosity(VerbosityLevel::Silent);
    game
}

fn play(
    game: &mut GameState,
    player: &mut dyn PlayerController,
    enemy: &mut dyn PlayerController,
) -> GameResult {
    GameLoop::new(game)
        .with_verbosity(VerbosityLevel::Silent)
        .run_game(player, enemy)
        .unwrap()
}

fn assert_consistent(game: &GameState, result: &GameResult) {
    assert!(game.outcome.is_some());
    assert!(result.rounds_played >= 1 && result.rounds_played <= game.config.rounds);
    assert_eq!(result.seals[0], game.seal_count(Side::Player));
    assert_eq!(result.seals[1], game.seal_count(Side::Enemy));
    assert!(result.seals[0] + result.seals[1] <= SEAL_COUNT);
    assert_ne!(result.allegiance[0], result.allegiance[1]);

    match result.end_reason {
        GameEndReason::Majority => {
            let winner = result.winner.expect("majority always has a winner");
            assert!(result.seals[winner.index()] >= game.config.majority);
        }
        GameEndReason::RoundLimit | GameEndReason::DecksExhausted => match result.winner {
            Some(winner) => {
                let loser = winner.opponent();
                assert!(result.seals[winner.index()] > result.seals[loser.index()]);
            }
            None => assert_eq!(result.seals[0], result.seals[1]),
        },
        GameEndReason::CardVictory(_) => assert!(result.winner.is_some()),
    }
}

#[test]
fn test_heuristic_mirror_finishes() {
    for seed in [1, 7, 42, 1234] {
        let mut game = quiet_game(seed);
        let mut player = HeuristicController::with_seed(Side::Player, seed + 1);
        let mut enemy = HeuristicController::with_seed(Side::Enemy, seed + 2);
        let result = play(&mut game, &mut player, &mut enemy);
        assert_consistent(&game, &result);
    }
}

#[test]
fn test_random_against_heuristic_finishes() {
    for seed in 0..8 {
        let mut game = quiet_game(seed);
        let mut player = RandomController::with_seed(Side::Player, seed * 3);
        let mut enemy = HeuristicController::with_seed(Side::Enemy, seed * 5);
        let result = play(&mut game, &mut player, &mut enemy);
        assert_consistent(&game, &result);
        assert!(game.pending.is_none());
    }
}

#[test]
fn test_same_seed_replays_identically() {
    let run = |seed: u64| {
        let mut game = quiet_game(seed);
        let mut player = HeuristicController::with_seed(Side::Player, 100);
        let mut enemy = RandomController::with_seed(Side::Enemy, 200);
        let result = play(&mut game, &mut player, &mut enemy);
        (result, game.logger.history())
    };

    let (first, first_log) = run(77);
    let (second, second_log) = run(77);
    assert_eq!(first, second);
    similar_asserts::assert_eq!(first_log, second_log);
}

#[test]
fn test_player_allegiance_choice_is_respected() {
    let mut game = quiet_game(5);
    game.set_allegiance(Alignment::Dark).unwrap();
    let mut player = HeuristicController::with_seed(Side::Player, 1);
    let mut enemy = HeuristicController::with_seed(Side::Enemy, 2);
    let result = play(&mut game, &mut player, &mut enemy);
    assert_eq!(result.allegiance, [Alignment::Dark, Alignment::Light]);
    assert_consistent(&game, &result);
}

#[test]
fn test_observer_tracks_whole_game() {
    let mut game = quiet_game(31);
    let mut player = HeuristicController::with_seed(Side::Player, 3);
    let mut enemy = HeuristicController::with_seed(Side::Enemy, 4);
    let mut snapshots: Vec<GameSnapshot> = Vec::new();
    let mut observer = |snapshot: &GameSnapshot| snapshots.push(snapshot.clone());

    let result = GameLoop::new(&mut game)
        .run_game_observed(&mut player, &mut enemy, &mut observer)
        .unwrap();

    assert!(snapshots.iter().any(|s| s.phase == Phase::Prep));
    assert!(snapshots.iter().any(|s| s.phase == Phase::Resolution));
    // Decision serials never go backwards
    assert!(snapshots
        .windows(2)
        .all(|pair| pair[0].decision_seq <= pair[1].decision_seq));
    // The player's view never shows the enemy hand
    assert!(snapshots.iter().all(|s| s.side(Side::Enemy).hand.is_empty()));

    let last = snapshots.last().unwrap();
    assert!(last.is_game_over());
    assert_eq!(last.side(Side::Player).score, result.seals[0]);
    assert_eq!(last.side(Side::Enemy).score, result.seals[1]);
}
