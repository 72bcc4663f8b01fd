//! Performance benchmarks for the Seven Seals engine
//!
//! Two iteration modes:
//!
//! 1. **Fresh** - Build a new game (decks and shuffle) for each iteration
//! 2. **Snapshot** - Clone a prepared game state each iteration
//!
//! Both play HeuristicController against HeuristicController with all output
//! silenced.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seven_seals::{
    config::GameConfig,
    core::{Alignment, Side},
    game::{
        GameLoop, GameResult, GameState, HeuristicController, OutputMode, RandomController,
        VerbosityLevel,
    },
    Result,
};
use std::time::Duration;

/// Metrics collected during game execution
#[derive(Debug, Clone)]
struct GameMetrics {
    rounds: u32,
    /// Decisions put to either seat
    decisions: u64,
    duration: Duration,
}

impl GameMetrics {
    fn games_per_sec(&self) -> f64 {
        1.0 / self.duration.as_secs_f64()
    }

    fn decisions_per_sec(&self) -> f64 {
        self.decisions as f64 / self.duration.as_secs_f64()
    }

    fn decisions_per_round(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.decisions as f64 / self.rounds as f64
        }
    }
}

fn silent_game(seed: u64) -> GameState {
    let mut game = GameState::new(GameConfig::default().with_seed(seed));
    game.logger.set_output_mode(OutputMode::Memory);
    game.logger.set_verbosity(VerbosityLevel::Silent);
    game
}

fn play(game: &mut GameState, seed: u64) -> Result<GameResult> {
    let mut player = HeuristicController::with_seed(Side::Player, seed);
    let mut enemy = HeuristicController::with_seed(Side::Enemy, seed + 1);
    GameLoop::new(game)
        .with_verbosity(VerbosityLevel::Silent)
        .run_game(&mut player, &mut enemy)
}

/// Run a single game and collect metrics
fn run_game_with_metrics(seed: u64) -> Result<GameMetrics> {
    let start = std::time::Instant::now();
    let mut game = silent_game(seed);
    let result = play(&mut game, seed)?;
    Ok(GameMetrics {
        rounds: result.rounds_played,
        decisions: game.decisions_asked,
        duration: start.elapsed(),
    })
}

/// Benchmark: Fresh mode - build a new game each iteration
fn bench_game_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    let seed = 42u64;
    println!("\nWarmup game (seed {}):", seed);
    if let Ok(metrics) = run_game_with_metrics(seed) {
        println!("  Rounds: {}", metrics.rounds);
        println!("  Decisions: {}", metrics.decisions);
        println!("  Duration: {:?}", metrics.duration);
        println!("  Games/sec: {:.2}", metrics.games_per_sec());
        println!("  Decisions/sec: {:.2}", metrics.decisions_per_sec());
        println!("  Decisions/round: {:.2}", metrics.decisions_per_round());
    }

    group.bench_with_input(BenchmarkId::new("fresh", seed), &seed, |b, &seed| {
        b.iter(|| run_game_with_metrics(black_box(seed)).expect("Game should complete successfully"));
    });

    group.finish();
}

/// Benchmark: Snapshot mode - clone a prepared state each iteration
fn bench_game_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    let seed = 42u64;
    let mut initial_game = silent_game(seed);
    initial_game
        .set_allegiance(Alignment::Light)
        .expect("Light is a valid allegiance");
    initial_game.load_decks();

    group.bench_function(BenchmarkId::new("snapshot", seed), |b| {
        b.iter(|| {
            let mut game = initial_game.clone();
            play(&mut game, black_box(seed)).expect("Game should complete successfully")
        });
    });

    group.finish();
}

/// Benchmark: a tournament-sized batch with random seats
fn bench_random_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");
    group.sample_size(20);

    group.bench_function("random_batch_100", |b| {
        b.iter(|| {
            for seed in 0..100u64 {
                let mut game = silent_game(seed);
                let mut player = RandomController::with_seed(Side::Player, seed);
                let mut enemy = RandomController::with_seed(Side::Enemy, seed + 1);
                GameLoop::new(&mut game)
                    .run_game(&mut player, &mut enemy)
                    .expect("Game should complete successfully");
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_game_fresh,
    bench_game_snapshot,
    bench_random_batch
);
criterion_main!(benches);
