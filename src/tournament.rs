//! Tournament mode for running many AI-vs-AI games in parallel
//!
//! Games are independent, so they run on rayon's pool with per-game seeds
//! derived from a master seed. The same master seed always yields the same
//! report.

use crate::config::GameConfig;
use crate::core::{Alignment, Side};
use crate::game::{
    GameEndReason, GameLoop, GameResult, GameState, HeuristicController, PlayerController,
    RandomController, VerbosityLevel, ZeroController,
};
use crate::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Controller type for tournament games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum ControllerType {
    Zero,
    Random,
    Heuristic,
}

impl ControllerType {
    pub fn build(self, side: Side, seed: u64) -> Box<dyn PlayerController + Send> {
        match self {
            ControllerType::Zero => Box::new(ZeroController::new(side)),
            ControllerType::Random => Box::new(RandomController::with_seed(side, seed)),
            ControllerType::Heuristic => Box::new(HeuristicController::with_seed(side, seed)),
        }
    }
}

/// Aggregate results of a tournament
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TourneyReport {
    pub games: usize,
    pub player_wins: usize,
    pub enemy_wins: usize,
    pub light_wins: usize,
    pub dark_wins: usize,
    pub draws: usize,
    /// Games ended by a seal majority or a card's own win condition
    pub early_finishes: usize,
    pub failed: usize,
    pub average_rounds: f64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl TourneyReport {
    fn record(&mut self, result: &GameResult) {
        self.games += 1;
        match result.winner {
            Some(Side::Player) => self.player_wins += 1,
            Some(Side::Enemy) => self.enemy_wins += 1,
            None => self.draws += 1,
        }
        match result.winning_alignment() {
            Some(Alignment::Light) => self.light_wins += 1,
            Some(Alignment::Dark) => self.dark_wins += 1,
            _ => {}
        }
        if matches!(
            result.end_reason,
            GameEndReason::Majority | GameEndReason::CardVictory(_)
        ) {
            self.early_finishes += 1;
        }
    }

    fn percent(&self, count: usize) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.games as f64
        }
    }

    pub fn print(&self) {
        println!("\n=== Tournament Complete ===");
        println!("Total games played: {}", self.games);
        if self.failed > 0 {
            println!("Failed games: {}", self.failed);
        }
        println!("Elapsed time: {:.2}s", self.elapsed.as_secs_f64());
        if self.elapsed.as_secs_f64() > 0.0 {
            println!(
                "Games per second: {:.2}",
                self.games as f64 / self.elapsed.as_secs_f64()
            );
        }
        println!("\n=== Seat Statistics ===");
        println!("Player wins: {} ({:.1}%)", self.player_wins, self.percent(self.player_wins));
        println!("Enemy wins: {} ({:.1}%)", self.enemy_wins, self.percent(self.enemy_wins));
        println!("Draws: {} ({:.1}%)", self.draws, self.percent(self.draws));
        println!("\n=== Allegiance Statistics ===");
        println!("Light wins: {} ({:.1}%)", self.light_wins, self.percent(self.light_wins));
        println!("Dark wins: {} ({:.1}%)", self.dark_wins, self.percent(self.dark_wins));
        println!(
            "\nEarly finishes: {} ({:.1}%), average rounds {:.2}",
            self.early_finishes,
            self.percent(self.early_finishes),
            self.average_rounds
        );
    }
}

/// Seed of game `index` under `master`
pub fn game_seed(master: u64, index: usize) -> u64 {
    master.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play one silent game
pub fn play_one(
    config: &GameConfig,
    p1: ControllerType,
    p2: ControllerType,
    seed: u64,
) -> Result<GameResult> {
    let mut game = GameState::new(config.clone().with_seed(seed));
    let mut player = p1.build(Side::Player, seed.wrapping_add(0x1234_5678_9ABC_DEF0));
    let mut enemy = p2.build(Side::Enemy, seed.wrapping_add(0xFEDC_BA98_7654_3210));
    GameLoop::new(&mut game)
        .with_verbosity(VerbosityLevel::Silent)
        .run_game(&mut *player, &mut *enemy)
}

/// Run `games` games in parallel and aggregate the results
pub fn run_tourney(
    games: usize,
    p1: ControllerType,
    p2: ControllerType,
    seed: u64,
    config: &GameConfig,
) -> Result<TourneyReport> {
    config.validate()?;
    let start = Instant::now();

    let results: Vec<Result<GameResult>> = (0..games)
        .into_par_iter()
        .map(|index| play_one(config, p1, p2, game_seed(seed, index)))
        .collect();

    let mut report = TourneyReport::default();
    let mut total_rounds = 0u64;
    for (index, result) in results.iter().enumerate() {
        match result {
            Ok(result) => {
                total_rounds += u64::from(result.rounds_played);
                report.record(result);
            }
            Err(e) => {
                eprintln!("Warning: Game {index} failed: {e}");
                report.failed += 1;
            }
        }
    }
    if report.games > 0 {
        report.average_rounds = total_rounds as f64 / report.games as f64;
    }
    report.elapsed = start.elapsed();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tourney_counts_add_up() {
        let config = GameConfig::default();
        let report = run_tourney(12, ControllerType::Heuristic, ControllerType::Random, 5, &config)
            .unwrap();
        assert_eq!(report.games + report.failed, 12);
        assert_eq!(report.failed, 0);
        assert_eq!(report.player_wins + report.enemy_wins + report.draws, 12);
        assert_eq!(report.light_wins + report.dark_wins + report.draws, 12);
        assert!(report.average_rounds >= 1.0 && report.average_rounds <= 3.0);
    }

    #[test]
    fn test_tourney_is_deterministic() {
        let config = GameConfig::default();
        let a = run_tourney(6, ControllerType::Heuristic, ControllerType::Heuristic, 77, &config)
            .unwrap();
        let b = run_tourney(6, ControllerType::Heuristic, ControllerType::Heuristic, 77, &config)
            .unwrap();
        assert_eq!(
            (a.player_wins, a.enemy_wins, a.draws, a.average_rounds),
            (b.player_wins, b.enemy_wins, b.draws, b.average_rounds)
        );
    }
}
