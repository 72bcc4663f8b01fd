//! Game loop implementation
//!
//! Drives a game from allegiance choice through Prep / Resolution rounds to
//! a result. The rules live in `round`, `resolution` and friends; this module
//! owns sequencing, the round limit and controller notification.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating the format! allocations for board summaries nobody reads.
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.log_verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

use crate::core::{Alignment, Side, SEAL_COUNT};
use crate::game::board::{BoardAccess, Table};
use crate::game::controller::PlayerController;
use crate::game::{round, scoring, Decision, GameState, Response, StateObserver};
use crate::{Result, SealsError};
use serde::Serialize;
use std::fmt;

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - round banners and the outcome
    Minimal = 1,
    /// Normal - reveals, battles, influence changes (default)
    #[default]
    Normal = 2,
    /// Verbose - initiative, steps and decision details
    Verbose = 3,
}

/// Reason the game ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEndReason {
    /// A side reached the configured seal majority
    Majority,
    /// A card's own win condition fired (Saint Michael, The Spinner)
    CardVictory(&'static str),
    /// Round limit reached; decided on seal count
    RoundLimit,
    /// Both decks ran out; decided on seal count
    DecksExhausted,
}

impl fmt::Display for GameEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEndReason::Majority => write!(f, "seal majority"),
            GameEndReason::CardVictory(card) => write!(f, "{card}"),
            GameEndReason::RoundLimit => write!(f, "round limit"),
            GameEndReason::DecksExhausted => write!(f, "decks exhausted"),
        }
    }
}

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Winner of the game (None for a draw)
    pub winner: Option<Side>,
    /// Rounds started, including the one in which the game ended
    pub rounds_played: u32,
    /// Reason the game ended
    pub end_reason: GameEndReason,
    /// Final seal count per side, indexed by `Side::index()`
    pub seals: [usize; 2],
    /// Allegiance per side, indexed by `Side::index()`
    pub allegiance: [Alignment; 2],
}

impl GameResult {
    /// Side holding `alignment` that won, if any
    pub fn winning_alignment(&self) -> Option<Alignment> {
        self.winner.map(|side| self.allegiance[side.index()])
    }
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    /// Verbosity level for output (cached from game.logger)
    pub verbosity: VerbosityLevel,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state
    pub fn new(game: &'a mut GameState) -> Self {
        let verbosity = game.logger.verbosity();
        GameLoop { game, verbosity }
    }

    /// Rounds before the game is decided on seal count
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.game.config.rounds = rounds.max(1);
        self
    }

    /// Set verbosity level for output
    ///
    /// This sets the verbosity on both the game loop and the game's centralized logger,
    /// which is accessed by controllers via GameStateView.
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Run the game with the given player controllers
    ///
    /// Returns when a side wins or the round limit decides the game
    pub fn run_game(
        &mut self,
        player: &mut dyn PlayerController,
        enemy: &mut dyn PlayerController,
    ) -> Result<GameResult> {
        check_seats(player, enemy)?;
        let mut table = Table::new(&mut *self.game, player, enemy);
        let result = play(&mut table, self.verbosity)?;
        table.notify_game_end();
        Ok(result)
    }

    /// Like `run_game`, publishing a snapshot to `observer` after every mutation
    pub fn run_game_observed(
        &mut self,
        player: &mut dyn PlayerController,
        enemy: &mut dyn PlayerController,
        observer: &mut dyn StateObserver,
    ) -> Result<GameResult> {
        check_seats(player, enemy)?;
        let mut table = Table::new(&mut *self.game, player, enemy).with_observer(observer);
        table.publish();
        let result = play(&mut table, self.verbosity)?;
        table.notify_game_end();
        Ok(result)
    }
}

fn check_seats(player: &dyn PlayerController, enemy: &dyn PlayerController) -> Result<()> {
    if player.side() != Side::Player || enemy.side() != Side::Enemy {
        return Err(SealsError::InvalidState(
            "controller seats don't match the Player and Enemy sides".to_string(),
        ));
    }
    Ok(())
}

/// Ask for the Player's allegiance if needed and build both decks
fn setup(table: &mut Table) -> Result<()> {
    if table.allegiance(Side::Player) == Alignment::Neutral {
        let choice = match table.request(Side::Player, Decision::ChooseAlignment) {
            Response::Alignment(alignment) => alignment,
            _ => Alignment::Light,
        };
        table.game.set_allegiance(choice)?;
    }
    table.game.logger.minimal(&format!(
        "Player fights for the {}; Enemy for the {}",
        table.allegiance(Side::Player),
        table.allegiance(Side::Enemy)
    ));
    if Side::BOTH.iter().all(|side| table.board(*side).deck.is_empty()) {
        table.game.load_decks();
    }
    table.publish();
    Ok(())
}

fn play(table: &mut Table, verbosity: VerbosityLevel) -> Result<GameResult> {
    setup(table)?;
    let rounds = table.game.config.rounds;
    while !table.is_over() {
        round::run_prep(table)?;
        if table.is_over() {
            break;
        }
        round::run_resolution(table)?;
        if table.is_over() {
            break;
        }
        round::end_of_round(table)?;
        if verbosity >= VerbosityLevel::Verbose {
            summarize_round(table);
        }
        if !table.is_over() && table.game.round >= rounds {
            scoring::finalize(table, GameEndReason::RoundLimit);
        }
    }
    result_of(table.game())
}

/// One line per seal plus the score, at verbose level
fn summarize_round(table: &Table) {
    for idx in 0..SEAL_COUNT {
        let seal = table.seal(idx);
        let champion = seal
            .champion
            .map(|id| table.card_name(id))
            .unwrap_or("-");
        log_if_verbose!(
            table,
            "Seal {}: {}, champion {champion}",
            idx + 1,
            seal.alignment
        );
    }
    log_if_verbose!(
        table,
        "Score after round {}: Player {} - Enemy {}",
        table.game.round,
        table.seal_count(Side::Player),
        table.seal_count(Side::Enemy)
    );
}

fn result_of(game: &GameState) -> Result<GameResult> {
    let outcome = game
        .outcome
        .clone()
        .ok_or_else(|| SealsError::InvalidState("game loop exited without an outcome".to_string()))?;
    Ok(GameResult {
        winner: outcome.winner,
        rounds_played: game.round,
        end_reason: outcome.reason,
        seals: [game.seal_count(Side::Player), game.seal_count(Side::Enemy)],
        allegiance: game.allegiance,
    })
}
