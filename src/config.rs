//! Game configuration
//!
//! Loaded from JSON (every field optional) and overridden by CLI flags.

use crate::core::SEAL_COUNT;
use crate::{Result, SealsError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds before the game is decided on seal count
    pub rounds: u32,
    /// Cards drawn into hand each Prep
    pub hand_size: usize,
    /// Seal count that wins immediately
    pub majority: usize,
    /// Log entries kept for the state snapshot
    pub log_capacity: usize,
    /// RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Copies of each Avatar and God in a deck
    pub unique_copies: usize,
    /// Copies of every other card in a deck
    pub creature_copies: usize,
    /// Illegal answers tolerated before a decision is treated as declined
    pub max_invalid_responses: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rounds: 3,
            hand_size: 8,
            majority: 4,
            log_capacity: 50,
            seed: None,
            unique_copies: 1,
            creature_copies: 3,
            max_invalid_responses: 8,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load from a JSON file and validate
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(SealsError::InvalidConfig("rounds must be at least 1".to_string()));
        }
        if self.majority == 0 || self.majority > SEAL_COUNT {
            return Err(SealsError::InvalidConfig(format!(
                "majority must be between 1 and {SEAL_COUNT}, got {}",
                self.majority
            )));
        }
        if self.log_capacity == 0 {
            return Err(SealsError::InvalidConfig("log_capacity must be positive".to_string()));
        }
        if self.unique_copies == 0 && self.creature_copies == 0 {
            return Err(SealsError::InvalidConfig("decks would be empty".to_string()));
        }
        Ok(())
    }
}
