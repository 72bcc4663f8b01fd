//! Self-contained `BoardAccess` for driving rules code directly
//!
//! Owns its state and both controllers, so a test or a tool can put cards
//! exactly where it wants and call a single rule (one battle, one seal, one
//! ability) without running a whole game.

use crate::config::GameConfig;
use crate::core::{catalog, Alignment, CardId, Location, SealIndex, Side};
use crate::game::{
    BoardAccess, Decision, GameState, PlayerController, Response, Table, ZeroController,
};
use crate::{Result, SealsError};

pub struct Sandbox {
    pub game: GameState,
    controllers: [Box<dyn PlayerController>; 2],
}

impl Sandbox {
    /// Empty seeded table; the Player has `player` allegiance and both seats
    /// take the first legal option
    pub fn new(player: Alignment) -> Self {
        Self::with_config(player, GameConfig::default().with_seed(0))
    }

    pub fn with_config(player: Alignment, config: GameConfig) -> Self {
        let mut game = GameState::new(config);
        // Neutral falls back to Light so the table is always playable
        let choice = match player {
            Alignment::Neutral => Alignment::Light,
            other => other,
        };
        game.allegiance = [choice, choice.opposite()];
        Sandbox {
            game,
            controllers: [
                Box::new(ZeroController::new(Side::Player)),
                Box::new(ZeroController::new(Side::Enemy)),
            ],
        }
    }

    pub fn with_controllers(
        mut self,
        player: Box<dyn PlayerController>,
        enemy: Box<dyn PlayerController>,
    ) -> Self {
        self.controllers = [player, enemy];
        self
    }

    /// Spawn a catalog card at `location`
    pub fn spawn(&mut self, name: &str, owner: Side, location: Location) -> Result<CardId> {
        let def = catalog::lookup(name)
            .ok_or_else(|| SealsError::InvalidState(format!("unknown card '{name}'")))?;
        self.game.spawn_card(def, owner, location)
    }

    /// Face-down card in `side`'s battlefield slot
    pub fn place(&mut self, name: &str, side: Side, idx: SealIndex) -> Result<CardId> {
        self.spawn(name, side, Location::Battlefield(side, idx))
    }

    /// Face-up champion on a seal
    pub fn place_champion(&mut self, name: &str, owner: Side, idx: SealIndex) -> Result<CardId> {
        let id = self.spawn(name, owner, Location::Champion(idx))?;
        self.game.card_mut(id)?.face_up = true;
        Ok(id)
    }

    pub fn put_in_limbo(&mut self, name: &str, owner: Side) -> Result<CardId> {
        self.spawn(name, owner, Location::Limbo(owner))
    }
}

impl BoardAccess for Sandbox {
    fn game(&self) -> &GameState {
        &self.game
    }

    fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    fn request(&mut self, side: Side, decision: Decision) -> Response {
        let [player, enemy] = &mut self.controllers;
        Table::new(&mut self.game, player.as_mut(), enemy.as_mut()).request(side, decision)
    }
}
