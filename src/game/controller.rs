//! Player controller trait and game state view
//!
//! This module defines the interface between the engine and the decision
//! drivers (AI or human). The engine calls the controller whenever a
//! `Decision` is pending for its side; the controller inspects a read-only
//! view of the game and answers. The engine never asks which kind of driver
//! it is talking to.

use crate::core::{Alignment, CardId, CardInstance, MarkerKind, SealIndex, Side};
use crate::game::{
    AllocationRequest, ConfirmRequest, GameLogger, GameState, Phase, PrepAction, PrepRequest,
    Seal, SealRequest, TargetRequest,
};

/// Read-only view of the game from one side's seat
///
/// Face-down cards of the other side are hidden: the view reports them as
/// present but exposes neither name nor power.
pub struct GameStateView<'a> {
    game: &'a GameState,
    side: Side,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, side: Side) -> Self {
        GameStateView { game, side }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn allegiance(&self) -> Alignment {
        self.game.allegiance(self.side)
    }

    pub fn round(&self) -> u32 {
        self.game.round
    }

    pub fn phase(&self) -> Phase {
        self.game.phase
    }

    pub fn current_seal(&self) -> Option<SealIndex> {
        self.game.current_seal
    }

    pub fn logger(&self) -> &GameLogger {
        &self.game.logger
    }

    /// Whether this seat may see the card's face
    pub fn is_visible(&self, id: CardId) -> bool {
        self.game
            .card(id)
            .map(|c| c.owner == self.side || c.face_up)
            .unwrap_or(false)
    }

    /// The card, if it exists and is visible from this seat
    pub fn card(&self, id: CardId) -> Option<&'a CardInstance> {
        let game: &'a GameState = self.game;
        game.card(id).ok().filter(|c| c.owner == self.side || c.face_up)
    }

    pub fn owner(&self, id: CardId) -> Option<Side> {
        self.game.card(id).ok().map(|c| c.owner)
    }

    pub fn card_name(&self, id: CardId) -> String {
        match self.card(id) {
            Some(card) => card.name().to_string(),
            None if self.game.cards.contains(id) => "face-down card".to_string(),
            None => format!("card {id}"),
        }
    }

    pub fn effective_power(&self, id: CardId) -> Option<i32> {
        self.card(id).map(|c| c.effective_power())
    }

    pub fn hand(&self) -> &[CardId] {
        &self.game.board(self.side).hand.cards
    }

    pub fn limbo(&self, side: Side) -> &[CardId] {
        &self.game.board(side).limbo.cards
    }

    pub fn graveyard_len(&self, side: Side) -> usize {
        self.game.board(side).graveyard.len()
    }

    pub fn deck_len(&self, side: Side) -> usize {
        self.game.board(side).deck.len()
    }

    pub fn slot(&self, side: Side, idx: SealIndex) -> Option<CardId> {
        self.game.board(side).slot(idx)
    }

    pub fn seal(&self, idx: SealIndex) -> &Seal {
        &self.game.seals[idx]
    }

    pub fn seals(&self) -> &[Seal] {
        &self.game.seals
    }

    pub fn seal_count(&self, side: Side) -> usize {
        self.game.seal_count(side)
    }

    pub fn in_play(&self) -> Vec<CardId> {
        self.game.in_play()
    }
}

/// Decision driver for one side
///
/// Implement this trait to create AI players or connect a UI. Each method
/// answers one kind of `Decision`; answers outside the offered options are
/// rejected and the question is asked again.
pub trait PlayerController {
    /// The seat this controller plays
    fn side(&self) -> Side;

    /// Allegiance for the Player seat (asked once, at setup)
    fn choose_alignment(&mut self, view: &GameStateView) -> Alignment;

    /// One Prep move; called repeatedly until `PrepAction::EndPrep`
    fn choose_prep_action(&mut self, view: &GameStateView, request: &PrepRequest) -> PrepAction;

    /// Card for the next marker of an allocation, or `None` to finish early
    fn choose_marker_target(
        &mut self,
        view: &GameStateView,
        request: &AllocationRequest,
    ) -> Option<CardId>;

    /// Target for a card effect; `None` declines when the request is optional
    fn choose_ability_target(
        &mut self,
        view: &GameStateView,
        request: &TargetRequest,
    ) -> Option<CardId>;

    fn choose_seal(&mut self, view: &GameStateView, request: &SealRequest) -> Option<SealIndex>;

    fn confirm(&mut self, view: &GameStateView, request: &ConfirmRequest) -> bool;

    /// Marker kind for The Almighty's purge
    fn choose_marker_kind(&mut self, view: &GameStateView, source: CardId) -> MarkerKind;

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}
