//! Zero controller for testing and automation
//!
//! This controller always chooses the first legal option and declines
//! anything optional. It's useful for automated testing and ensuring games
//! can complete without user input.

use crate::core::{Alignment, CardId, MarkerKind, SealIndex, Side};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{
    AllocationRequest, ConfirmRequest, PrepAction, PrepRequest, SealRequest, TargetRequest,
};

/// A controller that always chooses the first available option (index 0)
///
/// This is useful for:
/// - Automated testing
/// - Running games without interaction
/// - Benchmarking the game engine
/// - Ensuring games can complete deterministically
pub struct ZeroController {
    side: Side,
}

impl ZeroController {
    /// Create a new zero controller
    pub fn new(side: Side) -> Self {
        ZeroController { side }
    }
}

impl PlayerController for ZeroController {
    fn side(&self) -> Side {
        self.side
    }

    fn choose_alignment(&mut self, _view: &GameStateView) -> Alignment {
        Alignment::Light
    }

    fn choose_prep_action(&mut self, _view: &GameStateView, request: &PrepRequest) -> PrepAction {
        match (request.hand.first(), request.vacant.first()) {
            (Some(&card), Some(&slot)) => PrepAction::Place { card, slot },
            _ => PrepAction::EndPrep,
        }
    }

    fn choose_marker_target(
        &mut self,
        _view: &GameStateView,
        request: &AllocationRequest,
    ) -> Option<CardId> {
        request.candidates.first().copied()
    }

    fn choose_ability_target(
        &mut self,
        _view: &GameStateView,
        request: &TargetRequest,
    ) -> Option<CardId> {
        if request.optional {
            return None;
        }
        request.candidates.first().copied()
    }

    fn choose_seal(&mut self, _view: &GameStateView, request: &SealRequest) -> Option<SealIndex> {
        if request.optional {
            return None;
        }
        request.candidates.first().copied()
    }

    fn confirm(&mut self, _view: &GameStateView, _request: &ConfirmRequest) -> bool {
        false
    }

    fn choose_marker_kind(&mut self, _view: &GameStateView, _source: CardId) -> MarkerKind {
        MarkerKind::Power
    }
}
