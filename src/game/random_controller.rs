//! Random AI controller for testing and baseline gameplay
//!
//! Makes uniform random choices from the legal options of each decision.
//! Serves as a baseline for the heuristic AI.

use crate::core::{Alignment, CardId, MarkerKind, SealIndex, Side};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{
    AllocationRequest, ConfirmRequest, PrepAction, PrepRequest, SealRequest, TargetRequest,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// A controller that makes random choices
pub struct RandomController {
    side: Side,
    rng: ChaCha12Rng,
}

impl RandomController {
    /// Create a new random controller seeded from entropy
    pub fn new(side: Side) -> Self {
        RandomController {
            side,
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(side: Side, seed: u64) -> Self {
        RandomController {
            side,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// One of `options`, or `None` when `optional` wins the draw
    fn pick<T: Copy>(&mut self, options: &[T], optional: bool) -> Option<T> {
        // One extra slot stands for declining
        let slots = options.len() + usize::from(optional);
        if slots == 0 {
            return None;
        }
        options.get(self.rng.gen_range(0..slots)).copied()
    }
}

impl PlayerController for RandomController {
    fn side(&self) -> Side {
        self.side
    }

    fn choose_alignment(&mut self, _view: &GameStateView) -> Alignment {
        if self.rng.gen_bool(0.5) {
            Alignment::Light
        } else {
            Alignment::Dark
        }
    }

    fn choose_prep_action(&mut self, _view: &GameStateView, request: &PrepRequest) -> PrepAction {
        let mut actions: Vec<PrepAction> = request
            .limbo_triggers
            .iter()
            .map(|card| PrepAction::TriggerLimbo(*card))
            .collect();
        for card in &request.hand {
            for slot in &request.vacant {
                actions.push(PrepAction::Place {
                    card: *card,
                    slot: *slot,
                });
            }
        }
        // Ending early is legal but a random walk would rarely fill the board
        if actions.is_empty() {
            return PrepAction::EndPrep;
        }
        actions[self.rng.gen_range(0..actions.len())]
    }

    fn choose_marker_target(
        &mut self,
        _view: &GameStateView,
        request: &AllocationRequest,
    ) -> Option<CardId> {
        self.pick(&request.candidates, false)
    }

    fn choose_ability_target(
        &mut self,
        _view: &GameStateView,
        request: &TargetRequest,
    ) -> Option<CardId> {
        self.pick(&request.candidates, request.optional)
    }

    fn choose_seal(&mut self, _view: &GameStateView, request: &SealRequest) -> Option<SealIndex> {
        self.pick(&request.candidates, request.optional)
    }

    fn confirm(&mut self, _view: &GameStateView, _request: &ConfirmRequest) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn choose_marker_kind(&mut self, _view: &GameStateView, _source: CardId) -> MarkerKind {
        if self.rng.gen_bool(0.5) {
            MarkerKind::Power
        } else {
            MarkerKind::Weakness
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::{Effect, EntityId};
    use crate::game::{Decision, GameState, Response, TargetPurpose};

    #[test]
    fn test_random_controller_creation() {
        let controller = RandomController::new(Side::Enemy);
        assert_eq!(controller.side(), Side::Enemy);
    }

    #[test]
    fn test_random_answers_are_legal() {
        let game = GameState::new(GameConfig::default());
        let view = GameStateView::new(&game, Side::Player);
        let mut controller = RandomController::with_seed(Side::Player, 42);

        let request = TargetRequest {
            source: EntityId::new(1),
            effect: Effect::Destroy,
            candidates: vec![EntityId::new(2), EntityId::new(3), EntityId::new(4)],
            optional: false,
            purpose: TargetPurpose::Ability,
            prompt: String::new(),
        };
        let prep = PrepRequest {
            hand: vec![EntityId::new(7)],
            vacant: vec![1, 4],
            limbo_triggers: vec![EntityId::new(9)],
        };
        let target_decision = Decision::ChooseTarget(request.clone());
        let prep_decision = Decision::Prep(prep.clone());
        for _ in 0..50 {
            let target = controller.choose_ability_target(&view, &request);
            assert!(target_decision.accepts(&Response::Target(target)));
            let action = controller.choose_prep_action(&view, &prep);
            assert!(prep_decision.accepts(&Response::Prep(action)));
            assert_ne!(action, PrepAction::EndPrep);
        }
    }

    #[test]
    fn test_seeded_controllers_agree() {
        let game = GameState::new(GameConfig::default());
        let view = GameStateView::new(&game, Side::Player);
        let request = SealRequest {
            source: EntityId::new(1),
            purpose: crate::game::SealPurpose::Lock,
            candidates: (0..7).collect(),
            optional: true,
            prompt: String::new(),
        };
        let mut a = RandomController::with_seed(Side::Player, 7);
        let mut b = RandomController::with_seed(Side::Player, 7);
        for _ in 0..20 {
            assert_eq!(a.choose_seal(&view, &request), b.choose_seal(&view, &request));
        }
    }
}
