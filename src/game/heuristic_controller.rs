//! Heuristic AI controller
//!
//! The reference opponent. It never simulates; every answer comes from a
//! simple rule over the visible board:
//!
//! - Prep: fire any ready Limbo trigger, then fill vacant slots greedily in
//!   slot order from the front of the hand.
//! - Counter allocation: power on its own first battlefield card, weakness
//!   on the opponent's first battlefield card.
//! - Harmful effects go to the strongest visible enemy, beneficial ones to
//!   the strongest ally. Limbo and champion picks are random.
//! - Fallen One is a coin flip; Luna is spent only to save a seal it holds.

use crate::core::{Alignment, CardId, Effect, MarkerKind, SealIndex, Side};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{
    AllocationRequest, ConfirmRequest, DecisionContext, PrepAction, PrepRequest, SealPurpose,
    SealRequest, TargetPurpose, TargetRequest,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Heuristic AI controller
pub struct HeuristicController {
    side: Side,
    rng: Xoshiro256PlusPlus,
}

impl HeuristicController {
    /// Create a heuristic controller seeded from entropy
    pub fn new(side: Side) -> Self {
        HeuristicController {
            side,
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Create a heuristic controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(side: Side, seed: u64) -> Self {
        HeuristicController {
            side,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    fn power(view: &GameStateView, id: CardId) -> i32 {
        view.effective_power(id).unwrap_or(0)
    }

    fn is_mine(&self, view: &GameStateView, id: CardId) -> bool {
        view.owner(id) == Some(self.side)
    }

    /// Strongest visible candidate satisfying `keep`
    fn strongest(
        &self,
        view: &GameStateView,
        candidates: &[CardId],
        keep: impl Fn(CardId) -> bool,
    ) -> Option<CardId> {
        candidates
            .iter()
            .copied()
            .filter(|id| keep(*id))
            .max_by_key(|id| Self::power(view, *id))
    }

    fn weakest(
        &self,
        view: &GameStateView,
        candidates: &[CardId],
        keep: impl Fn(CardId) -> bool,
    ) -> Option<CardId> {
        candidates
            .iter()
            .copied()
            .filter(|id| keep(*id))
            .min_by_key(|id| Self::power(view, *id))
    }

    fn pick_random(&mut self, candidates: &[CardId]) -> Option<CardId> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.gen_range(0..candidates.len())])
    }

    /// First battlefield card of `side` (slot order) that is a candidate,
    /// then that side's champions
    fn first_of(view: &GameStateView, side: Side, candidates: &[CardId]) -> Option<CardId> {
        let slots = (0..view.seals().len()).filter_map(|idx| view.slot(side, idx));
        let champions = view
            .seals()
            .iter()
            .filter_map(|seal| seal.champion)
            .filter(|id| view.owner(*id) == Some(side));
        slots.chain(champions).find(|id| candidates.contains(id))
    }
}

impl PlayerController for HeuristicController {
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

    fn choose_prep_action(&mut self, view: &GameStateView, request: &PrepRequest) -> PrepAction {
        if let Some(&card) = request.limbo_triggers.first() {
            view.logger()
                .controller_choice("HEUR", &format!("{} triggers {}", self.side, view.card_name(card)));
            return PrepAction::TriggerLimbo(card);
        }
        match (request.hand.first(), request.vacant.first()) {
            (Some(&card), Some(&slot)) => PrepAction::Place { card, slot },
            _ => PrepAction::EndPrep,
        }
    }

    fn choose_marker_target(
        &mut self,
        view: &GameStateView,
        request: &AllocationRequest,
    ) -> Option<CardId> {
        let side = match request.kind {
            MarkerKind::Power => self.side,
            MarkerKind::Weakness => self.side.opponent(),
        };
        Self::first_of(view, side, &request.candidates)
    }

    fn choose_ability_target(
        &mut self,
        view: &GameStateView,
        request: &TargetRequest,
    ) -> Option<CardId> {
        let candidates = &request.candidates;
        let choice = match (request.purpose, request.effect) {
            (TargetPurpose::Swap, _) => {
                let current = Self::power(view, request.source);
                self.strongest(view, candidates, |_| true)
                    .filter(|id| Self::power(view, *id) > current)
            }
            (_, Effect::SentinelAbsorb) => self.pick_random(candidates),
            (_, effect) if effect.is_beneficial() => self
                .strongest(view, candidates, |id| self.is_mine(view, id))
                .or_else(|| {
                    // Mandatory grant with no ally: feed the weakest enemy
                    (!request.optional)
                        .then(|| self.weakest(view, candidates, |_| true))
                        .flatten()
                }),
            (_, _) => {
                let enemies: Vec<CardId> = candidates
                    .iter()
                    .copied()
                    .filter(|id| !self.is_mine(view, *id))
                    .collect();
                let hidden_or_champion = enemies
                    .iter()
                    .all(|id| view.card(*id).is_none() || view.seals().iter().any(|s| s.champion == Some(*id)));
                if hidden_or_champion && !enemies.is_empty() {
                    self.pick_random(&enemies)
                } else {
                    self.strongest(view, &enemies, |_| true)
                }
                .or_else(|| {
                    (!request.optional)
                        .then(|| self.weakest(view, candidates, |_| true))
                        .flatten()
                })
            }
        };
        if let Some(target) = choice {
            view.logger().controller_choice(
                "HEUR",
                &format!("{} targets {}", self.side, view.card_name(target)),
            );
        }
        choice
    }

    fn choose_seal(&mut self, view: &GameStateView, request: &SealRequest) -> Option<SealIndex> {
        let mine = view.allegiance();
        let rank = |idx: &SealIndex| {
            let alignment = view.seal(*idx).alignment;
            match request.purpose {
                // Flipping an enemy seal is a two-seal swing
                SealPurpose::Claim(_) => {
                    if alignment == mine.opposite() {
                        0
                    } else if alignment == Alignment::Neutral {
                        1
                    } else {
                        2
                    }
                }
                SealPurpose::Lock => {
                    if alignment == mine {
                        0
                    } else {
                        1
                    }
                }
            }
        };
        request.candidates.iter().copied().min_by_key(rank)
    }

    fn confirm(&mut self, view: &GameStateView, request: &ConfirmRequest) -> bool {
        match request.context {
            DecisionContext::FallenOne => self.rng.gen_bool(0.5),
            DecisionContext::LunaNullify => request
                .seal
                .is_some_and(|idx| view.seal(idx).alignment == view.allegiance()),
            DecisionContext::LustSealInfluence => true,
            DecisionContext::DeltaSacrifice => view.in_play().into_iter().any(|id| {
                Some(id) != request.source
                    && self.is_mine(view, id)
                    && view.card(id).is_some_and(|c| c.is_creature())
            }),
            DecisionContext::AlmightyMarkerType => false,
        }
    }

    fn choose_marker_kind(&mut self, view: &GameStateView, _source: CardId) -> MarkerKind {
        let (power, weakness) = view
            .in_play()
            .into_iter()
            .filter_map(|id| view.card(id))
            .fold((0, 0), |(p, w), c| (p + c.power_markers, w + c.weakness_markers));
        if power >= weakness && power > 0 {
            MarkerKind::Power
        } else {
            MarkerKind::Weakness
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Location, SEAL_COUNT};
    use crate::game::Sandbox;

    fn view_of(board: &Sandbox, side: Side) -> GameStateView<'_> {
        GameStateView::new(&board.game, side)
    }

    #[test]
    fn test_allocation_goes_to_first_cards() {
        let mut board = Sandbox::new(Alignment::Light);
        let herald = board.place("Herald", Side::Player, 3).unwrap();
        let _later = board.place("Alpha", Side::Player, 5).unwrap();
        let enemy = board.place("Wrath", Side::Enemy, 1).unwrap();
        let candidates = board.game.in_play();

        let mut ai = HeuristicController::with_seed(Side::Player, 1);
        let view = view_of(&board, Side::Player);
        let mut request = AllocationRequest {
            source: herald,
            kind: MarkerKind::Power,
            power_left: 1,
            weakness_left: 1,
            candidates,
            prompt: String::new(),
        };
        assert_eq!(ai.choose_marker_target(&view, &request), Some(herald));
        request.kind = MarkerKind::Weakness;
        assert_eq!(ai.choose_marker_target(&view, &request), Some(enemy));
    }

    #[test]
    fn test_harmful_effect_hits_strongest_visible_enemy() {
        let mut board = Sandbox::new(Alignment::Dark);
        let famine = board.place("Famine", Side::Player, 0).unwrap();
        let own = board.place("Wrath", Side::Player, 1).unwrap();
        let weak = board.place("Thrones", Side::Enemy, 0).unwrap();
        let strong = board.place("Seraphim", Side::Enemy, 1).unwrap();
        for id in [weak, strong] {
            board.game.card_mut(id).unwrap().face_up = true;
        }

        let mut ai = HeuristicController::with_seed(Side::Player, 2);
        let view = view_of(&board, Side::Player);
        let request = TargetRequest {
            source: famine,
            effect: Effect::Destroy,
            candidates: vec![own, weak, strong],
            optional: false,
            purpose: TargetPurpose::Ability,
            prompt: String::new(),
        };
        assert_eq!(ai.choose_ability_target(&view, &request), Some(strong));
    }

    #[test]
    fn test_claim_prefers_enemy_seals() {
        let mut board = Sandbox::new(Alignment::Light);
        board.game.seals[4].alignment = Alignment::Dark;
        let thrones = board.place("Thrones", Side::Player, 0).unwrap();
        let mut ai = HeuristicController::with_seed(Side::Player, 3);
        let view = view_of(&board, Side::Player);
        let request = SealRequest {
            source: thrones,
            purpose: SealPurpose::Claim(Alignment::Light),
            candidates: (0..SEAL_COUNT).collect(),
            optional: false,
            prompt: String::new(),
        };
        assert_eq!(ai.choose_seal(&view, &request), Some(4));
    }

    #[test]
    fn test_luna_saves_only_own_seals() {
        let mut board = Sandbox::new(Alignment::Light);
        board.game.seals[2].alignment = Alignment::Light;
        let luna = board.spawn("Luna", Side::Player, Location::Limbo(Side::Player)).unwrap();
        let mut ai = HeuristicController::with_seed(Side::Player, 4);
        let view = view_of(&board, Side::Player);
        let ask = |seal| ConfirmRequest {
            context: DecisionContext::LunaNullify,
            source: Some(luna),
            seal: Some(seal),
            message: String::new(),
        };
        assert!(ai.confirm(&view, &ask(2)));
        assert!(!ai.confirm(&view, &ask(3)));
    }
}
