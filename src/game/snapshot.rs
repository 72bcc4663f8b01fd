//! Read-only state projection pushed to observers
//!
//! A snapshot is taken from one seat's point of view: the other side's
//! face-down cards and hand stay hidden. Snapshots are only captured between
//! mutations, so observers never see a half-applied change.

use crate::core::{Alignment, CardId, SealIndex, Side, SEAL_COUNT};
use crate::game::{
    Decision, DecisionContext, GameOutcome, GameState, Phase, SealStep,
};
use serde::Serialize;

/// One card as seen by the viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub owner: Side,
    pub face_up: bool,
    /// Hidden cards have no name or stats
    pub name: Option<&'static str>,
    pub power: Option<i32>,
    pub power_markers: u32,
    pub weakness_markers: u32,
    pub invincible: bool,
}

/// One seal with the cards contesting it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SealView {
    pub index: SealIndex,
    pub alignment: Alignment,
    pub locked_against: Option<Side>,
    pub champion: Option<CardView>,
    pub player_slot: Option<CardView>,
    pub enemy_slot: Option<CardView>,
}

/// Per-side counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideSummary {
    pub side: Side,
    pub allegiance: Alignment,
    pub score: usize,
    pub deck_count: usize,
    pub graveyard_count: usize,
    pub limbo: Vec<CardView>,
    /// Empty for the side the viewer does not control
    pub hand: Vec<CardView>,
}

/// Everything an external UI needs after a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub viewer: Side,
    pub round: u32,
    pub phase: Phase,
    pub step: Option<SealStep>,
    pub current_seal: Option<SealIndex>,
    pub sides: [SideSummary; 2],
    pub seals: Vec<SealView>,
    pub instruction: String,
    pub decision_context: Option<DecisionContext>,
    /// Seat that owes an answer
    pub awaiting: Option<Side>,
    pub pending: Option<Decision>,
    /// Serial of the latest decision posed to either seat
    pub decision_seq: u64,
    pub power_pool: u8,
    pub weakness_pool: u8,
    /// Capped event log, oldest first
    pub log: Vec<String>,
    pub outcome: Option<GameOutcome>,
}

impl GameSnapshot {
    pub fn capture(game: &GameState, viewer: Side) -> Self {
        let view_of = |id: CardId| -> Option<CardView> {
            let card = game.card(id).ok()?;
            let visible = card.owner == viewer || card.face_up;
            Some(CardView {
                id,
                owner: card.owner,
                face_up: card.face_up,
                name: visible.then_some(card.name()),
                power: visible.then(|| card.effective_power()),
                power_markers: card.power_markers,
                weakness_markers: card.weakness_markers,
                invincible: card.invincible,
            })
        };

        let sides = Side::BOTH.map(|side| {
            let board = game.board(side);
            SideSummary {
                side,
                allegiance: game.allegiance(side),
                score: game.seal_count(side),
                deck_count: board.deck.len(),
                graveyard_count: board.graveyard.len(),
                limbo: board.limbo.cards.iter().filter_map(|id| view_of(*id)).collect(),
                hand: if side == viewer {
                    board.hand.cards.iter().filter_map(|id| view_of(*id)).collect()
                } else {
                    Vec::new()
                },
            }
        });

        let seals = (0..SEAL_COUNT)
            .map(|idx| {
                let seal = &game.seals[idx];
                SealView {
                    index: idx,
                    alignment: seal.alignment,
                    locked_against: seal.locked_against,
                    champion: seal.champion.and_then(view_of),
                    player_slot: game.board(Side::Player).slot(idx).and_then(view_of),
                    enemy_slot: game.board(Side::Enemy).slot(idx).and_then(view_of),
                }
            })
            .collect();

        let (power_pool, weakness_pool) = match &game.pending {
            Some((_, Decision::AllocateMarker(req))) => (req.power_left, req.weakness_left),
            _ => (0, 0),
        };

        // The other seat's question is not the viewer's business beyond its tag
        let pending = game
            .pending
            .as_ref()
            .filter(|(side, _)| *side == viewer)
            .map(|(_, decision)| decision.clone());

        GameSnapshot {
            viewer,
            round: game.round,
            phase: game.phase,
            step: game.step,
            current_seal: game.current_seal,
            sides,
            seals,
            instruction: game.instruction.clone(),
            decision_context: game.pending.as_ref().and_then(|(_, d)| d.context()),
            awaiting: game.pending.as_ref().map(|(side, _)| *side),
            pending,
            decision_seq: game.decisions_asked,
            power_pool,
            weakness_pool,
            log: game.logger.history(),
            outcome: game.outcome.clone(),
        }
    }

    pub fn side(&self, side: Side) -> &SideSummary {
        &self.sides[side.index()]
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

/// Receives a snapshot after every published mutation
pub trait StateObserver {
    fn on_snapshot(&mut self, snapshot: &GameSnapshot);

    /// Seat whose view this observer wants
    fn viewer(&self) -> Side {
        Side::Player
    }
}

impl<F: FnMut(&GameSnapshot)> StateObserver for F {
    fn on_snapshot(&mut self, snapshot: &GameSnapshot) {
        self(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::{catalog, Location};

    #[test]
    fn test_snapshot_hides_enemy_hand_and_face_down() {
        let mut game = GameState::new(GameConfig::default().with_seed(3));
        game.set_allegiance(Alignment::Dark).unwrap();
        let lord = catalog::lookup("Lord").unwrap();
        let archangel = catalog::lookup("Archangel").unwrap();
        game.spawn_card(lord, Side::Player, Location::Hand(Side::Player)).unwrap();
        game.spawn_card(archangel, Side::Enemy, Location::Hand(Side::Enemy)).unwrap();
        game.spawn_card(archangel, Side::Enemy, Location::Battlefield(Side::Enemy, 6))
            .unwrap();

        let snap = GameSnapshot::capture(&game, Side::Player);
        assert_eq!(snap.side(Side::Player).hand.len(), 1);
        assert!(snap.side(Side::Enemy).hand.is_empty());
        let slot = snap.seals[6].enemy_slot.as_ref().unwrap();
        assert_eq!(slot.name, None);
        assert_eq!(slot.power, None);
        assert_eq!(snap.side(Side::Player).allegiance, Alignment::Dark);
    }

    #[test]
    fn test_snapshot_serializes() {
        let game = GameState::new(GameConfig::default().with_seed(3));
        let snap = GameSnapshot::capture(&game, Side::Player);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"phase\":\"SETUP\""));
        assert_eq!(snap.seals.len(), SEAL_COUNT);
    }
}
