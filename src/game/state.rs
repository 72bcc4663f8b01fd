//! Main game state structure

use crate::config::GameConfig;
use crate::core::{
    catalog, Alignment, CardDefinition, CardId, CardInstance, EntityStore, Location, SealIndex,
    Side, SEAL_COUNT,
};
use crate::game::{Decision, GameEndReason, GameLogger, Phase, Seal, SealStep};
use crate::zones::{Deck, PlayerBoard};
use crate::{Result, SealsError};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use std::cell::RefCell;

/// How the game ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// `None` for a draw
    pub winner: Option<Side>,
    pub reason: GameEndReason,
}

/// Complete, authoritative game state
///
/// Observers never see this directly; they get `GameSnapshot` projections.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Every live card instance
    pub cards: EntityStore<CardInstance>,

    /// Indexed by `Side::index()`
    pub boards: [PlayerBoard; 2],

    pub seals: [Seal; SEAL_COUNT],

    /// Allegiance per side, indexed by `Side::index()`
    pub allegiance: [Alignment; 2],

    /// 1-based once the first Prep starts
    pub round: u32,
    pub phase: Phase,
    pub step: Option<SealStep>,
    pub current_seal: Option<SealIndex>,

    /// Cards that fought during the current Resolution. Kept through the
    /// next Prep for Limbo triggers and cleared when Resolution starts.
    pub battled_this_round: Vec<CardId>,

    pub outcome: Option<GameOutcome>,

    /// Decision currently waiting for an answer
    pub pending: Option<(Side, Decision)>,
    pub instruction: String,
    /// Decisions posed so far; tells a new question from a repeated one
    pub decisions_asked: u64,

    pub config: GameConfig,

    /// Game RNG: deck shuffles and initiative ties
    ///
    /// RefCell so read-only views can still draw from it.
    pub rng: RefCell<ChaCha12Rng>,

    pub logger: GameLogger,
}

impl GameState {
    /// Create an empty table; decks are built once allegiances are known
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };
        let mut logger = GameLogger::new();
        logger.set_history_capacity(config.log_capacity);

        GameState {
            cards: EntityStore::new(),
            boards: [PlayerBoard::new(Side::Player), PlayerBoard::new(Side::Enemy)],
            seals: std::array::from_fn(Seal::new),
            allegiance: [Alignment::Neutral; 2],
            round: 0,
            phase: Phase::Setup,
            step: None,
            current_seal: None,
            battled_this_round: Vec::new(),
            outcome: None,
            pending: None,
            instruction: String::new(),
            decisions_asked: 0,
            config,
            rng: RefCell::new(rng),
            logger,
        }
    }

    /// Reseed for reproducible games
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    pub fn board(&self, side: Side) -> &PlayerBoard {
        &self.boards[side.index()]
    }

    pub fn board_mut(&mut self, side: Side) -> &mut PlayerBoard {
        &mut self.boards[side.index()]
    }

    pub fn card(&self, id: CardId) -> Result<&CardInstance> {
        self.cards.get(id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Result<&mut CardInstance> {
        self.cards.get_mut(id)
    }

    pub fn allegiance(&self, side: Side) -> Alignment {
        self.allegiance[side.index()]
    }

    /// Player picks; the Enemy takes the other allegiance
    pub fn set_allegiance(&mut self, player_choice: Alignment) -> Result<()> {
        if player_choice == Alignment::Neutral {
            return Err(SealsError::InvalidState(
                "allegiance must be Light or Dark".to_string(),
            ));
        }
        self.allegiance = [player_choice, player_choice.opposite()];
        Ok(())
    }

    /// Side whose allegiance is `alignment`
    pub fn side_of(&self, alignment: Alignment) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| self.allegiance(*side) == alignment && alignment != Alignment::Neutral)
    }

    /// Build and shuffle both decks from the allegiance pools
    pub fn load_decks(&mut self) {
        for side in Side::BOTH {
            let mut deck = Deck::new(catalog::build_deck(self.allegiance(side), &self.config));
            deck.shuffle(&mut *self.rng.borrow_mut());
            self.board_mut(side).deck = deck;
        }
    }

    /// Number of seals aligned with `side`'s allegiance
    pub fn seal_count(&self, side: Side) -> usize {
        let allegiance = self.allegiance(side);
        self.seals
            .iter()
            .filter(|s| s.alignment == allegiance && allegiance != Alignment::Neutral)
            .count()
    }

    /// (light, dark, neutral) seal counts; always sums to SEAL_COUNT
    pub fn alignment_counts(&self) -> (usize, usize, usize) {
        self.seals.iter().fold((0, 0, 0), |(l, d, n), seal| match seal.alignment {
            Alignment::Light => (l + 1, d, n),
            Alignment::Dark => (l, d + 1, n),
            Alignment::Neutral => (l, d, n + 1),
        })
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Cards in play in resolution order: for each seal, the Player slot,
    /// the Enemy slot, then the champion
    pub fn in_play(&self) -> Vec<CardId> {
        let mut cards = Vec::new();
        for idx in 0..SEAL_COUNT {
            cards.extend(self.board(Side::Player).slot(idx));
            cards.extend(self.board(Side::Enemy).slot(idx));
            cards.extend(self.seals[idx].champion);
        }
        cards
    }

    /// Create an instance and put it at `location`
    pub fn spawn_card(
        &mut self,
        def: &'static CardDefinition,
        owner: Side,
        location: Location,
    ) -> Result<CardId> {
        self.check_vacant(location)?;
        let id = self.cards.next_id();
        let mut card = CardInstance::new(id, def, owner, location);
        card.face_up = matches!(location, Location::Limbo(_) | Location::Graveyard(_));
        self.cards.insert(id, card);
        self.attach(id, location);
        Ok(id)
    }

    /// Draw the top card of `side`'s deck into hand; `None` when the deck is empty
    pub fn draw_card(&mut self, side: Side) -> Result<Option<CardId>> {
        match self.board_mut(side).deck.draw_top() {
            Some(def) => self.spawn_card(def, side, Location::Hand(side)).map(Some),
            None => Ok(None),
        }
    }

    /// Move a card; removal and insertion happen together or not at all
    ///
    /// Leaving play (battlefield or champion slot) strips markers and round
    /// flags. Cards entering Limbo or the Graveyard are face up.
    pub fn move_card(&mut self, id: CardId, to: Location) -> Result<()> {
        let from = self.card(id)?.location;
        if from == to {
            return Ok(());
        }
        self.check_vacant(to)?;
        self.detach(id, from)?;
        self.attach(id, to);

        let card = self.card_mut(id)?;
        card.location = to;
        if from.is_in_play() && !to.is_in_play() {
            card.reset_runtime();
        }
        match to {
            Location::Limbo(_) | Location::Graveyard(_) => card.face_up = true,
            Location::Hand(_) => card.face_up = false,
            _ => {}
        }
        Ok(())
    }

    /// Put the card's definition back on top of its owner's deck and
    /// despawn the instance
    pub fn return_to_deck(&mut self, id: CardId) -> Result<()> {
        let (from, owner, def) = {
            let card = self.card(id)?;
            (card.location, card.owner, card.def)
        };
        self.detach(id, from)?;
        self.cards.remove(id);
        self.board_mut(owner).deck.push_top(def);
        Ok(())
    }

    /// Clear per-seal suppression on everything at `idx`
    pub fn clear_suppression(&mut self, idx: SealIndex) {
        let ids: Vec<CardId> = [
            self.board(Side::Player).slot(idx),
            self.board(Side::Enemy).slot(idx),
            self.seals[idx].champion,
        ]
        .into_iter()
        .flatten()
        .collect();
        for id in ids {
            if let Ok(card) = self.card_mut(id) {
                card.suppressed = false;
            }
        }
    }

    fn check_vacant(&self, location: Location) -> Result<()> {
        let occupied = match location {
            Location::Battlefield(side, idx) => {
                idx >= SEAL_COUNT || self.board(side).slot(idx).is_some()
            }
            Location::Champion(idx) => idx >= SEAL_COUNT || self.seals[idx].champion.is_some(),
            _ => false,
        };
        if occupied {
            return Err(SealsError::InvalidState(format!("{location} is not available")));
        }
        Ok(())
    }

    fn detach(&mut self, id: CardId, from: Location) -> Result<()> {
        let removed = match from {
            Location::Hand(side) => self.board_mut(side).hand.remove(id),
            Location::Limbo(side) => self.board_mut(side).limbo.remove(id),
            Location::Graveyard(side) => self.board_mut(side).graveyard.remove(id),
            Location::Battlefield(side, idx) => {
                let slot = &mut self.board_mut(side).battlefield[idx];
                slot.take_if_eq(id)
            }
            Location::Champion(idx) => self.seals[idx].champion.take_if_eq(id),
        };
        if !removed {
            return Err(SealsError::InvalidState(format!(
                "card {id} not found at {from}"
            )));
        }
        Ok(())
    }

    fn attach(&mut self, id: CardId, to: Location) {
        match to {
            Location::Hand(side) => self.board_mut(side).hand.add(id),
            Location::Limbo(side) => self.board_mut(side).limbo.add(id),
            Location::Graveyard(side) => self.board_mut(side).graveyard.add(id),
            Location::Battlefield(side, idx) => self.board_mut(side).battlefield[idx] = Some(id),
            Location::Champion(idx) => self.seals[idx].champion = Some(id),
        }
    }
}

trait TakeIfEq {
    fn take_if_eq(&mut self, id: CardId) -> bool;
}

impl TakeIfEq for Option<CardId> {
    fn take_if_eq(&mut self, id: CardId) -> bool {
        if *self == Some(id) {
            *self = None;
            true
        } else {
            false
        }
    }
}
