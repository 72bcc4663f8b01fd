//! Per-side card collections (hand, battlefield slots, deck, limbo, graveyard)

use crate::core::{CardDefinition, CardId, SealIndex, Side, SEAL_COUNT};
use serde::Serialize;

/// Ordered zones holding card instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    Hand,
    Limbo,
    Graveyard,
}

/// A zone containing card instances, in arrival order
#[derive(Debug, Clone, Serialize)]
pub struct CardZone {
    pub zone_type: Zone,
    pub owner: Side,
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone, owner: Side) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // Order is kept: controllers walk zones in order and determinism
            // depends on it.
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A deck of definitions; the top is the last element
#[derive(Debug, Clone, Default, Serialize)]
pub struct Deck {
    pub cards: Vec<&'static CardDefinition>,
}

impl Deck {
    pub fn new(cards: Vec<&'static CardDefinition>) -> Self {
        Deck { cards }
    }

    pub fn draw_top(&mut self) -> Option<&'static CardDefinition> {
        self.cards.pop()
    }

    pub fn peek_top(&self) -> Option<&'static CardDefinition> {
        self.cards.last().copied()
    }

    pub fn push_top(&mut self, def: &'static CardDefinition) {
        self.cards.push(def);
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Everything one side owns outside the seals
#[derive(Debug, Clone, Serialize)]
pub struct PlayerBoard {
    pub side: Side,
    pub battlefield: [Option<CardId>; SEAL_COUNT],
    pub hand: CardZone,
    pub deck: Deck,
    pub limbo: CardZone,
    pub graveyard: CardZone,
}

impl PlayerBoard {
    pub fn new(side: Side) -> Self {
        PlayerBoard {
            side,
            battlefield: [None; SEAL_COUNT],
            hand: CardZone::new(Zone::Hand, side),
            deck: Deck::default(),
            limbo: CardZone::new(Zone::Limbo, side),
            graveyard: CardZone::new(Zone::Graveyard, side),
        }
    }

    pub fn zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Hand => &self.hand,
            Zone::Limbo => &self.limbo,
            Zone::Graveyard => &self.graveyard,
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Hand => &mut self.hand,
            Zone::Limbo => &mut self.limbo,
            Zone::Graveyard => &mut self.graveyard,
        }
    }

    pub fn slot(&self, idx: SealIndex) -> Option<CardId> {
        self.battlefield.get(idx).copied().flatten()
    }

    /// Vacant battlefield slots in index order
    pub fn vacant_slots(&self) -> impl Iterator<Item = SealIndex> + '_ {
        self.battlefield
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(idx, _)| idx)
    }

    /// Occupied battlefield slots in index order
    pub fn occupied(&self) -> impl Iterator<Item = (SealIndex, CardId)> + '_ {
        self.battlefield
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|id| (idx, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{catalog, EntityId};

    #[test]
    fn test_zone_order_preserved() {
        let mut zone = CardZone::new(Zone::Limbo, Side::Player);
        zone.add(EntityId::new(1));
        zone.add(EntityId::new(2));
        zone.add(EntityId::new(3));
        assert!(zone.remove(EntityId::new(2)));
        assert_eq!(zone.cards, vec![EntityId::new(1), EntityId::new(3)]);
        assert!(!zone.remove(EntityId::new(2)));
    }

    #[test]
    fn test_deck_top_is_last() {
        let herald = catalog::lookup("Herald").unwrap();
        let luna = catalog::lookup("Luna").unwrap();
        let mut deck = Deck::new(vec![herald]);
        deck.push_top(luna);
        assert_eq!(deck.peek_top().map(|d| d.name), Some("Luna"));
        assert_eq!(deck.draw_top().map(|d| d.name), Some("Luna"));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_vacant_slots() {
        let mut board = PlayerBoard::new(Side::Enemy);
        board.battlefield[0] = Some(EntityId::new(9));
        board.battlefield[3] = Some(EntityId::new(10));
        let vacant: Vec<_> = board.vacant_slots().collect();
        assert_eq!(vacant, vec![1, 2, 4, 5, 6]);
        assert_eq!(board.occupied().count(), 2);
    }
}
