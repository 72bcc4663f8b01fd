//! Card definitions and card instances

use crate::core::effects::{AbilityDescriptor, Allocation, GlobalEffect, SealEffect, TargetedAbility};
use crate::core::hooks::CardHooks;
use crate::core::types::{CardType, Faction, Location, MarkerKind, Side};
use crate::core::CardId;
use serde::Serialize;

/// Immutable catalog entry
///
/// Built with `const fn` setters so the whole catalog lives in statics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardDefinition {
    pub name: &'static str,
    pub faction: Faction,
    pub card_type: CardType,
    pub base_power: i32,
    pub is_champion: bool,
    /// Display only
    pub ability_text: &'static str,
    pub ability: AbilityDescriptor,
}

impl CardDefinition {
    /// Avatars, Gods and Horsemen are champions; creatures opt in
    pub const fn new(
        name: &'static str,
        faction: Faction,
        card_type: CardType,
        base_power: i32,
        ability_text: &'static str,
    ) -> Self {
        let is_champion = !matches!(card_type, CardType::Creature);
        CardDefinition {
            name,
            faction,
            card_type,
            base_power,
            is_champion,
            ability_text,
            ability: AbilityDescriptor::NONE,
        }
    }

    pub const fn champion(mut self) -> Self {
        self.is_champion = true;
        self
    }

    pub const fn allocate(mut self, power: u8, weakness: u8) -> Self {
        self.ability.allocation = Some(Allocation { power, weakness });
        self
    }

    pub const fn targeted(mut self, abilities: &'static [TargetedAbility]) -> Self {
        self.ability.targeted = abilities;
        self
    }

    pub const fn nullify(mut self) -> Self {
        self.ability.nullify = true;
        self
    }

    pub const fn seal_target(mut self, effect: SealEffect) -> Self {
        self.ability.seal_target = Some(effect);
        self
    }

    pub const fn global(mut self, effect: GlobalEffect) -> Self {
        self.ability.global = Some(effect);
        self
    }

    pub const fn haste(mut self) -> Self {
        self.ability.haste = true;
        self
    }

    pub const fn limbo_trigger(mut self) -> Self {
        self.ability.limbo_trigger = true;
        self
    }

    pub const fn activate(mut self) -> Self {
        self.ability.activate = true;
        self
    }

    pub const fn swap(mut self) -> Self {
        self.ability.swap = true;
        self
    }

    pub const fn ability_immune(mut self) -> Self {
        self.ability.ability_immune = true;
        self
    }

    pub const fn invulnerable_on_flip(mut self) -> Self {
        self.ability.invulnerable_on_flip = true;
        self
    }

    pub const fn cannot_battle(mut self) -> Self {
        self.ability.cannot_battle = true;
        self
    }

    pub const fn sacrifice_end_of_turn(mut self) -> Self {
        self.ability.sacrifice_end_of_turn = true;
        self
    }

    pub const fn lust_seal_effect(mut self) -> Self {
        self.ability.lust_seal_effect = true;
        self
    }

    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }
}

/// A drawn copy of a card
///
/// Created when a definition leaves the deck. Effective power is always
/// derived from the markers; nothing caches it.
#[derive(Debug, Clone, Serialize)]
pub struct CardInstance {
    pub id: CardId,
    pub def: &'static CardDefinition,
    pub hooks: CardHooks,
    pub owner: Side,
    pub location: Location,
    pub face_up: bool,
    pub power_markers: u32,
    pub weakness_markers: u32,
    /// Round-scoped, cleared at the start of Prep
    pub invincible: bool,
    /// Nullified for the seal being resolved
    pub suppressed: bool,
    pub marked_for_sacrifice: bool,
    pub marked_for_buff: bool,
    pub marked_by_expiring_effect: bool,
}

impl CardInstance {
    pub fn new(id: CardId, def: &'static CardDefinition, owner: Side, location: Location) -> Self {
        CardInstance {
            id,
            def,
            hooks: CardHooks::for_card(def.name),
            owner,
            location,
            face_up: false,
            power_markers: 0,
            weakness_markers: 0,
            invincible: false,
            suppressed: false,
            marked_for_sacrifice: false,
            marked_for_buff: false,
            marked_by_expiring_effect: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    /// base + power markers - weakness markers, may go negative
    pub fn effective_power(&self) -> i32 {
        self.def.base_power + self.power_markers as i32 - self.weakness_markers as i32
    }

    pub fn is_creature(&self) -> bool {
        self.def.is_creature()
    }

    pub fn is_in_play(&self) -> bool {
        self.location.is_in_play()
    }

    pub fn has_markers(&self) -> bool {
        self.power_markers > 0 || self.weakness_markers > 0
    }

    pub fn markers(&self, kind: MarkerKind) -> u32 {
        match kind {
            MarkerKind::Power => self.power_markers,
            MarkerKind::Weakness => self.weakness_markers,
        }
    }

    pub fn add_markers(&mut self, kind: MarkerKind, amount: u32) {
        match kind {
            MarkerKind::Power => self.power_markers += amount,
            MarkerKind::Weakness => self.weakness_markers += amount,
        }
    }

    /// Remove one marker, power first; returns the kind removed
    pub fn remove_one_marker(&mut self) -> Option<MarkerKind> {
        if self.power_markers > 0 {
            self.power_markers -= 1;
            Some(MarkerKind::Power)
        } else if self.weakness_markers > 0 {
            self.weakness_markers -= 1;
            Some(MarkerKind::Weakness)
        } else {
            None
        }
    }

    /// Drop all runtime state when the card leaves play
    pub fn reset_runtime(&mut self) {
        self.power_markers = 0;
        self.weakness_markers = 0;
        self.invincible = false;
        self.suppressed = false;
        self.marked_for_sacrifice = false;
        self.marked_for_buff = false;
        self.marked_by_expiring_effect = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::core::EntityId;

    fn instance(name: &str) -> CardInstance {
        let def = catalog::lookup(name).unwrap();
        CardInstance::new(EntityId::new(1), def, Side::Player, Location::Hand(Side::Player))
    }

    #[test]
    fn test_effective_power_formula() {
        let mut card = instance("Herald");
        assert_eq!(card.effective_power(), 5);

        card.add_markers(MarkerKind::Power, 2);
        card.add_markers(MarkerKind::Weakness, 9);
        assert_eq!(card.effective_power(), 5 + 2 - 9);
    }

    #[test]
    fn test_remove_marker_prefers_power() {
        let mut card = instance("Omega");
        card.add_markers(MarkerKind::Weakness, 1);
        card.add_markers(MarkerKind::Power, 1);

        assert_eq!(card.remove_one_marker(), Some(MarkerKind::Power));
        assert_eq!(card.remove_one_marker(), Some(MarkerKind::Weakness));
        assert_eq!(card.remove_one_marker(), None);
    }

    #[test]
    fn test_hooks_selected_at_creation() {
        let card = instance("Wild Wolf");
        assert!(card.hooks.battle.is_some());
        assert!(card.def.ability.haste);
    }

    #[test]
    fn test_reset_runtime() {
        let mut card = instance("Beta");
        card.invincible = true;
        card.power_markers = 4;
        card.marked_for_buff = true;
        card.reset_runtime();
        assert!(!card.invincible);
        assert_eq!(card.effective_power(), 6);
        assert!(!card.marked_for_buff);
    }
}
