//! The card catalog: 21 Light and 21 Dark definitions
//!
//! Ability text is for display. Behaviour comes from the descriptor flags set
//! here and from the hook registry in `hooks`.

use crate::config::GameConfig;
use crate::core::card::CardDefinition;
use crate::core::effects::{Effect, GlobalEffect, SealEffect, TargetType, TargetedAbility};
use crate::core::types::{Alignment, CardType, Faction};

const DESTROY_ANY: &[TargetedAbility] = &[TargetedAbility::new(Effect::Destroy, TargetType::Any)];
const DESTROY_CREATURE: &[TargetedAbility] =
    &[TargetedAbility::new(Effect::Destroy, TargetType::Creature)];
const RETURN_CREATURE: &[TargetedAbility] =
    &[TargetedAbility::new(Effect::Return, TargetType::Creature)];
const RETURN_CHAMPION: &[TargetedAbility] =
    &[TargetedAbility::new(Effect::Return, TargetType::Champion)];
const ABSORB_LIMBO: &[TargetedAbility] = &[TargetedAbility::new(
    Effect::SentinelAbsorb,
    TargetType::LimboCreature,
)];
const SLOTH_ACTIONS: &[TargetedAbility] = &[
    TargetedAbility::new(Effect::PlaceWeakness(3), TargetType::Creature),
    TargetedAbility::optional(Effect::DestroyCreatureWithWeakness, TargetType::Weakened),
];
const ENVY_WEAKEN: &[TargetedAbility] = &[TargetedAbility::new(
    Effect::PlaceWeakness(3),
    TargetType::CreaturePowerGte,
)];
const FLEDGELING_GIFT: &[TargetedAbility] =
    &[TargetedAbility::new(Effect::PlacePower(3), TargetType::Creature)];

pub static LIGHT_POOL: [CardDefinition; 21] = [
    CardDefinition::new(
        "The Spinner",
        Faction::Light,
        CardType::Avatar,
        9,
        "Champion. Flip: +1 Power per Acolyte in play. Activate: Win if 4 Acolytes in play and at least one Champion on a Seal.",
    )
    .activate(),
    CardDefinition::new(
        "The Allotter",
        Faction::Light,
        CardType::Avatar,
        9,
        "Champion. Flip: Destroy any card on any Seal. Activate: Destroy one Marker of any type.",
    )
    .targeted(DESTROY_ANY)
    .activate(),
    CardDefinition::new(
        "Prophet",
        Faction::Light,
        CardType::Avatar,
        9,
        "Champion. While in play, Purified Seals cannot be Corrupted.",
    ),
    CardDefinition::new(
        "The Inevitable",
        Faction::Light,
        CardType::Avatar,
        9,
        "Champion. After destroying a creature in battle, you may destroy another card or Marker in play.",
    ),
    CardDefinition::new(
        "Saint Michael",
        Faction::Light,
        CardType::Avatar,
        10,
        "Champion. Activate: If you control 5+ Seals with Champions, you win. Final Act: In Limbo, move to Graveyard to destroy a card that battled this turn.",
    )
    .activate()
    .limbo_trigger(),
    CardDefinition::new(
        "Martyr",
        Faction::Light,
        CardType::Avatar,
        9,
        "Champion. When placed in Limbo, Purify any one Neutral Seal without a Champion.",
    )
    .limbo_trigger(),
    CardDefinition::new(
        "The Almighty",
        Faction::Light,
        CardType::God,
        15,
        "Champion. Flip: Purify any Corrupted Seal without a Champion. Activate: Destroy all instances of one marker type (all Power, all Weakness, etc.).",
    )
    .seal_target(SealEffect::Purify)
    .activate(),
    CardDefinition::new(
        "Archangel",
        Faction::Celestial,
        CardType::Creature,
        2,
        "Flip: Reveal enemy card and Nullify its Flip ability.",
    )
    .nullify(),
    CardDefinition::new(
        "Cherubim",
        Faction::Celestial,
        CardType::Creature,
        4,
        "Flip: Return target creature in play to owner's deck.",
    )
    .targeted(RETURN_CREATURE),
    CardDefinition::new(
        "Fallen One",
        Faction::Celestial,
        CardType::Creature,
        6,
        "Haste: Resolve battle before Flip. Final Act: From Limbo, move to Graveyard to Nullify an enemy ability.",
    )
    .haste()
    .limbo_trigger(),
    CardDefinition::new(
        "Herald",
        Faction::Celestial,
        CardType::Creature,
        5,
        "Flip: Gain Power Markers equal to the top card of your deck.",
    ),
    CardDefinition::new(
        "Nephilim",
        Faction::Celestial,
        CardType::Creature,
        3,
        "Flip: Battle invulnerability this round. Activate: Choose a Seal. Enemy cannot change influence of that Seal until end of round.",
    )
    .invulnerable_on_flip()
    .activate(),
    CardDefinition::new(
        "Seraphim",
        Faction::Celestial,
        CardType::Creature,
        7,
        "Champion. Passive: While on a Seal, other Celestials are immune to creature abilities. Activate: Destroy one Marker.",
    )
    .champion()
    .activate(),
    CardDefinition::new(
        "Thrones",
        Faction::Celestial,
        CardType::Creature,
        1,
        "Flip: Change Influence of empty Seal.",
    )
    .seal_target(SealEffect::Influence),
    CardDefinition::new(
        "Alpha",
        Faction::Lycan,
        CardType::Creature,
        7,
        "Champion. Haste: Resolves combat before Flip. Effect: Place a +2 Power Marker on this creature after destroying an Enemy creature in battle.",
    )
    .champion()
    .haste(),
    CardDefinition::new(
        "Beta",
        Faction::Lycan,
        CardType::Creature,
        6,
        "Flip: Cannot be destroyed by battle this turn. Action: Place a +2 Power Marker on any adjacent creature.",
    )
    .invulnerable_on_flip(),
    CardDefinition::new(
        "Omega",
        Faction::Lycan,
        CardType::Creature,
        5,
        "Flip: Gain a +1 Power Marker for each Lycan in play and in Limbo.",
    ),
    CardDefinition::new(
        "Sentinel",
        Faction::Lycan,
        CardType::Creature,
        4,
        "Flip: Choose a creature in Limbo, place Power Markers on this creature equal to that creature's Power Value.",
    )
    .targeted(ABSORB_LIMBO),
    CardDefinition::new(
        "Delta",
        Faction::Lycan,
        CardType::Creature,
        3,
        "Flip: Place a +1 Power Marker on up to any 3 creatures in play. Activate: Sacrifice this creature at the end of the round and place a +3 Power Marker on any creature.",
    )
    .allocate(3, 0)
    .activate(),
    CardDefinition::new(
        "Luna",
        Faction::Lycan,
        CardType::Creature,
        2,
        "Final Act: While in Limbo, if your Enemy changes the Influence of a Seal without a Champion, you may move Luna into the Graveyard to Nullify that action.",
    )
    .limbo_trigger(),
    CardDefinition::new(
        "Wild Wolf",
        Faction::Lycan,
        CardType::Creature,
        1,
        "Haste: Resolves battle before Flip abilities. Effect: Any creature that does battle with Wild Wolf is destroyed at the end of the round.",
    )
    .haste(),
];

pub static DARK_POOL: [CardDefinition; 21] = [
    CardDefinition::new(
        "Death",
        Faction::Darkness,
        CardType::Horseman,
        9,
        "Flip: Target card loses 5 Power.",
    )
    .allocate(0, 5),
    CardDefinition::new(
        "Famine",
        Faction::Darkness,
        CardType::Horseman,
        9,
        "Flip: Destroy any card in play.",
    )
    .targeted(DESTROY_ANY),
    CardDefinition::new(
        "Pestilence",
        Faction::Darkness,
        CardType::Horseman,
        9,
        "Flip: All enemy creatures lose 2 Power.",
    )
    .allocate(0, 2),
    CardDefinition::new(
        "War",
        Faction::Darkness,
        CardType::Horseman,
        9,
        "Post-Combat: Gain 3 Power Markers after destroying a creature.",
    ),
    CardDefinition::new(
        "Lilith",
        Faction::Darkness,
        CardType::Avatar,
        10,
        "Win Con: Activate with 7 Seals.",
    ),
    CardDefinition::new(
        "Hades",
        Faction::Darkness,
        CardType::Avatar,
        9,
        "Flip: Gain 2 Power Markers.",
    )
    .allocate(2, 0),
    CardDefinition::new(
        "The Destroyer",
        Faction::Darkness,
        CardType::God,
        15,
        "Flip: Corrupt un-championed Light Seals.",
    )
    .global(GlobalEffect::CorruptUndefended),
    CardDefinition::new(
        "Wrath",
        Faction::Daemon,
        CardType::Creature,
        7,
        "Champion. Flip: Place a -1 Weakness Marker on each of your enemy's creatures. Passive: Wrath cannot be destroyed in battle by any creature with a Weakness Marker.",
    )
    .champion(),
    CardDefinition::new(
        "Pride",
        Faction::Daemon,
        CardType::Creature,
        6,
        "Flip: Place a -3 Weakness Marker on the creature across from Pride. Action: Place a +2 Power Marker on any adjacent creature.",
    ),
    CardDefinition::new(
        "Greed",
        Faction::Daemon,
        CardType::Creature,
        5,
        "Flip: Cannot be destroyed by battle this turn. Activate: Transfer all Power Markers in play to this creature.",
    )
    .invulnerable_on_flip()
    .activate(),
    CardDefinition::new(
        "Sloth",
        Faction::Daemon,
        CardType::Creature,
        4,
        "Passive: Unaffected by abilities. Flip: Place a -3 Weakness Marker on any creature in play. Action: Destroy any creature in play with Weakness Markers.",
    )
    .ability_immune()
    .targeted(SLOTH_ACTIONS),
    CardDefinition::new(
        "Envy",
        Faction::Daemon,
        CardType::Creature,
        3,
        "Flip: Place a -3 Weakness Marker on any creature with Power Value equal to or greater than this creature.",
    )
    .targeted(ENVY_WEAKEN),
    CardDefinition::new(
        "Lust",
        Faction::Daemon,
        CardType::Creature,
        2,
        "Flip: Both Enemy and Ally sacrifice a creature at this position (including Lust). Effect: After sacrifice, if the Seal has no Champion, you may change the Influence of the seal.",
    )
    .lust_seal_effect(),
    CardDefinition::new(
        "Gluttony",
        Faction::Daemon,
        CardType::Creature,
        1,
        "Flip: Transfer all Power Markers in play to this creature.",
    )
    .global(GlobalEffect::SiphonPowerOnly),
    CardDefinition::new(
        "Lord",
        Faction::Vampyre,
        CardType::Creature,
        7,
        "Champion. Flip: Place any Champion on top of its owner's deck. Activate: Place a +1 Power Marker on Lord for each Vampyre in play.",
    )
    .champion()
    .targeted(RETURN_CHAMPION)
    .activate(),
    CardDefinition::new(
        "Duke",
        Faction::Vampyre,
        CardType::Creature,
        6,
        "Flip: Place a creature in play on top of that player's deck. Continuous: While Duke is in Play, your creatures are considered Vampyre.",
    ),
    CardDefinition::new(
        "Elder",
        Faction::Vampyre,
        CardType::Creature,
        5,
        "Haste: Resolve battle before Flip abilities. Effect: Any creature that battles Elder is placed on top of its owner's deck.",
    )
    .haste(),
    CardDefinition::new(
        "Noble",
        Faction::Vampyre,
        CardType::Creature,
        4,
        "Flip: Destroy any one creature in play. End of Turn: At the end of the turn, place a +2 Power Marker on this creature.",
    )
    .targeted(DESTROY_CREATURE),
    CardDefinition::new(
        "Regent",
        Faction::Vampyre,
        CardType::Creature,
        3,
        "Flip: Change the Influence of any Seal without a Champion.",
    )
    .seal_target(SealEffect::Influence),
    CardDefinition::new(
        "Baron",
        Faction::Vampyre,
        CardType::Creature,
        2,
        "Flip: Nullify any creature's Flip ability at this position. Swap: Swap this creature with any creature in Limbo you control.",
    )
    .nullify()
    .swap(),
    CardDefinition::new(
        "Fledgeling",
        Faction::Vampyre,
        CardType::Creature,
        1,
        "Passive: Cannot battle or be battled. Flip: While this creature is in play, place a +3 Power Marker on any creature in play. Sacrifice: Sacrifice this creature at the end of the turn.",
    )
    .targeted(FLEDGELING_GIFT)
    .cannot_battle()
    .sacrifice_end_of_turn(),
];

/// Definitions that make up an allegiance's pool
pub fn pool(alignment: Alignment) -> &'static [CardDefinition] {
    match alignment {
        Alignment::Dark => &DARK_POOL,
        _ => &LIGHT_POOL,
    }
}

/// Find a definition by exact name in either pool
pub fn lookup(name: &str) -> Option<&'static CardDefinition> {
    LIGHT_POOL.iter().chain(DARK_POOL.iter()).find(|def| def.name == name)
}

/// Unshuffled deck list for an allegiance
///
/// Avatars and Gods appear `unique_copies` times, everything else
/// `creature_copies` times. The caller shuffles with the game RNG.
pub fn build_deck(alignment: Alignment, config: &GameConfig) -> Vec<&'static CardDefinition> {
    let mut deck = Vec::new();
    for def in pool(alignment) {
        let copies = if def.card_type.is_unique() {
            config.unique_copies
        } else {
            config.creature_copies
        };
        for _ in 0..copies {
            deck.push(def);
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_sizes() {
        assert_eq!(LIGHT_POOL.len(), 21);
        assert_eq!(DARK_POOL.len(), 21);
    }

    #[test]
    fn test_champion_flags() {
        for name in ["Seraphim", "Alpha", "Wrath", "Lord", "Death", "Prophet", "The Destroyer"] {
            assert!(lookup(name).unwrap().is_champion, "{name} should be a champion");
        }
        for name in ["Beta", "Archangel", "Fledgeling", "Sloth"] {
            assert!(!lookup(name).unwrap().is_champion, "{name} should not be a champion");
        }
    }

    #[test]
    fn test_deck_composition() {
        let config = GameConfig::default();
        let light = build_deck(Alignment::Light, &config);
        // 7 unique Avatars/Gods, 14 creatures x 3
        assert_eq!(light.len(), 7 + 14 * 3);

        let dark = build_deck(Alignment::Dark, &config);
        // Lilith, Hades and The Destroyer once; Horsemen and creatures x 3
        assert_eq!(dark.len(), 3 + 18 * 3);
        assert_eq!(dark.iter().filter(|d| d.name == "The Destroyer").count(), 1);
        assert_eq!(dark.iter().filter(|d| d.name == "War").count(), 3);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("Nobody").is_none());
    }
}
