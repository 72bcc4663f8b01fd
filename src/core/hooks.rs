//! Card-identity hook registry
//!
//! Named cards with bespoke rules get their behaviour from a `CardHooks`
//! value chosen once, when the instance is created. The engine dispatches on
//! these tags and never compares card names while resolving.

use crate::core::types::Faction;
use serde::Serialize;

/// Extra work a card does when it flips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlipHook {
    /// +1 power per card of `faction` in play (and in both Limbos when
    /// `include_limbo`)
    FactionPresence {
        faction: Faction,
        include_limbo: bool,
    },
    /// Gain power equal to the base power of the top card of the own deck
    DeckPeek,
    /// Power markers on the same-side cards in adjacent slots
    NeighborBuff(u8),
    /// Weakness markers on the opposing card in this seal
    WeakenOpposite(u8),
    /// Weakness markers on every enemy card in play
    WeakenEnemies(u8),
    /// The card and the opposing card are both sacrificed
    MutualSacrifice,
    /// The opposing card goes back on top of its owner's deck
    ReturnOpposing,
}

/// Behaviour that runs every round the card acts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivateHook {
    /// Lock a seal against the enemy until end of round
    SealLock,
    /// Pull every power marker in play onto this card
    SiphonPower,
    /// Remove all markers of one chosen kind from play
    PurgeMarkerType,
    /// Remove one marker from a marked card
    DestroyMarker,
    /// Owner wins with champions on this many seals
    ChampionSealVictory { seals: usize },
    /// Owner wins with this many Light-faction cards in play and a champion
    AcolyteVictory { acolytes: usize },
    /// +1 power per Vampyre in play
    VampyreCount,
    /// Offer to sacrifice at end of round for a power grant
    DeltaSacrifice,
}

/// Behaviour tied to residence in Limbo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LimboHook {
    /// On entering Limbo, purify a Neutral seal without champion
    PurifyNeutral,
    /// Triggered in Prep: destroy a card that battled last round
    StrikeBattled,
    /// May cancel an enemy card's ability
    NullifyAbility,
    /// May cancel an enemy influence change on a champion-less seal
    NullifyInfluence,
}

impl LimboHook {
    /// Hooks a player can fire with a Prep command
    pub fn is_manual(self) -> bool {
        matches!(self, LimboHook::PurifyNeutral | LimboHook::StrikeBattled)
    }
}

/// Applies to whatever the card battles, win or lose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BattleHook {
    /// The opponent is destroyed at end of round
    ExpireOpponent,
    /// The opponent, if it survives, returns to its owner's deck
    ReturnOpponent,
}

/// Applies after the card destroys something in battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PostCombatHook {
    GainPower(u8),
    /// May destroy a marker, or a card without markers
    SecondStrike,
}

/// Settled during the end-of-round pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndOfRoundHook {
    GainPower(u8),
    /// After the sacrifice, the owner grants power markers to a creature
    SacrificeBuff(u8),
}

/// Continuous effects while the card is in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PassiveHook {
    /// Light seals cannot be turned Dark
    WardLightSeals,
    /// While a champion, other same-side Celestials are immune to creature abilities
    ShieldCelestials,
    /// Cannot be destroyed in battle by a card carrying weakness markers
    ShieldFromWeakened,
    /// The owner's creatures count as Vampyre
    VampyreKinship,
}

/// Every hook point of one card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CardHooks {
    pub flip: &'static [FlipHook],
    pub activate: Option<ActivateHook>,
    pub limbo: Option<LimboHook>,
    pub battle: Option<BattleHook>,
    pub post_combat: Option<PostCombatHook>,
    pub end_of_round: Option<EndOfRoundHook>,
    pub passive: Option<PassiveHook>,
}

const SPINNER_FLIP: &[FlipHook] = &[FlipHook::FactionPresence {
    faction: Faction::Light,
    include_limbo: false,
}];
const OMEGA_FLIP: &[FlipHook] = &[FlipHook::FactionPresence {
    faction: Faction::Lycan,
    include_limbo: true,
}];
const HERALD_FLIP: &[FlipHook] = &[FlipHook::DeckPeek];
const BETA_FLIP: &[FlipHook] = &[FlipHook::NeighborBuff(2)];
const PRIDE_FLIP: &[FlipHook] = &[FlipHook::WeakenOpposite(3), FlipHook::NeighborBuff(2)];
const WRATH_FLIP: &[FlipHook] = &[FlipHook::WeakenEnemies(1)];
const LUST_FLIP: &[FlipHook] = &[FlipHook::MutualSacrifice];
const DUKE_FLIP: &[FlipHook] = &[FlipHook::ReturnOpposing];

impl CardHooks {
    /// Registry lookup by card identity
    pub fn for_card(name: &str) -> CardHooks {
        let none = CardHooks::default();
        match name {
            "The Spinner" => CardHooks {
                flip: SPINNER_FLIP,
                activate: Some(ActivateHook::AcolyteVictory { acolytes: 4 }),
                ..none
            },
            "The Allotter" | "Seraphim" => CardHooks {
                activate: Some(ActivateHook::DestroyMarker),
                passive: (name == "Seraphim").then_some(PassiveHook::ShieldCelestials),
                ..none
            },
            "Prophet" => CardHooks {
                passive: Some(PassiveHook::WardLightSeals),
                ..none
            },
            "The Inevitable" => CardHooks {
                post_combat: Some(PostCombatHook::SecondStrike),
                ..none
            },
            "Saint Michael" => CardHooks {
                activate: Some(ActivateHook::ChampionSealVictory { seals: 5 }),
                limbo: Some(LimboHook::StrikeBattled),
                ..none
            },
            "Martyr" => CardHooks {
                limbo: Some(LimboHook::PurifyNeutral),
                ..none
            },
            "The Almighty" => CardHooks {
                activate: Some(ActivateHook::PurgeMarkerType),
                ..none
            },
            "Fallen One" => CardHooks {
                limbo: Some(LimboHook::NullifyAbility),
                ..none
            },
            "Herald" => CardHooks {
                flip: HERALD_FLIP,
                ..none
            },
            "Nephilim" => CardHooks {
                activate: Some(ActivateHook::SealLock),
                ..none
            },
            "Alpha" => CardHooks {
                post_combat: Some(PostCombatHook::GainPower(2)),
                ..none
            },
            "Beta" => CardHooks {
                flip: BETA_FLIP,
                ..none
            },
            "Omega" => CardHooks {
                flip: OMEGA_FLIP,
                ..none
            },
            "Delta" => CardHooks {
                activate: Some(ActivateHook::DeltaSacrifice),
                end_of_round: Some(EndOfRoundHook::SacrificeBuff(3)),
                ..none
            },
            "Luna" => CardHooks {
                limbo: Some(LimboHook::NullifyInfluence),
                ..none
            },
            "Wild Wolf" => CardHooks {
                battle: Some(BattleHook::ExpireOpponent),
                ..none
            },
            "War" => CardHooks {
                post_combat: Some(PostCombatHook::GainPower(3)),
                ..none
            },
            "Wrath" => CardHooks {
                flip: WRATH_FLIP,
                passive: Some(PassiveHook::ShieldFromWeakened),
                ..none
            },
            "Pride" => CardHooks {
                flip: PRIDE_FLIP,
                ..none
            },
            "Greed" => CardHooks {
                activate: Some(ActivateHook::SiphonPower),
                ..none
            },
            "Lust" => CardHooks {
                flip: LUST_FLIP,
                ..none
            },
            "Lord" => CardHooks {
                activate: Some(ActivateHook::VampyreCount),
                ..none
            },
            "Duke" => CardHooks {
                flip: DUKE_FLIP,
                passive: Some(PassiveHook::VampyreKinship),
                ..none
            },
            "Elder" => CardHooks {
                battle: Some(BattleHook::ReturnOpponent),
                ..none
            },
            "Noble" => CardHooks {
                end_of_round: Some(EndOfRoundHook::GainPower(2)),
                ..none
            },
            _ => none,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_named_cards() {
        let seraphim = CardHooks::for_card("Seraphim");
        assert_eq!(seraphim.activate, Some(ActivateHook::DestroyMarker));
        assert_eq!(seraphim.passive, Some(PassiveHook::ShieldCelestials));

        let allotter = CardHooks::for_card("The Allotter");
        assert_eq!(allotter.passive, None);

        let pride = CardHooks::for_card("Pride");
        assert_eq!(pride.flip.len(), 2);
    }

    #[test]
    fn test_unknown_card_has_no_hooks() {
        assert_eq!(CardHooks::for_card("Archangel"), CardHooks::default());
    }

    #[test]
    fn test_manual_limbo_hooks() {
        assert!(LimboHook::PurifyNeutral.is_manual());
        assert!(LimboHook::StrikeBattled.is_manual());
        assert!(!LimboHook::NullifyAbility.is_manual());
        assert!(!LimboHook::NullifyInfluence.is_manual());
    }
}
