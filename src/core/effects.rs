//! Card effects and the declarative ability descriptor
//!
//! Every capability a card has is a flag or a typed field here. The engine
//! never looks at ability text to decide what a card does.

use crate::core::types::MarkerKind;
use serde::{Deserialize, Serialize};

/// Effect applied to a single target card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Move the target to its owner's Limbo (detaching it from a seal if it
    /// is a champion)
    Destroy,
    /// Remove one marker, power before weakness
    DestroyMarker,
    /// Remove one marker if the target has any, otherwise destroy it
    DestroyOrMarker,
    /// Strip the target and put its definition on top of its owner's deck
    Return,
    /// Add power markers
    PlacePower(u8),
    /// Add weakness markers
    PlaceWeakness(u8),
    /// Source gains power markers equal to the target's base power (target in Limbo)
    SentinelAbsorb,
    /// Destroy the target, then the source moves to its owner's Graveyard
    SaintMichaelDestroy,
    /// Destroy a target that already carries weakness markers
    DestroyCreatureWithWeakness,
}

impl Effect {
    /// Effects that still land on an invincible target
    pub fn bypasses_invincibility(self) -> bool {
        matches!(self, Effect::DestroyMarker | Effect::Return)
    }

    /// Effects that help the card they land on
    pub fn is_beneficial(self) -> bool {
        matches!(self, Effect::PlacePower(_) | Effect::SentinelAbsorb)
    }

    pub fn label(self) -> &'static str {
        match self {
            Effect::Destroy => "destroy",
            Effect::DestroyMarker => "destroy_marker",
            Effect::DestroyOrMarker => "destroy_or_marker",
            Effect::Return => "return",
            Effect::PlacePower(_) => "place_power",
            Effect::PlaceWeakness(_) => "place_weakness",
            Effect::SentinelAbsorb => "sentinel_absorb",
            Effect::SaintMichaelDestroy => "saint_michael_destroy",
            Effect::DestroyCreatureWithWeakness => "destroy_creature_with_weakness",
        }
    }
}

/// Legal target set for a targeted ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    /// Any card in play
    Any,
    /// Creature-type cards in play that are not immune to the source
    Creature,
    /// Seal champions
    Champion,
    /// Creatures in either Limbo
    LimboCreature,
    /// Creatures in play with effective power at least the source's
    CreaturePowerGte,
    /// Cards that battled this round and are still in play
    Battled,
    /// Creatures in play carrying weakness markers
    Weakened,
    /// Cards in play carrying any marker
    Marked,
}

/// One targeted ability of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetedAbility {
    pub effect: Effect,
    pub target: TargetType,
    /// Whether the owner may decline
    pub optional: bool,
}

impl TargetedAbility {
    pub const fn new(effect: Effect, target: TargetType) -> Self {
        TargetedAbility {
            effect,
            target,
            optional: false,
        }
    }

    pub const fn optional(effect: Effect, target: TargetType) -> Self {
        TargetedAbility {
            effect,
            target,
            optional: true,
        }
    }
}

/// Board-wide abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalEffect {
    /// Zero every other face-up card's markers; the source gains the totals
    SiphonAll,
    /// Same as SiphonAll, power markers only
    SiphonPowerOnly,
    /// Every champion-less Light seal is claimed Dark
    CorruptUndefended,
}

/// Seal-targeted abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SealEffect {
    /// Set a champion-less seal to the owner's allegiance
    Influence,
    /// Turn a champion-less Dark seal Light
    Purify,
    /// Turn a champion-less Neutral seal Light
    PurifyNeutral,
}

/// Marker allocation on flip: N power and M weakness markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Allocation {
    pub power: u8,
    pub weakness: u8,
}

impl Allocation {
    pub fn is_empty(&self) -> bool {
        self.power == 0 && self.weakness == 0
    }

    pub fn next_kind(&self) -> Option<MarkerKind> {
        if self.power > 0 {
            Some(MarkerKind::Power)
        } else if self.weakness > 0 {
            Some(MarkerKind::Weakness)
        } else {
            None
        }
    }
}

/// Declarative description of what a card can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AbilityDescriptor {
    pub allocation: Option<Allocation>,
    pub targeted: &'static [TargetedAbility],
    pub nullify: bool,
    pub seal_target: Option<SealEffect>,
    pub global: Option<GlobalEffect>,
    pub haste: bool,
    pub limbo_trigger: bool,
    pub activate: bool,
    pub swap: bool,
    pub ability_immune: bool,
    /// Battle invulnerability for the round on flip
    pub invulnerable_on_flip: bool,
    pub cannot_battle: bool,
    pub sacrifice_end_of_turn: bool,
    pub lust_seal_effect: bool,
}

impl AbilityDescriptor {
    pub const NONE: AbilityDescriptor = AbilityDescriptor {
        allocation: None,
        targeted: &[],
        nullify: false,
        seal_target: None,
        global: None,
        haste: false,
        limbo_trigger: false,
        activate: false,
        swap: false,
        ability_immune: false,
        invulnerable_on_flip: false,
        cannot_battle: false,
        sacrifice_end_of_turn: false,
        lust_seal_effect: false,
    };
}
