//! Strongly-typed wrappers for game concepts
//!
//! Sides, allegiances, factions and card locations get their own types so a
//! seat is never confused with an allegiance and a seal index is never
//! confused with a battlefield slot of a particular side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of seals (and battlefield slots per side)
pub const SEAL_COUNT: usize = 7;

/// Index of a seal, 0..SEAL_COUNT. Battlefield slot `i` of either side sits
/// in front of seal `i`.
pub type SealIndex = usize;

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Enemy];

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Dense index for per-side arrays
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Enemy => write!(f, "Enemy"),
        }
    }
}

/// Influence over a seal, also used for a side's allegiance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    Light,
    Dark,
    #[default]
    Neutral,
}

impl Alignment {
    /// The other allegiance (Neutral stays Neutral)
    pub fn opposite(self) -> Alignment {
        match self {
            Alignment::Light => Alignment::Dark,
            Alignment::Dark => Alignment::Light,
            Alignment::Neutral => Alignment::Neutral,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Light => write!(f, "Light"),
            Alignment::Dark => write!(f, "Dark"),
            Alignment::Neutral => write!(f, "Neutral"),
        }
    }
}

impl std::str::FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Alignment::Light),
            "dark" => Ok(Alignment::Dark),
            _ => Err(format!("invalid allegiance '{s}' (expected: light, dark)")),
        }
    }
}

/// Card faction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Light,
    Celestial,
    Lycan,
    Darkness,
    Daemon,
    Vampyre,
    Angel,
}

/// Card type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Avatar,
    God,
    Horseman,
    Creature,
}

impl CardType {
    /// Avatars and Gods appear once per deck
    pub fn is_unique(self) -> bool {
        matches!(self, CardType::Avatar | CardType::God)
    }
}

/// Marker kinds placed on cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Power,
    Weakness,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Power => write!(f, "Power"),
            MarkerKind::Weakness => write!(f, "Weakness"),
        }
    }
}

/// Where a card instance currently lives
///
/// Every instance is in exactly one location. Decks hold definitions, not
/// instances, so a card going back to a deck stops existing as an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Hand(Side),
    Battlefield(Side, SealIndex),
    Champion(SealIndex),
    Limbo(Side),
    Graveyard(Side),
}

impl Location {
    /// Battlefield slots and seal champion slots count as "in play"
    pub fn is_in_play(self) -> bool {
        matches!(self, Location::Battlefield(..) | Location::Champion(_))
    }

    /// Seal this location is attached to, if any
    pub fn seal(self) -> Option<SealIndex> {
        match self {
            Location::Battlefield(_, idx) | Location::Champion(idx) => Some(idx),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Hand(side) => write!(f, "{side} hand"),
            Location::Battlefield(side, idx) => write!(f, "{side} slot {}", idx + 1),
            Location::Champion(idx) => write!(f, "champion of Seal {}", idx + 1),
            Location::Limbo(side) => write!(f, "{side} Limbo"),
            Location::Graveyard(side) => write!(f, "{side} Graveyard"),
        }
    }
}
