//! The seven seals

use crate::core::{Alignment, CardId, SealIndex, Side};
use serde::Serialize;

/// One contested seal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seal {
    pub index: SealIndex,
    pub alignment: Alignment,
    /// Permanent occupant after ascension
    pub champion: Option<CardId>,
    /// Side barred from changing this seal's influence until end of round
    pub locked_against: Option<Side>,
}

impl Seal {
    pub fn new(index: SealIndex) -> Self {
        Seal {
            index,
            alignment: Alignment::Neutral,
            champion: None,
            locked_against: None,
        }
    }

    pub fn is_defended(&self) -> bool {
        self.champion.is_some()
    }

    pub fn is_locked_against(&self, side: Side) -> bool {
        self.locked_against == Some(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seal_is_neutral() {
        let seal = Seal::new(4);
        assert_eq!(seal.alignment, Alignment::Neutral);
        assert!(!seal.is_defended());
        assert!(!seal.is_locked_against(Side::Player));
    }
}
