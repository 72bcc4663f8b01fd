//! Game phases and seal-resolution steps

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the game as shown to observers
///
/// `CounterAllocation`, `AbilityTargeting`, `SealTargeting` and
/// `DeltaBuffTargeting` are interrupts entered from inside Resolution (or
/// Prep, for Limbo triggers) while a decision is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Setup,
    Prep,
    Resolution,
    CounterAllocation,
    AbilityTargeting,
    SealTargeting,
    DeltaBuffTargeting,
    GameOver,
}

impl Phase {
    /// Interrupt states that must be left before combat continues
    pub fn is_interrupt(self) -> bool {
        matches!(
            self,
            Phase::CounterAllocation
                | Phase::AbilityTargeting
                | Phase::SealTargeting
                | Phase::DeltaBuffTargeting
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "Setup",
            Phase::Prep => "Prep",
            Phase::Resolution => "Resolution",
            Phase::CounterAllocation => "Counter Allocation",
            Phase::AbilityTargeting => "Ability Targeting",
            Phase::SealTargeting => "Seal Targeting",
            Phase::DeltaBuffTargeting => "Delta Buff Targeting",
            Phase::GameOver => "Game Over",
        };
        write!(f, "{name}")
    }
}

/// Steps of the per-seal protocol, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SealStep {
    Haste,
    Flip,
    Abilities,
    Combat,
    Siege,
    Ascension,
}

impl SealStep {
    pub fn next(self) -> Option<SealStep> {
        match self {
            SealStep::Haste => Some(SealStep::Flip),
            SealStep::Flip => Some(SealStep::Abilities),
            SealStep::Abilities => Some(SealStep::Combat),
            SealStep::Combat => Some(SealStep::Siege),
            SealStep::Siege => Some(SealStep::Ascension),
            SealStep::Ascension => None,
        }
    }
}

impl fmt::Display for SealStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SealStep::Haste => "Haste Strike",
            SealStep::Flip => "The Flip",
            SealStep::Abilities => "Abilities",
            SealStep::Combat => "Combat",
            SealStep::Siege => "Siege",
            SealStep::Ascension => "Ascension",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        let mut step = SealStep::Haste;
        let mut count = 1;
        while let Some(next) = step.next() {
            step = next;
            count += 1;
        }
        assert_eq!(step, SealStep::Ascension);
        assert_eq!(count, 6);
    }

    #[test]
    fn test_interrupts() {
        assert!(Phase::SealTargeting.is_interrupt());
        assert!(!Phase::Resolution.is_interrupt());
        assert_eq!(
            serde_json::to_string(&Phase::DeltaBuffTargeting).unwrap(),
            "\"DELTA_BUFF_TARGETING\""
        );
    }
}
