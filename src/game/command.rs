//! Commands from an external driver
//!
//! A `Command` is what a human (or a UI standing in for one) sends to answer
//! the pending `Decision`. Commands have a short text form so they can come
//! from a terminal or a test script:
//!
//! ```text
//! light | dark           choose allegiance
//! place <card> <seal>    put a hand card into the slot of seal 1-7
//! end                    end Prep
//! trigger <card>         trigger a Limbo card
//! mark <card>            place the next allocation marker
//! done                   finish the allocation
//! target <card>          pick an ability target
//! seal <n>               pick seal 1-7
//! yes | no               answer a confirmation
//! power | weakness       marker type for The Almighty
//! skip                   force-skip the pending decision
//! ```
//!
//! Seal numbers in text are 1-based like the log; `Command` holds 0-based
//! indices.

use crate::core::{Alignment, CardId, EntityId, MarkerKind, SealIndex, SEAL_COUNT};
use crate::game::{Decision, DecisionContext, PrepAction, Response};
use crate::SealsError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SelectAlignment(Alignment),
    PlaceCard { card: CardId, slot: SealIndex },
    EndPrep,
    TriggerLimboAbility(CardId),
    AllocateMarker(CardId),
    FinishAllocation,
    SelectAbilityTarget(CardId),
    SelectSeal(SealIndex),
    ResolveDecision(bool),
    ResolveMarkerType(MarkerKind),
    ForceSkip,
}

/// Outcome of offering a command to a pending decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Answered(Response),
    /// The command doesn't fit the decision or names an illegal option
    Ignored,
    /// Force-skip while Fallen One's nullify is being decided
    SkipRefused,
}

impl Command {
    /// Translate the command into a legal answer to `decision`
    pub fn answer(&self, decision: &Decision) -> CommandOutcome {
        if *self == Command::ForceSkip {
            if decision.context() == Some(DecisionContext::FallenOne) {
                return CommandOutcome::SkipRefused;
            }
            return CommandOutcome::Answered(decision.default_response());
        }
        let response = match (self, decision) {
            (Command::SelectAlignment(a), Decision::ChooseAlignment) => Response::Alignment(*a),
            (Command::PlaceCard { card, slot }, Decision::Prep(_)) => {
                Response::Prep(PrepAction::Place {
                    card: *card,
                    slot: *slot,
                })
            }
            (Command::EndPrep, Decision::Prep(_)) => Response::Prep(PrepAction::EndPrep),
            (Command::TriggerLimboAbility(card), Decision::Prep(_)) => {
                Response::Prep(PrepAction::TriggerLimbo(*card))
            }
            (Command::AllocateMarker(card), Decision::AllocateMarker(_)) => {
                Response::Marker(Some(*card))
            }
            (Command::FinishAllocation, Decision::AllocateMarker(_)) => Response::Marker(None),
            (Command::SelectAbilityTarget(card), Decision::ChooseTarget(_)) => {
                Response::Target(Some(*card))
            }
            (Command::SelectSeal(idx), Decision::ChooseSeal(_)) => Response::Seal(Some(*idx)),
            (Command::ResolveDecision(yes), Decision::Confirm(_)) => Response::Confirm(*yes),
            (Command::ResolveMarkerType(kind), Decision::ChooseMarkerKind { .. }) => {
                Response::MarkerKind(*kind)
            }
            _ => return CommandOutcome::Ignored,
        };
        if decision.accepts(&response) {
            CommandOutcome::Answered(response)
        } else {
            CommandOutcome::Ignored
        }
    }
}

fn parse_card(word: Option<&str>, line: &str) -> Result<CardId, SealsError> {
    word.and_then(|w| w.parse::<u32>().ok())
        .map(EntityId::new)
        .ok_or_else(|| SealsError::InvalidCommand(format!("'{line}' needs a card id")))
}

fn parse_seal(word: Option<&str>, line: &str) -> Result<SealIndex, SealsError> {
    word.and_then(|w| w.parse::<usize>().ok())
        .filter(|n| (1..=SEAL_COUNT).contains(n))
        .map(|n| n - 1)
        .ok_or_else(|| {
            SealsError::InvalidCommand(format!("'{line}' needs a seal number 1-{SEAL_COUNT}"))
        })
}

impl FromStr for Command {
    type Err = SealsError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(SealsError::InvalidCommand("empty command".to_string()));
        };
        let command = match verb.to_ascii_lowercase().as_str() {
            "light" => Command::SelectAlignment(Alignment::Light),
            "dark" => Command::SelectAlignment(Alignment::Dark),
            "place" | "p" => {
                let card = parse_card(words.next(), line)?;
                let slot = parse_seal(words.next(), line)?;
                Command::PlaceCard { card, slot }
            }
            "end" | "e" => Command::EndPrep,
            "trigger" => Command::TriggerLimboAbility(parse_card(words.next(), line)?),
            "mark" | "allocate" => Command::AllocateMarker(parse_card(words.next(), line)?),
            "done" | "finish" => Command::FinishAllocation,
            "target" | "t" => Command::SelectAbilityTarget(parse_card(words.next(), line)?),
            "seal" | "s" => Command::SelectSeal(parse_seal(words.next(), line)?),
            "yes" | "y" => Command::ResolveDecision(true),
            "no" | "n" => Command::ResolveDecision(false),
            "power" => Command::ResolveMarkerType(MarkerKind::Power),
            "weakness" => Command::ResolveMarkerType(MarkerKind::Weakness),
            "skip" => Command::ForceSkip,
            other => {
                return Err(SealsError::InvalidCommand(format!("unknown command '{other}'")));
            }
        };
        if let Some(extra) = words.next() {
            return Err(SealsError::InvalidCommand(format!(
                "unexpected '{extra}' in '{line}'"
            )));
        }
        Ok(command)
    }
}
