//! Decision requests and responses
//!
//! Every point where the engine needs a player's input is a `Decision`. The
//! engine hands it to the side's controller and waits for a `Response`;
//! AI and human drivers answer the same messages. A response that does not
//! match the decision's legal options is rejected by `Decision::accepts`,
//! except the neutral answer, which always stands (see `Decision::admits`).

use crate::core::{Alignment, CardId, Effect, MarkerKind, SealIndex};
use crate::game::Phase;
use serde::Serialize;

/// Tag identifying a yes/no or marker-type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionContext {
    /// Spend Fallen One from Limbo to cancel an enemy ability
    FallenOne,
    /// Mark Delta for sacrifice at end of round
    DeltaSacrifice,
    /// Spend Luna from Limbo to cancel an enemy influence change
    LunaNullify,
    /// Which marker kind The Almighty purges
    AlmightyMarkerType,
    /// Whether Lust's owner claims the seal after the sacrifice
    LustSealInfluence,
}

/// Prep-phase options for one side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrepRequest {
    pub hand: Vec<CardId>,
    pub vacant: Vec<SealIndex>,
    /// Limbo cards that can be triggered now
    pub limbo_triggers: Vec<CardId>,
}

/// One Prep-phase move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrepAction {
    Place { card: CardId, slot: SealIndex },
    TriggerLimbo(CardId),
    EndPrep,
}

/// Place the next marker of an allocation pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRequest {
    pub source: CardId,
    /// Kind of the marker being placed now (power pool drains first)
    pub kind: MarkerKind,
    pub power_left: u8,
    pub weakness_left: u8,
    /// In-play cards the marker may go on
    pub candidates: Vec<CardId>,
    pub prompt: String,
}

/// Why a card target is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetPurpose {
    /// Flip, activate, limbo or post-combat ability
    Ability,
    /// Delta's end-of-round grant
    DeltaBuff,
    /// Baron's swap with a Limbo creature
    Swap,
}

/// Pick one card for an effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRequest {
    pub source: CardId,
    pub effect: Effect,
    pub candidates: Vec<CardId>,
    /// Whether `None` is a legal answer
    pub optional: bool,
    pub purpose: TargetPurpose,
    pub prompt: String,
}

/// What selecting a seal does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SealPurpose {
    /// Set the seal to this alignment
    Claim(Alignment),
    /// Lock the seal against the enemy
    Lock,
}

/// Pick one seal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SealRequest {
    pub source: CardId,
    pub purpose: SealPurpose,
    pub candidates: Vec<SealIndex>,
    pub optional: bool,
    pub prompt: String,
}

/// Yes/no question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmRequest {
    pub context: DecisionContext,
    /// Card the question is about
    pub source: Option<CardId>,
    /// Seal whose influence is at stake (Luna, Lust)
    pub seal: Option<SealIndex>,
    pub message: String,
}

/// A pending question for one side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Decision {
    ChooseAlignment,
    Prep(PrepRequest),
    AllocateMarker(AllocationRequest),
    ChooseTarget(TargetRequest),
    ChooseSeal(SealRequest),
    Confirm(ConfirmRequest),
    ChooseMarkerKind { source: CardId },
}

/// Answer to a `Decision`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Response {
    Alignment(Alignment),
    Prep(PrepAction),
    /// `None` finishes the allocation, forfeiting what is left
    Marker(Option<CardId>),
    Target(Option<CardId>),
    Seal(Option<SealIndex>),
    Confirm(bool),
    MarkerKind(MarkerKind),
}

impl Decision {
    /// Phase observers see while this decision is pending; `None` keeps
    /// the current phase
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Decision::ChooseAlignment => Some(Phase::Setup),
            Decision::Prep(_) => Some(Phase::Prep),
            Decision::AllocateMarker(_) => Some(Phase::CounterAllocation),
            Decision::ChooseTarget(req) => Some(match req.purpose {
                TargetPurpose::DeltaBuff => Phase::DeltaBuffTargeting,
                _ => Phase::AbilityTargeting,
            }),
            Decision::ChooseSeal(_) => Some(Phase::SealTargeting),
            Decision::Confirm(_) | Decision::ChooseMarkerKind { .. } => None,
        }
    }

    pub fn context(&self) -> Option<DecisionContext> {
        match self {
            Decision::Confirm(req) => Some(req.context),
            Decision::ChooseMarkerKind { .. } => Some(DecisionContext::AlmightyMarkerType),
            _ => None,
        }
    }

    /// Instruction text for the pending decision
    pub fn instruction(&self) -> String {
        match self {
            Decision::ChooseAlignment => "Choose your allegiance: Light or Dark.".to_string(),
            Decision::Prep(req) => format!(
                "Place cards from your hand into vacant slots ({} in hand, {} vacant), then end Prep.",
                req.hand.len(),
                req.vacant.len()
            ),
            Decision::AllocateMarker(req) => req.prompt.clone(),
            Decision::ChooseTarget(req) => req.prompt.clone(),
            Decision::ChooseSeal(req) => req.prompt.clone(),
            Decision::Confirm(req) => req.message.clone(),
            Decision::ChooseMarkerKind { .. } => {
                "The Almighty: destroy all Power markers or all Weakness markers in play.".to_string()
            }
        }
    }

    /// Whether `response` is a legal answer
    pub fn accepts(&self, response: &Response) -> bool {
        match (self, response) {
            (Decision::ChooseAlignment, Response::Alignment(a)) => *a != Alignment::Neutral,
            (Decision::Prep(req), Response::Prep(action)) => match action {
                PrepAction::Place { card, slot } => {
                    req.hand.contains(card) && req.vacant.contains(slot)
                }
                PrepAction::TriggerLimbo(card) => req.limbo_triggers.contains(card),
                PrepAction::EndPrep => true,
            },
            (Decision::AllocateMarker(req), Response::Marker(choice)) => match choice {
                Some(card) => req.candidates.contains(card),
                None => true,
            },
            (Decision::ChooseTarget(req), Response::Target(choice)) => match choice {
                Some(card) => req.candidates.contains(card),
                None => req.optional,
            },
            (Decision::ChooseSeal(req), Response::Seal(choice)) => match choice {
                Some(idx) => req.candidates.contains(idx),
                None => req.optional,
            },
            (Decision::Confirm(_), Response::Confirm(_)) => true,
            (Decision::ChooseMarkerKind { .. }, Response::MarkerKind(_)) => true,
            _ => false,
        }
    }

    /// Whether the engine takes `response`: a legal option or the neutral
    /// answer, which declines even a mandatory choice
    pub fn admits(&self, response: &Response) -> bool {
        self.accepts(response) || *response == self.default_response()
    }

    /// Neutral answer used for force-skip, closed drivers and drivers that
    /// keep answering illegally
    ///
    /// Declines optional and mandatory choices alike, so a skipped mandatory
    /// ability simply does nothing.
    pub fn default_response(&self) -> Response {
        match self {
            Decision::ChooseAlignment => Response::Alignment(Alignment::Light),
            Decision::Prep(_) => Response::Prep(PrepAction::EndPrep),
            Decision::AllocateMarker(_) => Response::Marker(None),
            Decision::ChooseTarget(_) => Response::Target(None),
            Decision::ChooseSeal(_) => Response::Seal(None),
            Decision::Confirm(_) => Response::Confirm(false),
            Decision::ChooseMarkerKind { .. } => Response::MarkerKind(MarkerKind::Power),
        }
    }

    /// Short name for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Decision::ChooseAlignment => "alignment",
            Decision::Prep(_) => "prep",
            Decision::AllocateMarker(_) => "allocation",
            Decision::ChooseTarget(_) => "target",
            Decision::ChooseSeal(_) => "seal",
            Decision::Confirm(_) => "confirm",
            Decision::ChooseMarkerKind { .. } => "marker type",
        }
    }
}
