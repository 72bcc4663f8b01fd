//! Combat resolver
//!
//! Compares effective power of two cards at a seal. The stronger card
//! destroys the weaker unless the loser is invincible or protected, in which
//! case the battle is stymied. Equal power destroys both, each checked on
//! its own.

use crate::core::{
    BattleHook, CardId, Effect, Location, PassiveHook, PostCombatHook, SealIndex, TargetType,
};
use crate::game::{
    abilities, BoardAccess, Decision, Response, TargetPurpose, TargetRequest,
};
use crate::Result;
use serde::Serialize;
use smallvec::SmallVec;

/// What one battle did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BattleOutcome {
    /// Destruction was blocked; the seal is not sieged this round
    pub stymied: bool,
    /// Whether the two cards actually fought
    pub fought: bool,
    /// Card that destroyed its opponent, if exactly one did
    pub winner: Option<CardId>,
    pub destroyed: SmallVec<[CardId; 2]>,
}

/// Send a card to its owner's Limbo and fire its arrival hooks
///
/// The one destruction primitive: battles, destroy effects and sacrifices
/// all come through here. A champion leaves its seal.
pub fn destroy_card<B: BoardAccess>(board: &mut B, id: CardId) -> Result<()> {
    let (owner, from) = {
        let card = board.card(id)?;
        (card.owner, card.location)
    };
    if let Location::Champion(idx) = from {
        board.log(&format!(
            "{} falls from Seal {}",
            board.card_name(id),
            idx + 1
        ));
    }
    board.move_card(id, Location::Limbo(owner))?;
    abilities::on_enter_limbo(board, id)
}

/// Cannot be destroyed by an opponent carrying weakness markers
fn is_protected<B: BoardAccess>(board: &B, card: CardId, against: CardId) -> bool {
    let shielded = board
        .card(card)
        .is_ok_and(|c| c.hooks.passive == Some(PassiveHook::ShieldFromWeakened));
    shielded && board.card(against).is_ok_and(|c| c.weakness_markers > 0)
}

fn survives<B: BoardAccess>(board: &B, card: CardId, against: CardId) -> bool {
    board.card(card).is_ok_and(|c| c.invincible) || is_protected(board, card, against)
}

/// Fight `attacker` against `defender` at seal `idx`
pub fn battle<B: BoardAccess>(
    board: &mut B,
    attacker: CardId,
    defender: CardId,
    idx: SealIndex,
) -> Result<BattleOutcome> {
    let mut outcome = BattleOutcome::default();
    let (a_name, d_name) = (board.card_name(attacker), board.card_name(defender));
    for id in [attacker, defender] {
        if board.card(id)?.def.ability.cannot_battle {
            board.log(&format!("{} cannot battle or be battled", board.card_name(id)));
            return Ok(outcome);
        }
    }

    let a_power = board.card(attacker)?.effective_power();
    let d_power = board.card(defender)?.effective_power();
    board.log(&format!(
        "Seal {}: {a_name} ({a_power}) battles {d_name} ({d_power})",
        idx + 1
    ));
    outcome.fought = true;
    board.record_battle(attacker);
    board.record_battle(defender);

    for (card, other) in [(attacker, defender), (defender, attacker)] {
        if board.card(card)?.hooks.battle == Some(BattleHook::ExpireOpponent) {
            board.card_mut(other)?.marked_by_expiring_effect = true;
            board.log(&format!(
                "{} will perish at the end of the round",
                board.card_name(other)
            ));
        }
    }

    if a_power != d_power {
        let (winner, loser) = if a_power > d_power {
            (attacker, defender)
        } else {
            (defender, attacker)
        };
        let (winner_name, loser_name) = (board.card_name(winner), board.card_name(loser));
        if survives(board, loser, winner) {
            board.log(&format!(
                "{loser_name} is Protected or Invincible. {winner_name} is stymied."
            ));
            outcome.stymied = true;
        } else {
            board.log(&format!("{winner_name} defeats {loser_name}"));
            destroy_card(board, loser)?;
            outcome.destroyed.push(loser);
            outcome.winner = Some(winner);
        }
    } else {
        board.log(&format!("Mutual destruction: {a_name} and {d_name}"));
        for (card, other) in [(attacker, defender), (defender, attacker)] {
            if survives(board, card, other) {
                board.log(&format!("{} endures", board.card_name(card)));
                // Only invincibility stalls the seal; protection just survives
                if board.card(card).is_ok_and(|c| c.invincible) {
                    outcome.stymied = true;
                }
            } else {
                outcome.destroyed.push(card);
            }
        }
        for card in outcome.destroyed.clone() {
            destroy_card(board, card)?;
        }
    }

    if let Some(winner) = outcome.winner {
        if board.location(winner).is_some_and(|loc| loc.is_in_play()) {
            post_combat(board, winner)?;
        }
    }

    for (card, other) in [(attacker, defender), (defender, attacker)] {
        let returns = board
            .card(card)
            .is_ok_and(|c| c.hooks.battle == Some(BattleHook::ReturnOpponent));
        if returns && board.location(other).is_some_and(|loc| loc.is_in_play()) {
            board.log(&format!(
                "{} sends {} back to the top of its owner's deck",
                board.card_name(card),
                board.card_name(other)
            ));
            board.return_to_deck(other)?;
        }
    }
    Ok(outcome)
}

/// Rewards for a card that destroyed its opponent in battle
pub fn post_combat<B: BoardAccess>(board: &mut B, winner: CardId) -> Result<()> {
    let Some(hook) = board.card(winner)?.hooks.post_combat else {
        return Ok(());
    };
    let name = board.card_name(winner);
    match hook {
        PostCombatHook::GainPower(n) => {
            board.card_mut(winner)?.add_markers(crate::core::MarkerKind::Power, n as u32);
            board.log(&format!("{name} gains {n} Power Markers from victory"));
            board.publish();
        }
        PostCombatHook::SecondStrike => {
            let candidates = abilities::target_candidates(board, winner, TargetType::Any);
            if candidates.is_empty() {
                return Ok(());
            }
            let owner = board.card(winner)?.owner;
            let request = TargetRequest {
                source: winner,
                effect: Effect::DestroyOrMarker,
                candidates,
                optional: true,
                purpose: TargetPurpose::Ability,
                prompt: format!("{name}: you may destroy a card or one Marker in play."),
            };
            if let Response::Target(Some(target)) =
                board.request(owner, Decision::ChooseTarget(request))
            {
                abilities::apply_effect(board, winner, target, Effect::DestroyOrMarker)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Alignment, MarkerKind, Side};
    use crate::game::Sandbox;

    #[test]
    fn test_equal_power_mutual_destruction() {
        let mut board = Sandbox::new(Alignment::Light);
        let prophet = board.place("Prophet", Side::Player, 0).unwrap();
        let famine = board.place("Famine", Side::Enemy, 0).unwrap();

        let outcome = battle(&mut board, prophet, famine, 0).unwrap();
        assert!(!outcome.stymied);
        assert_eq!(outcome.destroyed.len(), 2);
        assert!(board.game.board(Side::Player).limbo.contains(prophet));
        assert!(board.game.board(Side::Enemy).limbo.contains(famine));
    }

    #[test]
    fn test_invincible_loser_stymies() {
        let mut board = Sandbox::new(Alignment::Light);
        let nephilim = board.place("Nephilim", Side::Player, 2).unwrap();
        let war = board.place("War", Side::Enemy, 2).unwrap();
        board.game.card_mut(nephilim).unwrap().invincible = true;

        let outcome = battle(&mut board, nephilim, war, 2).unwrap();
        assert!(outcome.stymied);
        assert!(outcome.destroyed.is_empty());
        assert_eq!(board.slot(Side::Player, 2), Some(nephilim));
    }

    #[test]
    fn test_wrath_protected_from_weakened_attacker() {
        let mut board = Sandbox::new(Alignment::Light);
        let alpha = board.place("Alpha", Side::Player, 1).unwrap();
        let wrath = board.place("Wrath", Side::Enemy, 1).unwrap();
        {
            let card = board.game.card_mut(alpha).unwrap();
            card.add_markers(MarkerKind::Power, 3);
            card.add_markers(MarkerKind::Weakness, 1);
        }
        let outcome = battle(&mut board, alpha, wrath, 1).unwrap();
        assert!(outcome.stymied);
        assert_eq!(board.slot(Side::Enemy, 1), Some(wrath));
    }

    #[test]
    fn test_protected_survivor_of_even_trade_does_not_stymie() {
        let mut board = Sandbox::new(Alignment::Light);
        let alpha = board.place("Alpha", Side::Player, 1).unwrap();
        let wrath = board.place("Wrath", Side::Enemy, 1).unwrap();
        {
            let card = board.game.card_mut(alpha).unwrap();
            card.add_markers(MarkerKind::Power, 1);
            card.add_markers(MarkerKind::Weakness, 1);
        }
        let outcome = battle(&mut board, alpha, wrath, 1).unwrap();
        assert!(!outcome.stymied);
        assert_eq!(outcome.destroyed.as_slice(), &[alpha]);
        assert_eq!(board.slot(Side::Enemy, 1), Some(wrath));
    }

    #[test]
    fn test_war_gains_power_after_victory() {
        let mut board = Sandbox::new(Alignment::Dark);
        let war = board.place("War", Side::Player, 4).unwrap();
        let herald = board.place("Herald", Side::Enemy, 4).unwrap();

        let outcome = battle(&mut board, war, herald, 4).unwrap();
        assert_eq!(outcome.winner, Some(war));
        assert_eq!(board.game.card(war).unwrap().effective_power(), 12);
        assert_eq!(board.battled(), &[war, herald]);
    }

    #[test]
    fn test_fledgeling_never_fights() {
        let mut board = Sandbox::new(Alignment::Dark);
        let fledgeling = board.place("Fledgeling", Side::Player, 0).unwrap();
        let omega = board.place("Omega", Side::Enemy, 0).unwrap();
        let outcome = battle(&mut board, fledgeling, omega, 0).unwrap();
        assert!(!outcome.fought);
        assert!(board.battled().is_empty());
    }

    #[test]
    fn test_elder_returns_surviving_opponent() {
        let mut board = Sandbox::new(Alignment::Dark);
        let elder = board.place("Elder", Side::Player, 6).unwrap();
        let beta = board.place("Beta", Side::Enemy, 6).unwrap();
        board.game.card_mut(beta).unwrap().invincible = true;

        battle(&mut board, elder, beta, 6).unwrap();
        assert!(!board.game.cards.contains(beta));
        assert_eq!(
            board.game.board(Side::Enemy).deck.peek_top().map(|d| d.name),
            Some("Beta")
        );
    }
}
