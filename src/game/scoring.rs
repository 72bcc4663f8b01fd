//! Seal influence and win conditions
//!
//! Every alignment change goes through `claim_seal`, which applies the
//! champion, lock, Prophet and Luna rules and then checks for a majority.

use crate::core::{Alignment, CardId, LimboHook, Location, PassiveHook, SealIndex, Side};
use crate::game::{BoardAccess, ConfirmRequest, Decision, DecisionContext, GameEndReason, Response};
use crate::Result;
use std::cmp::Ordering;

fn prophet_in_play<B: BoardAccess>(board: &B) -> bool {
    board.in_play().into_iter().any(|id| {
        board
            .card(id)
            .is_ok_and(|c| c.hooks.passive == Some(PassiveHook::WardLightSeals))
    })
}

/// Offer Luna's owner the chance to cancel an influence change
fn luna_nullifies<B: BoardAccess>(
    board: &mut B,
    idx: SealIndex,
    alignment: Alignment,
    claimant: Side,
) -> Result<bool> {
    let responder = claimant.opponent();
    let luna = board
        .board(responder)
        .limbo
        .cards
        .iter()
        .copied()
        .find(|id| {
            board
                .card(*id)
                .is_ok_and(|c| c.hooks.limbo == Some(LimboHook::NullifyInfluence))
        });
    let Some(luna) = luna else {
        return Ok(false);
    };
    let request = ConfirmRequest {
        context: DecisionContext::LunaNullify,
        source: Some(luna),
        seal: Some(idx),
        message: format!(
            "The {claimant} is turning Seal {} {alignment}. Move Luna to the Graveyard to nullify it?",
            idx + 1
        ),
    };
    if board.request(responder, Decision::Confirm(request)) == Response::Confirm(true) {
        board.move_card(luna, Location::Graveyard(responder))?;
        board.log(&format!("Luna nullifies the change to Seal {}", idx + 1));
        return Ok(true);
    }
    Ok(false)
}

/// Try to set seal `idx` to `alignment` on behalf of `claimant`
///
/// Refused when a champion holds the seal, when the seal is locked against
/// the claimant, when a Prophet in play wards a Light seal from Dark, or
/// when the other side spends Luna. Returns whether the seal changed.
pub fn claim_seal<B: BoardAccess>(
    board: &mut B,
    idx: SealIndex,
    alignment: Alignment,
    claimant: Side,
    source: Option<CardId>,
) -> Result<bool> {
    let seal = board.seal(idx);
    let current = seal.alignment;
    if seal.champion.is_some() {
        board.log_verbose(&format!(
            "Seal {} is held by a champion; influence unchanged",
            idx + 1
        ));
        return Ok(false);
    }
    if current == alignment {
        return Ok(false);
    }
    if seal.is_locked_against(claimant) {
        board.log(&format!("Seal {} is locked against the {claimant}", idx + 1));
        return Ok(false);
    }
    if current == Alignment::Light && alignment == Alignment::Dark && prophet_in_play(board) {
        board.log(&format!("Prophet wards Seal {} from corruption", idx + 1));
        return Ok(false);
    }
    if luna_nullifies(board, idx, alignment, claimant)? {
        return Ok(false);
    }

    board.set_seal_alignment(idx, alignment);
    let by = source
        .map(|id| board.card_name(id).to_string())
        .unwrap_or_else(|| claimant.to_string());
    board.log(&format!("{by} turns Seal {} {alignment}", idx + 1));
    check_majority(board);
    Ok(true)
}

/// Stymied combat leaves an undefended seal Neutral
pub fn neutralize<B: BoardAccess>(board: &mut B, idx: SealIndex) {
    let seal = board.seal(idx);
    if seal.champion.is_some() || seal.alignment == Alignment::Neutral {
        return;
    }
    board.set_seal_alignment(idx, Alignment::Neutral);
    board.log(&format!("Seal {} returns to Neutral", idx + 1));
}

/// End the game if a side holds the configured majority
pub fn check_majority<B: BoardAccess>(board: &mut B) {
    if board.is_over() {
        return;
    }
    let majority = board.game().config.majority;
    for side in Side::BOTH {
        let count = board.seal_count(side);
        if count >= majority {
            board.game().logger.minimal(&format!(
                "GAME OVER: {side} Victory ({count} of 7 Seals)"
            ));
            board.end_game(Some(side), GameEndReason::Majority);
            return;
        }
    }
}

/// A card's own win condition fired for `side`
pub fn card_victory<B: BoardAccess>(board: &mut B, side: Side, card: &'static str) {
    if board.is_over() {
        return;
    }
    board
        .game()
        .logger
        .minimal(&format!("GAME OVER: {side} Victory by {card}"));
    board.end_game(Some(side), GameEndReason::CardVictory(card));
}

/// Decide the game on seal count; equal counts are a draw
pub fn finalize<B: BoardAccess>(board: &mut B, reason: GameEndReason) {
    if board.is_over() {
        return;
    }
    let player = board.seal_count(Side::Player);
    let enemy = board.seal_count(Side::Enemy);
    let winner = match player.cmp(&enemy) {
        Ordering::Greater => Some(Side::Player),
        Ordering::Less => Some(Side::Enemy),
        Ordering::Equal => None,
    };
    let message = match winner {
        Some(side) => format!("GAME OVER: {side} Victory ({player}-{enemy})"),
        None => format!("GAME OVER: Draw ({player}-{enemy})"),
    };
    board.game().logger.minimal(&message);
    board.end_game(winner, reason);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Sandbox;

    #[test]
    fn test_prophet_wards_light_seals_only() {
        let mut board = Sandbox::new(Alignment::Light);
        board.place_champion("Prophet", Side::Player, 6).unwrap();
        board.game.seals[0].alignment = Alignment::Light;

        assert!(!claim_seal(&mut board, 0, Alignment::Dark, Side::Enemy, None).unwrap());
        assert_eq!(board.seal(0).alignment, Alignment::Light);

        assert!(claim_seal(&mut board, 1, Alignment::Dark, Side::Enemy, None).unwrap());
        assert_eq!(board.seal(1).alignment, Alignment::Dark);
    }

    #[test]
    fn test_champion_and_lock_refuse_claims() {
        let mut board = Sandbox::new(Alignment::Light);
        board.place_champion("Lilith", Side::Enemy, 2).unwrap();
        assert!(!claim_seal(&mut board, 2, Alignment::Light, Side::Player, None).unwrap());

        board.lock_seal(3, Side::Enemy);
        assert!(!claim_seal(&mut board, 3, Alignment::Dark, Side::Enemy, None).unwrap());
        assert!(claim_seal(&mut board, 3, Alignment::Light, Side::Player, None).unwrap());
    }

    #[test]
    fn test_majority_ends_game() {
        let mut board = Sandbox::new(Alignment::Dark);
        for idx in 0..3 {
            claim_seal(&mut board, idx, Alignment::Dark, Side::Player, None).unwrap();
        }
        assert!(!board.is_over());
        claim_seal(&mut board, 3, Alignment::Dark, Side::Player, None).unwrap();
        let outcome = board.game.outcome.clone().unwrap();
        assert_eq!(outcome.winner, Some(Side::Player));
        assert_eq!(outcome.reason, GameEndReason::Majority);
    }

    #[test]
    fn test_neutralize_spares_champion_seal() {
        let mut board = Sandbox::new(Alignment::Dark);
        board.game.seals[1].alignment = Alignment::Dark;
        board.game.seals[2].alignment = Alignment::Dark;
        board.place_champion("Death", Side::Player, 2).unwrap();
        neutralize(&mut board, 1);
        neutralize(&mut board, 2);
        assert_eq!(board.seal(1).alignment, Alignment::Neutral);
        assert_eq!(board.seal(2).alignment, Alignment::Dark);
    }

    #[test]
    fn test_finalize_draw() {
        let mut board = Sandbox::new(Alignment::Light);
        board.game.seals[0].alignment = Alignment::Light;
        board.game.seals[1].alignment = Alignment::Dark;
        finalize(&mut board, GameEndReason::RoundLimit);
        let outcome = board.game.outcome.clone().unwrap();
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.reason, GameEndReason::RoundLimit);
    }
}
