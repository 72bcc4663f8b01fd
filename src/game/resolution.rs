//! Per-seal resolution
//!
//! One seal runs Haste, Flip, Abilities, Combat, Siege and Ascension in that
//! order. Slot contents are re-read between steps because any step may
//! remove cards.

use crate::core::{CardId, Location, SealIndex, Side};
use crate::game::{abilities, combat, scoring, BoardAccess, SealStep};
use crate::Result;

/// Cost assigned to an empty slot when ordering abilities
const ABSENT_POWER: i32 = 999;

/// The seal's champion, if it belongs to the other side
fn hostile_champion<B: BoardAccess>(board: &B, idx: SealIndex, side: Side) -> Option<CardId> {
    board
        .seal(idx)
        .champion
        .filter(|id| board.card(*id).is_ok_and(|c| c.owner != side))
}

fn contenders<B: BoardAccess>(board: &B, idx: SealIndex) -> (Option<CardId>, Option<CardId>) {
    (board.slot(Side::Player, idx), board.slot(Side::Enemy, idx))
}

/// Whether the surviving card in `side`'s slot is blocked by a champion it
/// could not remove
fn is_blocked<B: BoardAccess>(board: &B, idx: SealIndex, side: Side) -> bool {
    hostile_champion(board, idx, side).is_some()
}

fn haste_strike<B: BoardAccess>(board: &mut B, idx: SealIndex) -> Result<()> {
    let (p, e) = contenders(board, idx);
    let hasted = [p, e]
        .into_iter()
        .flatten()
        .any(|id| board.card(id).is_ok_and(|c| c.def.ability.haste));
    if !hasted {
        return Ok(());
    }
    board.set_step(Some(SealStep::Haste));
    match (p, e) {
        (Some(p), Some(e)) => {
            combat::battle(board, p, e, idx)?;
        }
        (Some(card), None) | (None, Some(card)) => {
            let side = board.card(card)?.owner;
            if let Some(champion) = hostile_champion(board, idx, side) {
                combat::battle(board, card, champion, idx)?;
            }
        }
        (None, None) => {}
    }
    Ok(())
}

/// Reveal face-down contenders; returns the cards that flipped
fn flip<B: BoardAccess>(board: &mut B, idx: SealIndex) -> Result<Vec<CardId>> {
    board.set_step(Some(SealStep::Flip));
    let (p, e) = contenders(board, idx);
    let mut flipping = Vec::new();
    for id in [p, e].into_iter().flatten() {
        let card = board.card_mut(id)?;
        if card.face_up {
            continue;
        }
        card.face_up = true;
        let owner = card.owner;
        flipping.push(id);
        board.log(&format!("{owner} reveals {}", board.card_name(id)));
    }
    if !flipping.is_empty() {
        board.publish();
    }
    Ok(flipping)
}

/// Acting order: lower effective power first, ties on a coin flip, the
/// champion last
pub fn ability_order<B: BoardAccess>(board: &B, idx: SealIndex) -> Vec<CardId> {
    let (p, e) = contenders(board, idx);
    let power = |slot: Option<CardId>| {
        slot.and_then(|id| board.card(id).ok())
            .map(|c| c.effective_power())
            .unwrap_or(ABSENT_POWER)
    };
    let (p_power, e_power) = (power(p), power(e));
    let player_first = if p_power == e_power {
        board.coin_flip()
    } else {
        p_power < e_power
    };
    board.log_verbose(&format!(
        "Initiative at Seal {}: Player {p_power}, Enemy {e_power}; {} acts first",
        idx + 1,
        if player_first { Side::Player } else { Side::Enemy }
    ));
    let mut order: Vec<CardId> = if player_first { [p, e] } else { [e, p] }
        .into_iter()
        .flatten()
        .collect();
    order.extend(board.seal(idx).champion);
    order
}

fn run_abilities<B: BoardAccess>(
    board: &mut B,
    idx: SealIndex,
    flipping: &[CardId],
) -> Result<()> {
    board.set_step(Some(SealStep::Abilities));
    board.log_verbose("Processing abilities...");
    for id in ability_order(board, idx) {
        if board.is_over() {
            break;
        }
        if !board.location(id).is_some_and(|loc| loc.is_in_play()) {
            continue;
        }
        abilities::resolve_card(board, id, flipping)?;
    }
    Ok(())
}

/// Champion fights first; the contenders meet only when neither is blocked.
/// Returns whether any battle was stymied.
fn run_combat<B: BoardAccess>(board: &mut B, idx: SealIndex) -> Result<bool> {
    board.set_step(Some(SealStep::Combat));
    let mut stymied = false;
    for side in Side::BOTH {
        if board.is_over() {
            return Ok(stymied);
        }
        let Some(card) = board.slot(side, idx) else {
            continue;
        };
        if let Some(champion) = hostile_champion(board, idx, side) {
            stymied |= combat::battle(board, card, champion, idx)?.stymied;
        }
    }

    let (p, e) = contenders(board, idx);
    if let (Some(p), Some(e)) = (p, e) {
        if !is_blocked(board, idx, Side::Player) && !is_blocked(board, idx, Side::Enemy) {
            stymied |= combat::battle(board, p, e, idx)?.stymied;
        }
    }
    Ok(stymied)
}

/// The single unblocked survivor claims the seal for its owner
fn siege<B: BoardAccess>(board: &mut B, idx: SealIndex, stymied: bool) -> Result<()> {
    board.set_step(Some(SealStep::Siege));
    if stymied {
        scoring::neutralize(board, idx);
        return Ok(());
    }
    let attacker = match contenders(board, idx) {
        (Some(p), None) => Some(p),
        (None, Some(e)) => Some(e),
        (Some(_), Some(_)) => {
            board.log(&format!("Seal {} is contested; no siege", idx + 1));
            None
        }
        (None, None) => None,
    };
    let Some(attacker) = attacker else {
        return Ok(());
    };
    let (owner, power) = {
        let card = board.card(attacker)?;
        (card.owner, card.effective_power())
    };
    if is_blocked(board, idx, owner) {
        board.log_verbose(&format!("{} is blocked by the champion", board.card_name(attacker)));
        return Ok(());
    }
    if power <= 0 {
        board.log(&format!(
            "{} has no power to siege Seal {}",
            board.card_name(attacker),
            idx + 1
        ));
        return Ok(());
    }
    let claim = board.allegiance(owner);
    scoring::claim_seal(board, idx, claim, owner, Some(attacker))?;
    Ok(())
}

fn ascension<B: BoardAccess>(board: &mut B, idx: SealIndex) -> Result<()> {
    board.set_step(Some(SealStep::Ascension));
    if board.seal(idx).champion.is_some() {
        return Ok(());
    }
    let (p, e) = contenders(board, idx);
    let ascending = [p, e]
        .into_iter()
        .flatten()
        .find(|id| board.card(*id).is_ok_and(|c| c.def.is_champion));
    if let Some(id) = ascending {
        board.move_card(id, Location::Champion(idx))?;
        board.log(&format!(
            "{} ascends to become Champion of Seal {}",
            board.card_name(id),
            idx + 1
        ));
    }
    Ok(())
}

/// Resolve seal `idx` completely, stopping early if the game ends
pub fn resolve_seal<B: BoardAccess>(board: &mut B, idx: SealIndex) -> Result<()> {
    board.game_mut().current_seal = Some(idx);
    board.game_mut().clear_suppression(idx);
    board.log(&format!("Resolving Seal {}...", idx + 1));

    haste_strike(board, idx)?;
    let flipping = flip(board, idx)?;
    run_abilities(board, idx, &flipping)?;

    if !board.is_over() {
        let stymied = run_combat(board, idx)?;
        if !board.is_over() {
            siege(board, idx, stymied)?;
        }
        if !board.is_over() {
            ascension(board, idx)?;
        }
    }
    board.set_step(None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Alignment;
    use crate::game::Sandbox;

    #[test]
    fn test_equal_avatars_destroy_each_other_without_siege() {
        let mut board = Sandbox::new(Alignment::Light);
        let prophet = board.place("Prophet", Side::Player, 3).unwrap();
        let hades = board.place("Hades", Side::Enemy, 3).unwrap();
        // Hades would otherwise gain markers on flip
        board.game.card_mut(hades).unwrap().face_up = true;

        resolve_seal(&mut board, 3).unwrap();
        assert!(board.game.board(Side::Player).limbo.contains(prophet));
        assert!(board.game.board(Side::Enemy).limbo.contains(hades));
        assert_eq!(board.seal(3).alignment, Alignment::Neutral);
        assert_eq!(board.seal(3).champion, None);
    }

    #[test]
    fn test_haste_strikes_before_flip() {
        let mut board = Sandbox::new(Alignment::Light);
        let wolf = board.place("Wild Wolf", Side::Player, 0).unwrap();
        let famine = board.place("Famine", Side::Enemy, 0).unwrap();

        resolve_seal(&mut board, 0).unwrap();
        assert!(board.game.board(Side::Player).limbo.contains(wolf));
        let famine_card = board.game.card(famine).unwrap();
        assert!(famine_card.face_up);
        assert!(famine_card.marked_by_expiring_effect);
        // Famine ascends after claiming the seal for the Enemy
        assert_eq!(board.seal(0).alignment, Alignment::Dark);
        assert_eq!(board.seal(0).champion, Some(famine));
    }

    #[test]
    fn test_lone_survivor_claims_and_creature_stays() {
        let mut board = Sandbox::new(Alignment::Dark);
        let noble = board.place("Noble", Side::Player, 5).unwrap();
        board.game.card_mut(noble).unwrap().face_up = true;

        resolve_seal(&mut board, 5).unwrap();
        assert_eq!(board.seal(5).alignment, Alignment::Dark);
        assert_eq!(board.slot(Side::Player, 5), Some(noble));
        assert_eq!(board.seal(5).champion, None);
    }

    #[test]
    fn test_stymied_battle_neutralizes_seal() {
        let mut board = Sandbox::new(Alignment::Light);
        board.game.seals[2].alignment = Alignment::Light;
        let nephilim = board.place("Nephilim", Side::Player, 2).unwrap();
        let war = board.place("War", Side::Enemy, 2).unwrap();

        resolve_seal(&mut board, 2).unwrap();
        assert!(board.game.card(nephilim).unwrap().invincible);
        assert_eq!(board.slot(Side::Enemy, 2), Some(war));
        assert_eq!(board.seal(2).alignment, Alignment::Neutral);
    }

    #[test]
    fn test_champion_blocks_siege_until_defeated() {
        let mut board = Sandbox::new(Alignment::Light);
        let lilith = board.place_champion("Lilith", Side::Enemy, 6).unwrap();
        board.game.seals[6].alignment = Alignment::Dark;
        let herald = board.place("Herald", Side::Player, 6).unwrap();
        board.game.card_mut(herald).unwrap().face_up = true;

        resolve_seal(&mut board, 6).unwrap();
        assert!(board.game.board(Side::Player).limbo.contains(herald));
        assert_eq!(board.seal(6).champion, Some(lilith));
        assert_eq!(board.seal(6).alignment, Alignment::Dark);
    }

    #[test]
    fn test_weaker_card_acts_first_and_champion_last() {
        let mut board = Sandbox::new(Alignment::Light);
        let champion = board.place_champion("Prophet", Side::Player, 1).unwrap();
        let thrones = board.place("Thrones", Side::Player, 1).unwrap();
        let wrath = board.place("Wrath", Side::Enemy, 1).unwrap();
        assert_eq!(ability_order(&board, 1), vec![thrones, wrath, champion]);
    }
}
