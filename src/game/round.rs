//! Round structure: Prep, Resolution, end-of-round settlement

use crate::core::{CardId, EndOfRoundHook, Effect, Location, MarkerKind, Side, TargetType, SEAL_COUNT};
use crate::game::{
    abilities, combat, resolution, scoring, BoardAccess, Decision, GameEndReason, Phase,
    PrepAction, PrepRequest, Response, TargetPurpose, TargetRequest,
};
use crate::Result;

/// Draw, place and trigger Limbo abilities for both sides
pub fn run_prep<B: BoardAccess>(board: &mut B) -> Result<()> {
    board.game_mut().round += 1;
    let round = board.game().round;
    board
        .game()
        .logger
        .minimal(&format!("--- Round {round} Prep Phase ---"));
    board.set_phase(Phase::Prep);

    for id in board.in_play() {
        if board.card(id)?.invincible {
            board.card_mut(id)?.invincible = false;
            board.log(&format!("{}'s Invulnerability fades", board.card_name(id)));
        }
    }

    let hand_size = board.game().config.hand_size;
    for side in Side::BOTH {
        let mut drawn = 0;
        while drawn < hand_size {
            if board.game_mut().draw_card(side)?.is_none() {
                break;
            }
            drawn += 1;
        }
        board.log_verbose(&format!("{side} draws {drawn} cards"));
    }
    board.publish();

    for side in Side::BOTH {
        prep_side(board, side)?;
        if board.is_over() {
            return Ok(());
        }
    }
    Ok(())
}

fn prep_side<B: BoardAccess>(board: &mut B, side: Side) -> Result<()> {
    // Each Limbo card may be triggered once per Prep
    let mut triggered: Vec<CardId> = Vec::new();
    loop {
        if board.is_over() {
            return Ok(());
        }
        let hand = board.board(side).hand.cards.clone();
        let vacant: Vec<_> = board.board(side).vacant_slots().collect();
        let limbo_triggers: Vec<CardId> = abilities::limbo_triggers(board, side)
            .into_iter()
            .filter(|id| !triggered.contains(id))
            .collect();
        let can_place = !hand.is_empty() && !vacant.is_empty();
        if !can_place && limbo_triggers.is_empty() {
            break;
        }
        let request = PrepRequest {
            hand,
            vacant,
            limbo_triggers,
        };
        match board.request(side, Decision::Prep(request)) {
            Response::Prep(PrepAction::Place { card, slot }) => {
                board.move_card(card, Location::Battlefield(side, slot))?;
                board.log_verbose(&format!("{side} places a card at slot {}", slot + 1));
            }
            Response::Prep(PrepAction::TriggerLimbo(card)) => {
                triggered.push(card);
                board.log(&format!("{side} triggers {} from Limbo", board.card_name(card)));
                abilities::trigger_limbo(board, card)?;
            }
            _ => break,
        }
    }

    let leftover = board.board(side).hand.cards.clone();
    if !leftover.is_empty() {
        board.log(&format!(
            "{side} ends Prep; {} unplaced cards go to Limbo",
            leftover.len()
        ));
    }
    for id in leftover {
        board.move_card(id, Location::Limbo(side))?;
        abilities::on_enter_limbo(board, id)?;
    }
    Ok(())
}

/// Resolve the seven seals in order, stopping when the game ends
pub fn run_resolution<B: BoardAccess>(board: &mut B) -> Result<()> {
    board.set_phase(Phase::Resolution);
    board.game_mut().battled_this_round.clear();
    board.log("--- Resolution Phase Started ---");
    for idx in 0..SEAL_COUNT {
        if board.is_over() {
            break;
        }
        resolution::resolve_seal(board, idx)?;
    }
    board.game_mut().current_seal = None;
    Ok(())
}

/// Delta's grant after its sacrifice
fn sacrifice_buff<B: BoardAccess>(board: &mut B, source: CardId, amount: u8) -> Result<()> {
    let owner = board.card(source)?.owner;
    let candidates = abilities::target_candidates(board, source, TargetType::Creature);
    if candidates.is_empty() {
        board.log(&format!("{} finds no creature to empower", board.card_name(source)));
        return Ok(());
    }
    let effect = Effect::PlacePower(amount);
    let request = TargetRequest {
        source,
        effect,
        candidates,
        optional: false,
        purpose: TargetPurpose::DeltaBuff,
        prompt: format!(
            "{}: choose a creature to receive +{amount} Power.",
            board.card_name(source)
        ),
    };
    if let Response::Target(Some(target)) = board.request(owner, Decision::ChooseTarget(request)) {
        abilities::apply_effect(board, source, target, effect)?;
    }
    Ok(())
}

/// Settle end-of-round effects, clear locks and check for exhausted decks
pub fn end_of_round<B: BoardAccess>(board: &mut B) -> Result<()> {
    for id in board.in_play() {
        if board.is_over() {
            return Ok(());
        }
        if !board.location(id).is_some_and(|loc| loc.is_in_play()) {
            continue;
        }
        let (expiring, sacrifice, buff, hook) = {
            let card = board.card(id)?;
            (
                card.marked_by_expiring_effect,
                card.marked_for_sacrifice,
                card.marked_for_buff,
                card.hooks.end_of_round,
            )
        };
        let name = board.card_name(id);
        if expiring {
            board.log(&format!("{name} perishes from Wild Wolf's bite"));
            combat::destroy_card(board, id)?;
        } else if sacrifice {
            board.log(&format!("{name} is sacrificed"));
            combat::destroy_card(board, id)?;
            if let Some(EndOfRoundHook::SacrificeBuff(n)) = hook {
                sacrifice_buff(board, id, n)?;
            }
        } else if buff {
            if let Some(EndOfRoundHook::GainPower(n)) = hook {
                board.card_mut(id)?.add_markers(MarkerKind::Power, n as u32);
                board.log(&format!("{name} gains {n} Power Markers at the end of the round"));
                board.publish();
            }
        }
    }

    for idx in 0..SEAL_COUNT {
        if board.seal(idx).locked_against.is_some() {
            board.game_mut().seals[idx].locked_against = None;
        }
    }
    board.publish();

    if !board.is_over() && Side::BOTH.iter().all(|side| board.board(*side).deck.is_empty()) {
        board.log("Both decks are exhausted");
        scoring::finalize(board, GameEndReason::DecksExhausted);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::Alignment;
    use crate::game::Sandbox;

    #[test]
    fn test_prep_fills_slots_and_purges_hand() {
        let mut board = Sandbox::new(Alignment::Light);
        board.game.load_decks();
        run_prep(&mut board).unwrap();

        assert_eq!(board.game.round, 1);
        for side in Side::BOTH {
            let player = board.board(side);
            assert_eq!(player.vacant_slots().count(), 0);
            assert!(player.hand.is_empty());
            // 8 drawn, 7 placed, 1 to Limbo (or onward to the Graveyard for Martyr)
            assert_eq!(player.limbo.len() + player.graveyard.len(), 1);
        }
    }

    #[test]
    fn test_invincibility_fades_at_prep() {
        let mut board = Sandbox::new(Alignment::Light);
        let beta = board.place("Beta", Side::Player, 0).unwrap();
        board.game.card_mut(beta).unwrap().invincible = true;
        run_prep(&mut board).unwrap();
        assert!(!board.game.card(beta).unwrap().invincible);
    }

    #[test]
    fn test_end_of_round_settlement() {
        let mut board = Sandbox::new(Alignment::Dark);
        let fledgeling = board.place("Fledgeling", Side::Player, 0).unwrap();
        let noble = board.place("Noble", Side::Player, 1).unwrap();
        let delta = board.place("Delta", Side::Enemy, 2).unwrap();
        let alpha = board.place("Alpha", Side::Enemy, 3).unwrap();
        board.game.card_mut(fledgeling).unwrap().marked_for_sacrifice = true;
        board.game.card_mut(noble).unwrap().marked_for_buff = true;
        board.game.card_mut(delta).unwrap().marked_for_sacrifice = true;
        board.game.card_mut(alpha).unwrap().marked_by_expiring_effect = true;
        board.lock_seal(4, Side::Player);

        end_of_round(&mut board).unwrap();
        assert!(board.game.board(Side::Player).limbo.contains(fledgeling));
        assert!(board.game.board(Side::Enemy).limbo.contains(delta));
        assert!(board.game.board(Side::Enemy).limbo.contains(alpha));
        // Delta's +3 lands on the first creature still in play
        assert_eq!(board.game.card(noble).unwrap().power_markers, 2 + 3);
        assert_eq!(board.seal(4).locked_against, None);
    }

    #[test]
    fn test_exhausted_decks_finalize() {
        let config = GameConfig::default().with_seed(3);
        let mut board = Sandbox::with_config(Alignment::Light, config);
        board.game.seals[0].alignment = Alignment::Dark;
        end_of_round(&mut board).unwrap();
        let outcome = board.game.outcome.clone().unwrap();
        assert_eq!(outcome.reason, GameEndReason::DecksExhausted);
        assert_eq!(outcome.winner, Some(Side::Enemy));
    }
}
