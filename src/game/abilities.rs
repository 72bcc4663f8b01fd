//! Ability resolution
//!
//! Target legality, effect application, marker allocation and the per-card
//! pipeline that runs when a card flips or activates during a seal's
//! Abilities step. Every choice goes out as a `Decision` through
//! `BoardAccess::request`, so the same code serves AI and human seats.

use crate::core::{
    ActivateHook, Alignment, Allocation, CardId, Effect, EndOfRoundHook, Faction, FlipHook,
    GlobalEffect, LimboHook, Location, MarkerKind, PassiveHook, SealEffect, SealIndex, Side,
    TargetType, TargetedAbility, SEAL_COUNT,
};
use crate::game::{
    combat, scoring, AllocationRequest, BoardAccess, ConfirmRequest, Decision, DecisionContext,
    Response, SealPurpose, SealRequest, TargetPurpose, TargetRequest,
};
use crate::Result;

/// Whether `target` ignores abilities coming from `source`
///
/// Only creature sources are resisted. A target is immune when it is
/// ability-immune itself, or when it is Celestial and a same-side champion
/// shielding Celestials sits on a seal (the shield never covers itself).
pub fn is_immune<B: BoardAccess>(board: &B, target: CardId, source: CardId) -> bool {
    let (Ok(target_card), Ok(source_card)) = (board.card(target), board.card(source)) else {
        return false;
    };
    if !source_card.is_creature() {
        return false;
    }
    if target_card.def.ability.ability_immune {
        return true;
    }
    if target_card.def.faction != Faction::Celestial {
        return false;
    }
    let owner = target_card.owner;
    (0..SEAL_COUNT).any(|idx| {
        board
            .seal(idx)
            .champion
            .filter(|champion| *champion != target)
            .and_then(|champion| board.card(champion).ok())
            .is_some_and(|champion| {
                champion.owner == owner
                    && champion.hooks.passive == Some(PassiveHook::ShieldCelestials)
            })
    })
}

/// The battlefield card facing `id` at its seal
///
/// For a champion this is the hostile contender in front of its seal.
pub fn opposing_card<B: BoardAccess>(board: &B, id: CardId) -> Option<CardId> {
    let card = board.card(id).ok()?;
    let idx = card.location.seal()?;
    board.slot(card.owner.opponent(), idx)
}

/// Legal targets of a targeted ability, in board order
pub fn target_candidates<B: BoardAccess>(
    board: &B,
    source: CardId,
    target: TargetType,
) -> Vec<CardId> {
    let source_power = board
        .card(source)
        .map(|c| c.effective_power())
        .unwrap_or(i32::MAX);
    let in_play = board.in_play().into_iter().filter(|id| *id != source);

    let is_creature = |id: &CardId| board.card(*id).is_ok_and(|c| c.is_creature());
    let not_immune = |id: &CardId| !is_immune(board, *id, source);

    match target {
        TargetType::Any => in_play.collect(),
        TargetType::Creature => in_play.filter(is_creature).filter(not_immune).collect(),
        TargetType::Champion => in_play
            .filter(|id| board.card(*id).is_ok_and(|c| c.def.is_champion))
            .collect(),
        TargetType::LimboCreature => Side::BOTH
            .into_iter()
            .flat_map(|side| board.board(side).limbo.cards.iter().copied())
            .filter(is_creature)
            .collect(),
        TargetType::CreaturePowerGte => in_play
            .filter(is_creature)
            .filter(not_immune)
            .filter(|id| board.card(*id).is_ok_and(|c| c.effective_power() >= source_power))
            .collect(),
        TargetType::Battled => board
            .battled()
            .iter()
            .copied()
            .filter(|id| *id != source)
            .filter(|id| board.location(*id).is_some_and(|loc| loc.is_in_play()))
            .collect(),
        TargetType::Weakened => in_play
            .filter(is_creature)
            .filter(not_immune)
            .filter(|id| board.card(*id).is_ok_and(|c| c.weakness_markers > 0))
            .collect(),
        TargetType::Marked => in_play
            .filter(|id| board.card(*id).is_ok_and(|c| c.has_markers()))
            .collect(),
    }
}

fn effect_prompt(name: &str, effect: Effect) -> String {
    match effect {
        Effect::Destroy => format!("{name}: choose a card to destroy."),
        Effect::DestroyMarker => format!("{name}: choose a card to lose one marker."),
        Effect::DestroyOrMarker => {
            format!("{name}: choose a card to destroy (or one of its markers).")
        }
        Effect::Return => format!("{name}: choose a card to put on top of its owner's deck."),
        Effect::PlacePower(n) => format!("{name}: choose a creature to place +{n} Power on."),
        Effect::PlaceWeakness(n) => {
            format!("{name}: choose a creature to place -{n} Weakness on.")
        }
        Effect::SentinelAbsorb => {
            format!("{name}: choose a creature in Limbo (its Power is added to {name}).")
        }
        Effect::SaintMichaelDestroy => {
            format!("{name}: choose a card that battled this round to destroy.")
        }
        Effect::DestroyCreatureWithWeakness => {
            format!("{name}: choose a creature with Weakness Markers to destroy.")
        }
    }
}

/// Apply one effect to one target; returns whether anything happened
///
/// Immune and invincible targets turn the effect into a logged no-op.
pub fn apply_effect<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    target: CardId,
    effect: Effect,
) -> Result<bool> {
    if !board.exists(target) {
        board.log_verbose(&format!("{} has no target left", board.card_name(source)));
        return Ok(false);
    }
    let source_name = board.card_name(source);
    let target_name = board.card_name(target);

    if is_immune(board, target, source) {
        board.log(&format!("{target_name} is immune to {source_name}'s ability"));
        return Ok(false);
    }
    if board.card(target)?.invincible && !effect.bypasses_invincibility() {
        board.log(&format!("{target_name} is invincible; {source_name}'s ability has no effect"));
        return Ok(false);
    }

    match effect {
        Effect::Destroy => {
            board.log(&format!("{source_name} destroys {target_name}"));
            combat::destroy_card(board, target)?;
        }
        Effect::DestroyMarker => {
            let removed = board.card_mut(target)?.remove_one_marker();
            match removed {
                Some(kind) => {
                    board.log(&format!("{source_name} destroys a {kind} Marker on {target_name}"));
                    board.publish();
                }
                None => {
                    board.log(&format!("{target_name} has no markers to destroy"));
                    return Ok(false);
                }
            }
        }
        Effect::DestroyOrMarker => {
            if board.card(target)?.has_markers() {
                return apply_effect(board, source, target, Effect::DestroyMarker);
            }
            board.log(&format!("{source_name} destroys {target_name}"));
            combat::destroy_card(board, target)?;
        }
        Effect::Return => {
            board.log(&format!(
                "{source_name} puts {target_name} on top of its owner's deck"
            ));
            board.return_to_deck(target)?;
        }
        Effect::PlacePower(n) => {
            board.card_mut(target)?.add_markers(MarkerKind::Power, n as u32);
            board.log(&format!("{source_name} places +{n} Power on {target_name}"));
            board.publish();
        }
        Effect::PlaceWeakness(n) => {
            board.card_mut(target)?.add_markers(MarkerKind::Weakness, n as u32);
            board.log(&format!("{source_name} places -{n} Weakness on {target_name}"));
            board.publish();
        }
        Effect::SentinelAbsorb => {
            let gained = board.card(target)?.def.base_power.max(0) as u32;
            board.card_mut(source)?.add_markers(MarkerKind::Power, gained);
            board.log(&format!(
                "{source_name} gains {gained} Power Markers from {target_name} in Limbo"
            ));
            board.publish();
        }
        Effect::SaintMichaelDestroy => {
            board.log(&format!(
                "{source_name} destroys {target_name} and moves to the Graveyard"
            ));
            combat::destroy_card(board, target)?;
            let owner = board.card(source)?.owner;
            board.move_card(source, Location::Graveyard(owner))?;
        }
        Effect::DestroyCreatureWithWeakness => {
            if board.card(target)?.weakness_markers == 0 {
                board.log(&format!("{target_name} carries no Weakness Markers"));
                return Ok(false);
            }
            board.log(&format!("{source_name} destroys the weakened {target_name}"));
            combat::destroy_card(board, target)?;
        }
    }
    Ok(true)
}

/// Hand out an allocation pool one marker at a time, power first
///
/// The owner picks each marker's card. Answering `None` forfeits the rest.
pub fn allocate_markers<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    allocation: Allocation,
) -> Result<()> {
    let owner = board.card(source)?.owner;
    let name = board.card_name(source);
    let mut left = allocation;

    while let Some(kind) = left.next_kind() {
        if board.is_over() {
            break;
        }
        let candidates: Vec<CardId> = board
            .in_play()
            .into_iter()
            .filter(|id| !is_immune(board, *id, source))
            .collect();
        if candidates.is_empty() {
            board.log(&format!("{name} finds no card to place markers on"));
            break;
        }
        let prompt = match kind {
            MarkerKind::Power => format!("{name}: place a +1 Power Marker ({} left).", left.power),
            MarkerKind::Weakness => {
                format!("{name}: place a -1 Weakness Marker ({} left).", left.weakness)
            }
        };
        let request = AllocationRequest {
            source,
            kind,
            power_left: left.power,
            weakness_left: left.weakness,
            candidates,
            prompt,
        };
        match board.request(owner, Decision::AllocateMarker(request)) {
            Response::Marker(Some(target)) => {
                let effect = match kind {
                    MarkerKind::Power => Effect::PlacePower(1),
                    MarkerKind::Weakness => Effect::PlaceWeakness(1),
                };
                apply_effect(board, source, target, effect)?;
                match kind {
                    MarkerKind::Power => left.power -= 1,
                    MarkerKind::Weakness => left.weakness -= 1,
                }
            }
            _ => {
                board.log(&format!(
                    "{name} stops allocating ({} Power, {} Weakness unplaced)",
                    left.power, left.weakness
                ));
                break;
            }
        }
    }
    Ok(())
}

/// Ask the owner for a target and apply the effect
pub fn resolve_targeted<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    ability: TargetedAbility,
) -> Result<()> {
    let owner = board.card(source)?.owner;
    let name = board.card_name(source);
    let candidates = target_candidates(board, source, ability.target);
    if candidates.is_empty() {
        board.log(&format!("{name} finds no legal target"));
        return Ok(());
    }
    let request = TargetRequest {
        source,
        effect: ability.effect,
        candidates,
        optional: ability.optional,
        purpose: TargetPurpose::Ability,
        prompt: effect_prompt(name, ability.effect),
    };
    match board.request(owner, Decision::ChooseTarget(request)) {
        Response::Target(Some(target)) => {
            apply_effect(board, source, target, ability.effect)?;
        }
        _ => board.log(&format!("{name}'s ability is not used")),
    }
    Ok(())
}

/// Move every other face-up card's markers onto `source`
fn siphon<B: BoardAccess>(board: &mut B, source: CardId, include_weakness: bool) -> Result<()> {
    let mut power = 0;
    let mut weakness = 0;
    for id in board.in_play() {
        if id == source {
            continue;
        }
        let card = board.card_mut(id)?;
        if !card.face_up {
            continue;
        }
        power += std::mem::take(&mut card.power_markers);
        if include_weakness {
            weakness += std::mem::take(&mut card.weakness_markers);
        }
    }
    let card = board.card_mut(source)?;
    card.add_markers(MarkerKind::Power, power);
    card.add_markers(MarkerKind::Weakness, weakness);
    let name = board.card_name(source);
    if include_weakness {
        board.log(&format!(
            "{name} draws in {power} Power and {weakness} Weakness Markers"
        ));
    } else {
        board.log(&format!("{name} transfers {power} Power Markers in play to itself"));
    }
    board.publish();
    Ok(())
}

/// Board-wide abilities; always run to completion
pub fn resolve_global<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    effect: GlobalEffect,
) -> Result<()> {
    match effect {
        GlobalEffect::SiphonAll => siphon(board, source, true),
        GlobalEffect::SiphonPowerOnly => siphon(board, source, false),
        GlobalEffect::CorruptUndefended => {
            let owner = board.card(source)?.owner;
            board.log(&format!(
                "{} corrupts every undefended Light seal",
                board.card_name(source)
            ));
            for idx in 0..SEAL_COUNT {
                if board.is_over() {
                    break;
                }
                let seal = board.seal(idx);
                if seal.champion.is_none() && seal.alignment == Alignment::Light {
                    scoring::claim_seal(board, idx, Alignment::Dark, owner, Some(source))?;
                }
            }
            Ok(())
        }
    }
}

/// Seals a seal ability may pick, with the alignment it would set
fn seal_effect_candidates<B: BoardAccess>(
    board: &B,
    owner: Side,
    effect: SealEffect,
) -> (Alignment, Vec<SealIndex>) {
    let claim = match effect {
        SealEffect::Influence => board.allegiance(owner),
        SealEffect::Purify | SealEffect::PurifyNeutral => Alignment::Light,
    };
    let candidates = (0..SEAL_COUNT)
        .filter(|idx| {
            let seal = board.seal(*idx);
            seal.champion.is_none()
                && match effect {
                    SealEffect::Influence => seal.alignment != claim,
                    SealEffect::Purify => seal.alignment == Alignment::Dark,
                    SealEffect::PurifyNeutral => seal.alignment == Alignment::Neutral,
                }
        })
        .collect();
    (claim, candidates)
}

/// Ask the owner for a seal and claim it; returns whether a seal was picked
pub fn resolve_seal_target<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    effect: SealEffect,
) -> Result<bool> {
    let owner = board.card(source)?.owner;
    let name = board.card_name(source);
    let (claim, candidates) = seal_effect_candidates(board, owner, effect);
    if candidates.is_empty() {
        board.log(&format!("{name} finds no seal to influence"));
        return Ok(false);
    }
    let prompt = match effect {
        SealEffect::Influence => format!("{name}: choose a Seal without a Champion to turn {claim}."),
        SealEffect::Purify => format!("{name}: choose a Dark Seal without a Champion to Purify."),
        SealEffect::PurifyNeutral => {
            format!("{name}: choose a Neutral Seal without a Champion to Purify.")
        }
    };
    let request = SealRequest {
        source,
        purpose: SealPurpose::Claim(claim),
        candidates,
        optional: false,
        prompt,
    };
    match board.request(owner, Decision::ChooseSeal(request)) {
        Response::Seal(Some(idx)) => {
            scoring::claim_seal(board, idx, claim, owner, Some(source))?;
            Ok(true)
        }
        _ => {
            board.log(&format!("{name}'s seal ability is not used"));
            Ok(false)
        }
    }
}

/// Offer the other side's Fallen One a chance to cancel `source`'s ability
///
/// Returns whether the ability was nullified.
pub fn fallen_one_nullifies<B: BoardAccess>(board: &mut B, source: CardId) -> Result<bool> {
    let responder = board.card(source)?.owner.opponent();
    let fallen = board
        .board(responder)
        .limbo
        .cards
        .iter()
        .copied()
        .find(|id| {
            board
                .card(*id)
                .is_ok_and(|c| c.hooks.limbo == Some(LimboHook::NullifyAbility))
        });
    let Some(fallen) = fallen else {
        return Ok(false);
    };
    let name = board.card_name(source);
    let request = ConfirmRequest {
        context: DecisionContext::FallenOne,
        source: Some(source),
        seal: None,
        message: format!("Move Fallen One from Limbo to the Graveyard to nullify {name}'s ability?"),
    };
    if board.request(responder, Decision::Confirm(request)) == Response::Confirm(true) {
        board.move_card(fallen, Location::Graveyard(responder))?;
        board.log(&format!("Fallen One nullifies {name}'s ability"));
        return Ok(true);
    }
    Ok(false)
}

/// Reveal-and-suppress of the opposing card (Archangel, Baron)
fn nullify_opponent<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    flipping: &[CardId],
) -> Result<()> {
    let name = board.card_name(source);
    let Some(opponent) = opposing_card(board, source) else {
        board.log_verbose(&format!("{name} has nothing to nullify"));
        return Ok(());
    };
    let opponent_name = board.card_name(opponent);
    if !flipping.contains(&opponent) {
        board.log(&format!(
            "{name}'s nullify fails: {opponent_name} was already revealed"
        ));
    } else if is_immune(board, opponent, source) {
        board.log(&format!("{opponent_name} is immune to {name}'s nullify"));
    } else {
        let card = board.card_mut(opponent)?;
        card.face_up = true;
        card.suppressed = true;
        board.log(&format!("{name} reveals and nullifies {opponent_name}"));
        board.publish();
    }
    Ok(())
}

/// Cards counted as Vampyre for `owner`'s Lord
///
/// Duke's kinship only turns its own side's creatures; an opposing Duke
/// adds nothing beyond itself.
fn vampyre_count<B: BoardAccess>(board: &B, owner: Side) -> u32 {
    let in_play = board.in_play();
    let kinship = in_play.iter().any(|id| {
        board.card(*id).is_ok_and(|c| {
            c.owner == owner && c.hooks.passive == Some(PassiveHook::VampyreKinship)
        })
    });
    in_play
        .iter()
        .filter(|id| {
            board.card(**id).is_ok_and(|c| {
                c.def.faction == Faction::Vampyre
                    || (kinship && c.owner == owner && c.is_creature())
            })
        })
        .count() as u32
}

fn run_flip_hook<B: BoardAccess>(board: &mut B, source: CardId, hook: FlipHook) -> Result<()> {
    let (owner, location) = {
        let card = board.card(source)?;
        (card.owner, card.location)
    };
    let name = board.card_name(source);
    match hook {
        FlipHook::FactionPresence {
            faction,
            include_limbo,
        } => {
            let mut pool = board.in_play();
            if include_limbo {
                for side in Side::BOTH {
                    pool.extend(board.board(side).limbo.cards.iter().copied());
                }
            }
            let count = pool
                .iter()
                .filter(|id| board.card(**id).is_ok_and(|c| c.def.faction == faction))
                .count() as u32;
            board.card_mut(source)?.add_markers(MarkerKind::Power, count);
            board.log(&format!("{name} gains {count} Power Markers from {faction:?} presence"));
            board.publish();
        }
        FlipHook::DeckPeek => match board.board(owner).deck.peek_top() {
            Some(top) => {
                let gained = top.base_power.max(0) as u32;
                board.card_mut(source)?.add_markers(MarkerKind::Power, gained);
                board.log(&format!(
                    "{name} gains {gained} Power Markers from the top of its deck ({})",
                    top.name
                ));
                board.publish();
            }
            None => board.log(&format!("{name} finds no card in its deck")),
        },
        FlipHook::NeighborBuff(n) => {
            let Some(idx) = location.seal() else {
                return Ok(());
            };
            let neighbors = [idx.checked_sub(1), Some(idx + 1).filter(|i| *i < SEAL_COUNT)];
            for neighbor in neighbors.into_iter().flatten() {
                if let Some(ally) = board.slot(owner, neighbor) {
                    board.card_mut(ally)?.add_markers(MarkerKind::Power, n as u32);
                    board.log(&format!(
                        "{name} places +{n} Power on {}",
                        board.card_name(ally)
                    ));
                }
            }
            board.publish();
        }
        FlipHook::WeakenOpposite(n) => match opposing_card(board, source) {
            Some(opponent) => {
                apply_effect(board, source, opponent, Effect::PlaceWeakness(n))?;
            }
            None => board.log_verbose(&format!("{name} faces no card to weaken")),
        },
        FlipHook::WeakenEnemies(n) => {
            let enemies: Vec<CardId> = board
                .in_play()
                .into_iter()
                .filter(|id| board.card(*id).is_ok_and(|c| c.owner != owner))
                .collect();
            for enemy in enemies {
                apply_effect(board, source, enemy, Effect::PlaceWeakness(n))?;
            }
        }
        FlipHook::MutualSacrifice => {
            let Some(opponent) = opposing_card(board, source) else {
                board.log(&format!("{name} has no one to sacrifice with"));
                return Ok(());
            };
            let opponent_name = board.card_name(opponent);
            if is_immune(board, opponent, source) {
                board.log(&format!("{opponent_name} is immune to {name}'s sacrifice"));
                return Ok(());
            }
            board.log(&format!("{name} forces a mutual sacrifice with {opponent_name}"));
            combat::destroy_card(board, source)?;
            combat::destroy_card(board, opponent)?;
            if board.card(source)?.def.ability.lust_seal_effect {
                if let Some(idx) = location.seal() {
                    lust_seal_influence(board, source, owner, idx)?;
                }
            }
        }
        FlipHook::ReturnOpposing => match opposing_card(board, source) {
            Some(opponent) => {
                apply_effect(board, source, opponent, Effect::Return)?;
            }
            None => board.log_verbose(&format!("{name} faces no card to return")),
        },
    }
    Ok(())
}

/// After Lust's sacrifice its owner may claim the undefended seal
fn lust_seal_influence<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    owner: Side,
    idx: SealIndex,
) -> Result<()> {
    let claim = board.allegiance(owner);
    let seal = board.seal(idx);
    if seal.champion.is_some() || seal.alignment == claim {
        return Ok(());
    }
    let request = ConfirmRequest {
        context: DecisionContext::LustSealInfluence,
        source: Some(source),
        seal: Some(idx),
        message: format!("Lust: turn Seal {} {claim}?", idx + 1),
    };
    if board.request(owner, Decision::Confirm(request)) == Response::Confirm(true) {
        scoring::claim_seal(board, idx, claim, owner, Some(source))?;
    }
    Ok(())
}

fn run_activate_hook<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    hook: ActivateHook,
) -> Result<()> {
    let owner = board.card(source)?.owner;
    let name = board.card_name(source);
    match hook {
        ActivateHook::SealLock => {
            let candidates: Vec<SealIndex> = (0..SEAL_COUNT)
                .filter(|idx| board.seal(*idx).champion.is_none())
                .collect();
            if candidates.is_empty() {
                board.log(&format!("{name} finds no seal to lock"));
                return Ok(());
            }
            let request = SealRequest {
                source,
                purpose: SealPurpose::Lock,
                candidates,
                optional: false,
                prompt: format!("{name}: choose a Seal the enemy cannot influence this round."),
            };
            if let Response::Seal(Some(idx)) = board.request(owner, Decision::ChooseSeal(request)) {
                board.lock_seal(idx, owner.opponent());
                board.log(&format!("{name} locks Seal {} against the {}", idx + 1, owner.opponent()));
            }
        }
        ActivateHook::SiphonPower => siphon(board, source, false)?,
        ActivateHook::PurgeMarkerType => {
            let kind = match board.request(owner, Decision::ChooseMarkerKind { source }) {
                Response::MarkerKind(kind) => kind,
                _ => MarkerKind::Power,
            };
            let mut removed = 0;
            for id in board.in_play() {
                let card = board.card_mut(id)?;
                removed += match kind {
                    MarkerKind::Power => std::mem::take(&mut card.power_markers),
                    MarkerKind::Weakness => std::mem::take(&mut card.weakness_markers),
                };
            }
            board.log(&format!("{name} destroys all {removed} {kind} Markers in play"));
            board.publish();
        }
        ActivateHook::DestroyMarker => {
            resolve_targeted(
                board,
                source,
                TargetedAbility::new(Effect::DestroyMarker, TargetType::Marked),
            )?;
        }
        ActivateHook::ChampionSealVictory { seals } => {
            let held = (0..SEAL_COUNT)
                .filter_map(|idx| board.seal(idx).champion)
                .filter(|id| board.card(*id).is_ok_and(|c| c.owner == owner))
                .count();
            board.log_verbose(&format!("{name}: {held} of {seals} championed seals"));
            if held >= seals {
                scoring::card_victory(board, owner, name);
            }
        }
        ActivateHook::AcolyteVictory { acolytes } => {
            let in_play = board.in_play();
            let count = in_play
                .iter()
                .filter(|id| board.card(**id).is_ok_and(|c| c.def.faction == Faction::Light))
                .count();
            let has_champion = (0..SEAL_COUNT)
                .filter_map(|idx| board.seal(idx).champion)
                .any(|id| board.card(id).is_ok_and(|c| c.owner == owner));
            board.log_verbose(&format!("{name}: {count} of {acolytes} Acolytes in play"));
            if count >= acolytes && has_champion {
                scoring::card_victory(board, owner, name);
            }
        }
        ActivateHook::VampyreCount => {
            let count = vampyre_count(board, owner);
            board.card_mut(source)?.add_markers(MarkerKind::Power, count);
            board.log(&format!("{name} gains {count} Power Markers from Vampyres in play"));
            board.publish();
        }
        ActivateHook::DeltaSacrifice => {
            if board.card(source)?.marked_for_sacrifice {
                return Ok(());
            }
            let request = ConfirmRequest {
                context: DecisionContext::DeltaSacrifice,
                source: Some(source),
                seal: None,
                message: format!(
                    "{name}: sacrifice at the end of the round to place +3 Power on a creature?"
                ),
            };
            if board.request(owner, Decision::Confirm(request)) == Response::Confirm(true) {
                board.card_mut(source)?.marked_for_sacrifice = true;
                board.log(&format!("{name} will be sacrificed at the end of the round"));
                board.publish();
            }
        }
    }
    Ok(())
}

/// Baron's swap with a creature in its owner's Limbo
fn offer_swap<B: BoardAccess>(board: &mut B, source: CardId) -> Result<()> {
    let (owner, location) = {
        let card = board.card(source)?;
        (card.owner, card.location)
    };
    let Location::Battlefield(_, idx) = location else {
        return Ok(());
    };
    let candidates: Vec<CardId> = board
        .board(owner)
        .limbo
        .cards
        .iter()
        .copied()
        .filter(|id| board.card(*id).is_ok_and(|c| c.is_creature()))
        .collect();
    if candidates.is_empty() {
        return Ok(());
    }
    let name = board.card_name(source);
    let request = TargetRequest {
        source,
        effect: Effect::Return,
        candidates,
        optional: true,
        purpose: TargetPurpose::Swap,
        prompt: format!("{name}: you may swap with a creature in your Limbo."),
    };
    if let Response::Target(Some(incoming)) = board.request(owner, Decision::ChooseTarget(request)) {
        board.move_card(source, Location::Limbo(owner))?;
        board.move_card(incoming, Location::Battlefield(owner, idx))?;
        board.card_mut(incoming)?.face_up = true;
        board.log(&format!(
            "{name} swaps places with {} from Limbo",
            board.card_name(incoming)
        ));
        board.publish();
    }
    Ok(())
}

fn still_in_play<B: BoardAccess>(board: &B, id: CardId) -> bool {
    !board.is_over() && board.location(id).is_some_and(|loc| loc.is_in_play())
}

/// Run one card's abilities for the seal being resolved
///
/// `flipping` lists the cards revealed at this seal this round. A card acts
/// when it is not suppressed and is either flipping or has Activate.
/// Flip-only capabilities fire in a fixed order, then the Activate hook.
pub fn resolve_card<B: BoardAccess>(
    board: &mut B,
    source: CardId,
    flipping: &[CardId],
) -> Result<()> {
    let card = board.card(source)?;
    let is_flipping = flipping.contains(&source);
    if card.suppressed || !(is_flipping || card.def.ability.activate) {
        return Ok(());
    }
    let ability = card.def.ability;
    let hooks = card.hooks;
    board.log_verbose(&format!("{} acts", card.name()));

    if fallen_one_nullifies(board, source)? {
        return Ok(());
    }

    if is_flipping {
        if ability.nullify {
            nullify_opponent(board, source, flipping)?;
        }
        if ability.invulnerable_on_flip {
            board.card_mut(source)?.invincible = true;
            board.log(&format!("{} gains Invulnerability", board.card_name(source)));
            board.publish();
        }
        {
            let card = board.card_mut(source)?;
            if ability.sacrifice_end_of_turn {
                card.marked_for_sacrifice = true;
            }
            if matches!(hooks.end_of_round, Some(EndOfRoundHook::GainPower(_))) {
                card.marked_for_buff = true;
            }
        }

        for hook in hooks.flip {
            if !still_in_play(board, source) {
                return Ok(());
            }
            run_flip_hook(board, source, *hook)?;
        }
        if let Some(allocation) = ability.allocation {
            if still_in_play(board, source) {
                allocate_markers(board, source, allocation)?;
            }
        }
        for targeted in ability.targeted {
            if !still_in_play(board, source) {
                return Ok(());
            }
            resolve_targeted(board, source, *targeted)?;
        }
        if let Some(global) = ability.global {
            if still_in_play(board, source) {
                resolve_global(board, source, global)?;
            }
        }
        if let Some(effect) = ability.seal_target {
            if still_in_play(board, source) {
                resolve_seal_target(board, source, effect)?;
            }
        }
        if ability.swap && still_in_play(board, source) {
            offer_swap(board, source)?;
        }
    }

    if let Some(hook) = hooks.activate {
        if ability.activate && still_in_play(board, source) {
            run_activate_hook(board, source, hook)?;
        }
    }
    Ok(())
}

/// Martyr's purification; the card leaves for the Graveyard once it lands
fn martyr_purify<B: BoardAccess>(board: &mut B, id: CardId) -> Result<bool> {
    if !resolve_seal_target(board, id, SealEffect::PurifyNeutral)? {
        return Ok(false);
    }
    if board.exists(id) {
        let owner = board.card(id)?.owner;
        board.move_card(id, Location::Graveyard(owner))?;
    }
    Ok(true)
}

/// Hooks that fire when a card arrives in Limbo
pub fn on_enter_limbo<B: BoardAccess>(board: &mut B, id: CardId) -> Result<()> {
    if board.is_over() {
        return Ok(());
    }
    let Ok(card) = board.card(id) else {
        return Ok(());
    };
    if card.hooks.limbo == Some(LimboHook::PurifyNeutral) {
        martyr_purify(board, id)?;
    }
    Ok(())
}

/// Whether a manual Limbo trigger has anything to do right now
pub fn limbo_trigger_ready<B: BoardAccess>(board: &B, id: CardId) -> bool {
    let Ok(card) = board.card(id) else {
        return false;
    };
    if !matches!(card.location, Location::Limbo(_)) {
        return false;
    }
    match card.hooks.limbo {
        Some(LimboHook::PurifyNeutral) => {
            !seal_effect_candidates(board, card.owner, SealEffect::PurifyNeutral)
                .1
                .is_empty()
        }
        Some(LimboHook::StrikeBattled) => {
            !target_candidates(board, id, TargetType::Battled).is_empty()
        }
        _ => false,
    }
}

/// `side`'s Limbo cards that can be triggered during Prep
pub fn limbo_triggers<B: BoardAccess>(board: &B, side: Side) -> Vec<CardId> {
    board
        .board(side)
        .limbo
        .cards
        .iter()
        .copied()
        .filter(|id| limbo_trigger_ready(board, *id))
        .collect()
}

/// Fire a manual Limbo ability (Prep command)
pub fn trigger_limbo<B: BoardAccess>(board: &mut B, id: CardId) -> Result<()> {
    if !limbo_trigger_ready(board, id) {
        board.log(&format!("{} has nothing to trigger", board.card_name(id)));
        return Ok(());
    }
    let (owner, hook) = {
        let card = board.card(id)?;
        (card.owner, card.hooks.limbo)
    };
    match hook {
        Some(LimboHook::PurifyNeutral) => {
            martyr_purify(board, id)?;
        }
        Some(LimboHook::StrikeBattled) => {
            let name = board.card_name(id);
            let request = TargetRequest {
                source: id,
                effect: Effect::SaintMichaelDestroy,
                candidates: target_candidates(board, id, TargetType::Battled),
                optional: true,
                purpose: TargetPurpose::Ability,
                prompt: effect_prompt(name, Effect::SaintMichaelDestroy),
            };
            if let Response::Target(Some(target)) =
                board.request(owner, Decision::ChooseTarget(request))
            {
                apply_effect(board, id, target, Effect::SaintMichaelDestroy)?;
            }
        }
        _ => {}
    }
    Ok(())
}
