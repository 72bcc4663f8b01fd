//! The `BoardAccess` capability interface
//!
//! Rules code (abilities, combat, scoring, the seal protocol) is written
//! against this trait rather than against `GameState` plus a pair of
//! controllers. An implementor supplies state access and a way to put a
//! `Decision` to a side; everything else is provided on top of those.
//!
//! `Table` is the production implementor: it owns the controllers and the
//! optional observer, validates answers, and publishes snapshots.

use crate::core::{Alignment, CardId, CardInstance, Location, SealIndex, Side};
use crate::game::{
    Decision, GameEndReason, GameOutcome, GameSnapshot, GameState, GameStateView, Phase,
    PlayerController, Response, Seal, SealStep, StateObserver,
};
use crate::zones::PlayerBoard;
use crate::Result;
use rand::Rng;

/// Narrow board interface used by the rules code
pub trait BoardAccess {
    fn game(&self) -> &GameState;

    fn game_mut(&mut self) -> &mut GameState;

    /// Ask `side` a question and block until a legal answer (or the
    /// decision's default) is available
    fn request(&mut self, side: Side, decision: Decision) -> Response;

    /// Push the current state to observers
    fn publish(&mut self) {}

    // Queries

    fn card(&self, id: CardId) -> Result<&CardInstance> {
        self.game().card(id)
    }

    fn card_mut(&mut self, id: CardId) -> Result<&mut CardInstance> {
        self.game_mut().card_mut(id)
    }

    fn exists(&self, id: CardId) -> bool {
        self.game().cards.contains(id)
    }

    fn location(&self, id: CardId) -> Option<Location> {
        self.game().card(id).ok().map(|c| c.location)
    }

    fn slot(&self, side: Side, idx: SealIndex) -> Option<CardId> {
        self.game().board(side).slot(idx)
    }

    fn seal(&self, idx: SealIndex) -> &Seal {
        &self.game().seals[idx]
    }

    fn board(&self, side: Side) -> &PlayerBoard {
        self.game().board(side)
    }

    fn allegiance(&self, side: Side) -> Alignment {
        self.game().allegiance(side)
    }

    fn in_play(&self) -> Vec<CardId> {
        self.game().in_play()
    }

    fn battled(&self) -> &[CardId] {
        &self.game().battled_this_round
    }

    fn seal_count(&self, side: Side) -> usize {
        self.game().seal_count(side)
    }

    fn is_over(&self) -> bool {
        self.game().is_over()
    }

    // Mutations

    fn move_card(&mut self, id: CardId, to: Location) -> Result<()> {
        self.game_mut().move_card(id, to)?;
        self.publish();
        Ok(())
    }

    fn return_to_deck(&mut self, id: CardId) -> Result<()> {
        self.game_mut().return_to_deck(id)?;
        self.publish();
        Ok(())
    }

    /// Raw alignment write; influence rules live in `scoring::claim_seal`
    fn set_seal_alignment(&mut self, idx: SealIndex, alignment: Alignment) {
        self.game_mut().seals[idx].alignment = alignment;
        self.publish();
    }

    fn lock_seal(&mut self, idx: SealIndex, against: Side) {
        self.game_mut().seals[idx].locked_against = Some(against);
        self.publish();
    }

    fn record_battle(&mut self, id: CardId) {
        let battled = &mut self.game_mut().battled_this_round;
        if !battled.contains(&id) {
            battled.push(id);
        }
    }

    fn set_step(&mut self, step: Option<SealStep>) {
        self.game_mut().step = step;
        if let Some(step) = step {
            self.log_verbose(&format!("Step: {step}"));
        }
        self.publish();
    }

    fn set_phase(&mut self, phase: Phase) {
        self.game_mut().phase = phase;
        self.publish();
    }

    /// First call wins; later calls are ignored
    fn end_game(&mut self, winner: Option<Side>, reason: GameEndReason) {
        if self.is_over() {
            return;
        }
        let game = self.game_mut();
        game.outcome = Some(GameOutcome { winner, reason });
        game.phase = Phase::GameOver;
        game.step = None;
        self.publish();
    }

    // Logging and randomness

    fn log(&self, message: &str) {
        self.game().logger.normal(message);
    }

    fn log_verbose(&self, message: &str) {
        self.game().logger.verbose(message);
    }

    /// Fair coin from the game RNG
    fn coin_flip(&self) -> bool {
        self.game().rng.borrow_mut().gen_bool(0.5)
    }

    fn random_index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.game().rng.borrow_mut().gen_range(0..len)
    }

    fn card_name(&self, id: CardId) -> &'static str {
        self.card(id).map(|c| c.name()).unwrap_or("<gone>")
    }
}

/// Production `BoardAccess`: game state plus both controllers
pub struct Table<'a> {
    pub game: &'a mut GameState,
    controllers: [&'a mut dyn PlayerController; 2],
    observer: Option<&'a mut dyn StateObserver>,
}

impl<'a> Table<'a> {
    /// `player` and `enemy` must report `Side::Player` and `Side::Enemy`
    pub fn new(
        game: &'a mut GameState,
        player: &'a mut dyn PlayerController,
        enemy: &'a mut dyn PlayerController,
    ) -> Self {
        Table {
            game,
            controllers: [player, enemy],
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn controller_mut(&mut self, side: Side) -> &mut dyn PlayerController {
        &mut *self.controllers[side.index()]
    }

    /// Notify both controllers that the game is over
    pub fn notify_game_end(&mut self) {
        let winner = self.game.outcome.as_ref().and_then(|o| o.winner);
        for side in Side::BOTH {
            let view = GameStateView::new(&*self.game, side);
            self.controllers[side.index()].on_game_end(&view, winner == Some(side));
        }
    }

    fn ask(&mut self, side: Side, decision: &Decision) -> Response {
        let view = GameStateView::new(&*self.game, side);
        let controller = &mut *self.controllers[side.index()];
        match decision {
            Decision::ChooseAlignment => Response::Alignment(controller.choose_alignment(&view)),
            Decision::Prep(req) => Response::Prep(controller.choose_prep_action(&view, req)),
            Decision::AllocateMarker(req) => {
                Response::Marker(controller.choose_marker_target(&view, req))
            }
            Decision::ChooseTarget(req) => {
                Response::Target(controller.choose_ability_target(&view, req))
            }
            Decision::ChooseSeal(req) => Response::Seal(controller.choose_seal(&view, req)),
            Decision::Confirm(req) => Response::Confirm(controller.confirm(&view, req)),
            Decision::ChooseMarkerKind { source } => {
                Response::MarkerKind(controller.choose_marker_kind(&view, *source))
            }
        }
    }
}

impl<'a> BoardAccess for Table<'a> {
    fn game(&self) -> &GameState {
        self.game
    }

    fn game_mut(&mut self) -> &mut GameState {
        self.game
    }

    fn request(&mut self, side: Side, decision: Decision) -> Response {
        let previous_phase = self.game.phase;
        if let Some(phase) = decision.phase() {
            self.game.phase = phase;
        }
        self.game.instruction = decision.instruction();
        self.game.pending = Some((side, decision.clone()));
        self.game.decisions_asked += 1;
        self.publish();

        let limit = self.game.config.max_invalid_responses;
        let mut rejected = 0;
        let response = loop {
            let response = self.ask(side, &decision);
            if decision.admits(&response) {
                break response;
            }
            rejected += 1;
            self.game.logger.verbose(&format!(
                "{side} gave an illegal {} answer ({response:?}), ignored",
                decision.kind_name()
            ));
            if rejected >= limit {
                self.game.logger.normal(&format!(
                    "{side} keeps answering illegally; the {} decision is declined",
                    decision.kind_name()
                ));
                break decision.default_response();
            }
        };

        self.game.pending = None;
        self.game.instruction.clear();
        // Interrupt states return to whatever phase asked
        if decision.phase().is_some() && !self.game.is_over() {
            self.game.phase = previous_phase;
        }
        self.publish();
        response
    }

    fn publish(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            let snapshot = GameSnapshot::capture(&*self.game, observer.viewer());
            observer.on_snapshot(&snapshot);
        }
    }
}
