//! Controllers driven by `Command`s
//!
//! A human seat doesn't answer typed requests directly; it sends commands,
//! and whatever does not answer the pending decision is ignored with a log
//! line. `CommandController` does that translation for any `CommandSource`
//! (a channel, a terminal). When the source runs dry every remaining
//! decision gets its neutral answer so the game still terminates.

use crate::core::{Alignment, CardId, MarkerKind, SealIndex, Side};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{
    AllocationRequest, Command, CommandOutcome, ConfirmRequest, Decision, PrepAction,
    PrepRequest, Response, SealRequest, TargetRequest,
};

/// Supplies commands one at a time
pub trait CommandSource {
    /// Next command for `decision`; `None` once the source is closed
    fn next_command(&mut self, view: &GameStateView, decision: &Decision) -> Option<Command>;

    /// Called when a command was not accepted
    fn on_rejected(&mut self, _view: &GameStateView, _command: &Command, _outcome: CommandOutcome) {}
}

pub struct CommandController<S> {
    side: Side,
    source: S,
    closed: bool,
}

impl<S: CommandSource> CommandController<S> {
    pub fn with_source(side: Side, source: S) -> Self {
        CommandController {
            side,
            source,
            closed: false,
        }
    }

    /// Whether the source has closed and decisions are being declined
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn drive(&mut self, view: &GameStateView, decision: Decision) -> Response {
        loop {
            if self.closed {
                return decision.default_response();
            }
            let Some(command) = self.source.next_command(view, &decision) else {
                self.closed = true;
                view.logger().normal(&format!(
                    "{} has disconnected; remaining decisions are declined",
                    self.side
                ));
                continue;
            };
            let outcome = command.answer(&decision);
            match outcome {
                CommandOutcome::Answered(response) => return response,
                CommandOutcome::Ignored => view.logger().normal(&format!(
                    "{} command {command:?} ignored: {}",
                    self.side,
                    decision.instruction()
                )),
                CommandOutcome::SkipRefused => view
                    .logger()
                    .normal("Cannot skip while Fallen One's nullify is being decided"),
            }
            self.source.on_rejected(view, &command, outcome);
        }
    }
}

impl<S: CommandSource> PlayerController for CommandController<S> {
    fn side(&self) -> Side {
        self.side
    }

    fn choose_alignment(&mut self, view: &GameStateView) -> Alignment {
        match self.drive(view, Decision::ChooseAlignment) {
            Response::Alignment(alignment) => alignment,
            _ => Alignment::Light,
        }
    }

    fn choose_prep_action(&mut self, view: &GameStateView, request: &PrepRequest) -> PrepAction {
        match self.drive(view, Decision::Prep(request.clone())) {
            Response::Prep(action) => action,
            _ => PrepAction::EndPrep,
        }
    }

    fn choose_marker_target(
        &mut self,
        view: &GameStateView,
        request: &AllocationRequest,
    ) -> Option<CardId> {
        match self.drive(view, Decision::AllocateMarker(request.clone())) {
            Response::Marker(choice) => choice,
            _ => None,
        }
    }

    fn choose_ability_target(
        &mut self,
        view: &GameStateView,
        request: &TargetRequest,
    ) -> Option<CardId> {
        match self.drive(view, Decision::ChooseTarget(request.clone())) {
            Response::Target(choice) => choice,
            _ => None,
        }
    }

    fn choose_seal(&mut self, view: &GameStateView, request: &SealRequest) -> Option<SealIndex> {
        match self.drive(view, Decision::ChooseSeal(request.clone())) {
            Response::Seal(choice) => choice,
            _ => None,
        }
    }

    fn confirm(&mut self, view: &GameStateView, request: &ConfirmRequest) -> bool {
        matches!(
            self.drive(view, Decision::Confirm(request.clone())),
            Response::Confirm(true)
        )
    }

    fn choose_marker_kind(&mut self, view: &GameStateView, source: CardId) -> MarkerKind {
        match self.drive(view, Decision::ChooseMarkerKind { source }) {
            Response::MarkerKind(kind) => kind,
            _ => MarkerKind::Power,
        }
    }
}

/// Commands from a fixed list, for tests and replays
impl CommandSource for std::vec::IntoIter<Command> {
    fn next_command(&mut self, _view: &GameStateView, _decision: &Decision) -> Option<Command> {
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::{EntityId, Effect};
    use crate::game::{DecisionContext, GameState, TargetPurpose};

    fn controller(commands: Vec<Command>) -> CommandController<std::vec::IntoIter<Command>> {
        CommandController::with_source(Side::Player, commands.into_iter())
    }

    #[test]
    fn test_wrong_commands_are_skipped() {
        let game = GameState::new(GameConfig::default());
        let view = GameStateView::new(&game, Side::Player);
        let request = TargetRequest {
            source: EntityId::new(1),
            effect: Effect::Destroy,
            candidates: vec![EntityId::new(4), EntityId::new(5)],
            optional: false,
            purpose: TargetPurpose::Ability,
            prompt: "Famine: destroy any card in play.".to_string(),
        };
        let mut human = controller(vec![
            Command::EndPrep,
            Command::SelectAbilityTarget(EntityId::new(9)),
            Command::SelectAbilityTarget(EntityId::new(5)),
        ]);
        assert_eq!(human.choose_ability_target(&view, &request), Some(EntityId::new(5)));
        assert!(!human.is_closed());
    }

    #[test]
    fn test_closed_source_declines() {
        let game = GameState::new(GameConfig::default());
        let view = GameStateView::new(&game, Side::Player);
        let mut human = controller(vec![Command::ForceSkip]);
        let request = ConfirmRequest {
            context: DecisionContext::FallenOne,
            source: None,
            seal: None,
            message: String::new(),
        };
        // Skip is refused, then the source runs dry
        assert!(!human.confirm(&view, &request));
        assert!(human.is_closed());
        assert_eq!(
            human.choose_prep_action(
                &view,
                &PrepRequest {
                    hand: vec![EntityId::new(2)],
                    vacant: vec![0],
                    limbo_triggers: vec![],
                }
            ),
            PrepAction::EndPrep
        );
    }
}
