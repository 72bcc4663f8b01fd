//! Human seat fed from a tokio channel
//!
//! The engine runs on a blocking thread, so the receiver is drained with
//! `blocking_recv`. Dropping every sender closes the seat.

use crate::game::command_controller::{CommandController, CommandSource};
use crate::game::controller::GameStateView;
use crate::game::{Command, Decision};
use crate::core::Side;
use tokio::sync::mpsc::UnboundedReceiver;

pub struct CommandChannel {
    receiver: UnboundedReceiver<Command>,
}

impl CommandSource for CommandChannel {
    fn next_command(&mut self, _view: &GameStateView, _decision: &Decision) -> Option<Command> {
        self.receiver.blocking_recv()
    }
}

pub type ChannelController = CommandController<CommandChannel>;

impl ChannelController {
    pub fn new(side: Side, receiver: UnboundedReceiver<Command>) -> Self {
        CommandController::with_source(side, CommandChannel { receiver })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::Alignment;
    use crate::game::{GameState, PlayerController};
    use tokio::sync::mpsc;

    #[test]
    fn test_channel_answers_then_closes() {
        let game = GameState::new(GameConfig::default());
        let view = GameStateView::new(&game, Side::Player);
        let (tx, rx) = mpsc::unbounded_channel();
        let mut human = ChannelController::new(Side::Player, rx);

        tx.send(Command::SelectAlignment(Alignment::Dark)).unwrap();
        drop(tx);
        assert_eq!(human.choose_alignment(&view), Alignment::Dark);
        // Sender gone: neutral answer
        assert_eq!(human.choose_alignment(&view), Alignment::Light);
        assert!(human.is_closed());
    }
}
