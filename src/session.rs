//! Async host for a human-vs-AI game
//!
//! The engine is synchronous and blocks on its controllers, so it runs on a
//! `spawn_blocking` thread. The human seat (always the Player) is a
//! `ChannelController` fed through an unbounded mpsc channel; every snapshot
//! the engine publishes lands on a `watch` channel, so a UI only ever sees
//! the latest state.
//!
//! ```no_run
//! # use seven_seals::{config::GameConfig, session::GameSession, tournament::ControllerType};
//! # use seven_seals::game::Command;
//! # async fn demo() -> seven_seals::Result<()> {
//! let mut session = GameSession::start(GameConfig::default(), ControllerType::Heuristic, 1);
//! while let Some(snapshot) = session.next_decision().await? {
//!     println!("{}", snapshot.instruction);
//!     session.send(Command::ForceSkip)?;
//! }
//! let result = session.finish().await?;
//! # Ok(())
//! # }
//! ```

use crate::config::GameConfig;
use crate::core::Side;
use crate::game::{
    ChannelController, Command, GameLoop, GameResult, GameSnapshot, GameState, OutputMode,
};
use crate::tournament::ControllerType;
use crate::{Result, SealsError};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

pub struct GameSession {
    commands: Option<mpsc::UnboundedSender<Command>>,
    snapshots: watch::Receiver<Option<GameSnapshot>>,
    engine: JoinHandle<Result<GameResult>>,
    /// Serial of the last decision handed out by `next_decision`
    last_decision: u64,
}

impl GameSession {
    /// Start a game against an AI seat; must be called inside a tokio runtime
    pub fn start(config: GameConfig, enemy: ControllerType, enemy_seed: u64) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(None);

        let engine = tokio::task::spawn_blocking(move || {
            let mut game = GameState::new(config);
            game.logger.set_output_mode(OutputMode::Memory);
            let mut human = ChannelController::new(Side::Player, command_rx);
            let mut ai = enemy.build(Side::Enemy, enemy_seed);
            let mut observer = |snapshot: &GameSnapshot| {
                snapshot_tx.send_replace(Some(snapshot.clone()));
            };
            GameLoop::new(&mut game).run_game_observed(&mut human, &mut *ai, &mut observer)
        });

        GameSession {
            commands: Some(command_tx),
            snapshots: snapshot_rx,
            engine,
            last_decision: 0,
        }
    }

    /// Queue a command for the human seat
    pub fn send(&self, command: Command) -> Result<()> {
        self.commands
            .as_ref()
            .ok_or(SealsError::SessionClosed)?
            .send(command)
            .map_err(|_| SealsError::SessionClosed)
    }

    /// Parse and queue a text command
    pub fn send_text(&self, line: &str) -> Result<()> {
        self.send(line.parse()?)
    }

    /// A sender for feeding commands from another task
    pub fn command_sender(&self) -> Option<mpsc::UnboundedSender<Command>> {
        self.commands.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<GameSnapshot>> {
        self.snapshots.clone()
    }

    /// Most recent snapshot, if the engine has published one
    pub fn latest(&self) -> Option<GameSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Wait for the next decision the human seat has to answer
    ///
    /// Returns `None` once the game is over. A command that was ignored
    /// leaves the current decision open, so call this only after a command
    /// was accepted; `latest()` shows the open question otherwise.
    pub async fn next_decision(&mut self) -> Result<Option<GameSnapshot>> {
        let after = self.last_decision;
        let snapshot = self
            .snapshots
            .wait_for(|s| {
                s.as_ref().is_some_and(|s| {
                    s.outcome.is_some() || (s.pending.is_some() && s.decision_seq > after)
                })
            })
            .await
            .map_err(|_| SealsError::SessionClosed)?
            .clone();
        match snapshot {
            Some(snapshot) if snapshot.outcome.is_none() => {
                self.last_decision = snapshot.decision_seq;
                Ok(Some(snapshot))
            }
            _ => Ok(None),
        }
    }

    /// Close the human seat and wait for the engine
    ///
    /// Decisions still pending are answered with their neutral value.
    pub async fn finish(mut self) -> Result<GameResult> {
        self.commands.take();
        self.engine.await?
    }
}
