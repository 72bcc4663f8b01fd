//! Game engine: state, seals, round structure and decision drivers

pub mod abilities;
pub mod board;
pub mod channel_controller;
pub mod combat;
pub mod command;
pub mod command_controller;
pub mod controller;
pub mod decision;
pub mod game_loop;
pub mod heuristic_controller;
pub mod interactive_controller;
pub mod logger;
pub mod phase;
pub mod random_controller;
pub mod resolution;
pub mod round;
pub mod sandbox;
pub mod scoring;
pub mod scripted_controller;
pub mod seal;
pub mod snapshot;
pub mod state;
pub mod zero_controller;

pub use board::{BoardAccess, Table};
pub use channel_controller::ChannelController;
pub use combat::BattleOutcome;
pub use command::{Command, CommandOutcome};
pub use command_controller::{CommandController, CommandSource};
pub use controller::{GameStateView, PlayerController};
pub use decision::{
    AllocationRequest, ConfirmRequest, Decision, DecisionContext, PrepAction, PrepRequest,
    Response, SealPurpose, SealRequest, TargetPurpose, TargetRequest,
};
pub use game_loop::{GameEndReason, GameLoop, GameResult, VerbosityLevel};
pub use heuristic_controller::HeuristicController;
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputMode};
pub use phase::{Phase, SealStep};
pub use random_controller::RandomController;
pub use sandbox::Sandbox;
pub use scripted_controller::ScriptedController;
pub use seal::Seal;
pub use snapshot::{CardView, GameSnapshot, SealView, SideSummary, StateObserver};
pub use state::{GameOutcome, GameState};
pub use zero_controller::ZeroController;
