//! Interactive terminal controller for human players
//!
//! Prints the pending decision with its options and reads text commands
//! (see `command`) line by line. End of input closes the seat.

use crate::core::Side;
use crate::game::command_controller::{CommandController, CommandSource};
use crate::game::controller::GameStateView;
use crate::game::{Command, CommandOutcome, Decision};
use std::io::{self, BufRead, BufReader, Write};

const HELP: &str = "\
Commands:
  light | dark          choose allegiance
  place <card> <seal>   put a hand card into the slot of seal 1-7
  end                   end Prep
  trigger <card>        trigger a Limbo card
  mark <card> | done    place an allocation marker / finish allocating
  target <card>         pick an ability target
  seal <n>              pick a seal
  yes | no              answer a confirmation
  power | weakness      marker type for The Almighty
  skip                  force-skip the pending decision
  board                 show the seals
  ?                     this help";

pub struct TerminalInput {
    input: Box<dyn BufRead + Send>,
}

impl TerminalInput {
    fn card_line(view: &GameStateView, id: crate::core::CardId) -> String {
        match view.effective_power(id) {
            Some(power) => format!("  {id}: {} ({power})", view.card_name(id)),
            None => format!("  {id}: {}", view.card_name(id)),
        }
    }

    fn show_decision(view: &GameStateView, decision: &Decision) {
        println!("\n[{}] {}", view.side(), decision.instruction());
        match decision {
            Decision::Prep(req) => {
                println!("Hand:");
                for id in &req.hand {
                    println!("{}", Self::card_line(view, *id));
                }
                let vacant: Vec<String> = req.vacant.iter().map(|i| (i + 1).to_string()).collect();
                println!("Vacant seals: {}", vacant.join(" "));
                if !req.limbo_triggers.is_empty() {
                    println!("Limbo triggers:");
                    for id in &req.limbo_triggers {
                        println!("{}", Self::card_line(view, *id));
                    }
                }
            }
            Decision::AllocateMarker(req) => {
                for id in &req.candidates {
                    println!("{}", Self::card_line(view, *id));
                }
            }
            Decision::ChooseTarget(req) => {
                for id in &req.candidates {
                    println!("{}", Self::card_line(view, *id));
                }
                if req.optional {
                    println!("  (skip to decline)");
                }
            }
            Decision::ChooseSeal(req) => {
                for idx in &req.candidates {
                    println!("  seal {}: {}", idx + 1, view.seal(*idx).alignment);
                }
            }
            Decision::ChooseAlignment | Decision::Confirm(_) | Decision::ChooseMarkerKind { .. } => {}
        }
    }

    fn show_board(view: &GameStateView) {
        for (idx, seal) in view.seals().iter().enumerate() {
            let slot = |side: Side| {
                view.slot(side, idx)
                    .map(|id| view.card_name(id))
                    .unwrap_or_else(|| "-".to_string())
            };
            let champion = seal
                .champion
                .map(|id| view.card_name(id))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "Seal {} [{}] champion {champion} | Player {} | Enemy {}",
                idx + 1,
                seal.alignment,
                slot(Side::Player),
                slot(Side::Enemy)
            );
        }
        println!(
            "Score: Player {} - Enemy {}",
            view.seal_count(Side::Player),
            view.seal_count(Side::Enemy)
        );
    }
}

impl CommandSource for TerminalInput {
    fn next_command(&mut self, view: &GameStateView, decision: &Decision) -> Option<Command> {
        Self::show_decision(view, decision);
        loop {
            print!("> ");
            // A failed flush only delays the prompt
            let _ = io::stdout().flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    eprintln!("Error reading input: {err}");
                    return None;
                }
            }
            match line.trim() {
                "" => continue,
                "?" | "help" => println!("{HELP}"),
                "board" | "v" => Self::show_board(view),
                text => match text.parse::<Command>() {
                    Ok(command) => return Some(command),
                    Err(err) => println!("{err}. Type ? for help."),
                },
            }
        }
    }

    fn on_rejected(&mut self, _view: &GameStateView, command: &Command, outcome: CommandOutcome) {
        match outcome {
            CommandOutcome::SkipRefused => println!("You must answer Fallen One's question."),
            _ => println!("{command:?} is not a legal answer right now."),
        }
    }
}

pub type InteractiveController = CommandController<TerminalInput>;

impl InteractiveController {
    /// Human seat reading from stdin
    pub fn new(side: Side) -> Self {
        Self::with_input(side, BufReader::new(io::stdin()))
    }

    pub fn with_input(side: Side, input: impl BufRead + Send + 'static) -> Self {
        CommandController::with_source(
            side,
            TerminalInput {
                input: Box::new(input),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::{EntityId, MarkerKind};
    use crate::game::{GameState, PlayerController, PrepAction, PrepRequest};
    use std::io::Cursor;

    #[test]
    fn test_reads_commands_until_legal() {
        let game = GameState::new(GameConfig::default());
        let view = GameStateView::new(&game, Side::Player);
        let script = "?\nnonsense\nplace 4 1\nplace 4 2\nweakness\n";
        let mut human = InteractiveController::with_input(Side::Player, Cursor::new(script));

        let request = PrepRequest {
            hand: vec![EntityId::new(4)],
            vacant: vec![1],
            limbo_triggers: vec![],
        };
        assert_eq!(
            human.choose_prep_action(&view, &request),
            PrepAction::Place {
                card: EntityId::new(4),
                slot: 1
            }
        );
        assert_eq!(
            human.choose_marker_kind(&view, EntityId::new(4)),
            MarkerKind::Weakness
        );
        // End of input
        assert_eq!(human.choose_marker_kind(&view, EntityId::new(4)), MarkerKind::Power);
    }
}
