//! Force-skip on decisions the rules treat as mandatory

use seven_seals::core::{Alignment, Side};
use seven_seals::game::{
    resolution, BoardAccess, Command, CommandController, Sandbox, ZeroController,
};

type ListedCommands = CommandController<std::vec::IntoIter<Command>>;

fn commanded(side: Side, commands: Vec<Command>) -> Box<ListedCommands> {
    Box::new(CommandController::with_source(side, commands.into_iter()))
}

#[test]
fn test_skip_cancels_mandatory_ability_target() {
    let mut board = Sandbox::new(Alignment::Dark);
    let famine = board.place("Famine", Side::Player, 0).unwrap();
    let herald = board.place("Herald", Side::Enemy, 3).unwrap();
    board.game.card_mut(herald).unwrap().face_up = true;
    // A re-asked target question would consume the second command
    let mut board = board.with_controllers(
        commanded(
            Side::Player,
            vec![Command::ForceSkip, Command::SelectAbilityTarget(herald)],
        ),
        Box::new(ZeroController::new(Side::Enemy)),
    );

    resolution::resolve_seal(&mut board, 0).unwrap();

    assert_eq!(board.slot(Side::Enemy, 3), Some(herald));
    assert!(board.card(famine).unwrap().face_up);
    // Famine still sieges its undefended seal
    assert_eq!(board.seal(0).alignment, Alignment::Dark);
}

#[test]
fn test_skip_cancels_mandatory_seal_choice() {
    let mut board = Sandbox::new(Alignment::Light);
    let nephilim = board.place("Nephilim", Side::Player, 6).unwrap();
    board.game.card_mut(nephilim).unwrap().face_up = true;
    let mut board = board.with_controllers(
        commanded(Side::Player, vec![Command::ForceSkip, Command::SelectSeal(0)]),
        Box::new(ZeroController::new(Side::Enemy)),
    );

    resolution::resolve_seal(&mut board, 6).unwrap();

    for idx in 0..7 {
        assert_eq!(board.seal(idx).locked_against, None);
    }
}
