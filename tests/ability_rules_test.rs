//! Card ability behaviour through whole seal resolutions

use seven_seals::core::{Alignment, Location, Side, TargetType};
use seven_seals::game::{
    abilities, combat, resolution, BoardAccess, HeuristicController, Response, Sandbox,
    ScriptedController, ZeroController,
};

#[test]
fn test_archangel_suppresses_flipping_opponent() {
    let mut board = Sandbox::new(Alignment::Light);
    let archangel = board.place("Archangel", Side::Player, 1).unwrap();
    let hades = board.place("Hades", Side::Enemy, 1).unwrap();

    resolution::resolve_seal(&mut board, 1).unwrap();

    // Hades never gained its markers but still wins the battle
    assert_eq!(board.card(hades).unwrap().power_markers, 0);
    assert!(board.board(Side::Player).limbo.contains(archangel));
    assert_eq!(board.seal(1).alignment, Alignment::Dark);
}

#[test]
fn test_sloth_is_not_a_legal_creature_target() {
    let mut board = Sandbox::new(Alignment::Dark);
    let noble = board.place("Noble", Side::Player, 0).unwrap();
    let sloth = board.place("Sloth", Side::Enemy, 3).unwrap();
    let herald = board.place("Herald", Side::Enemy, 4).unwrap();

    let candidates = abilities::target_candidates(&board, noble, TargetType::Creature);
    assert_eq!(candidates, vec![herald]);

    let applied = abilities::apply_effect(
        &mut board,
        noble,
        sloth,
        seven_seals::core::Effect::Destroy,
    )
    .unwrap();
    assert!(!applied);
    assert_eq!(board.slot(Side::Enemy, 3), Some(sloth));
}

#[test]
fn test_lust_sacrifice_then_claims_seal() {
    let mut board = Sandbox::new(Alignment::Light).with_controllers(
        Box::new(ZeroController::new(Side::Player)),
        Box::new(ScriptedController::new(
            Side::Enemy,
            vec![Response::Confirm(true)],
        )),
    );
    let herald = board.place("Herald", Side::Player, 2).unwrap();
    board.game.card_mut(herald).unwrap().face_up = true;
    let lust = board.place("Lust", Side::Enemy, 2).unwrap();

    resolution::resolve_seal(&mut board, 2).unwrap();

    assert!(board.board(Side::Player).limbo.contains(herald));
    assert!(board.board(Side::Enemy).limbo.contains(lust));
    assert_eq!(board.seal(2).alignment, Alignment::Dark);
}

#[test]
fn test_martyr_purifies_when_it_reaches_limbo() {
    let mut board = Sandbox::new(Alignment::Light);
    let martyr = board.place("Martyr", Side::Player, 3).unwrap();

    combat::destroy_card(&mut board, martyr).unwrap();

    assert_eq!(board.seal(0).alignment, Alignment::Light);
    assert_eq!(board.location(martyr), Some(Location::Graveyard(Side::Player)));
}

#[test]
fn test_fallen_one_cancels_enemy_ability() {
    let setup = |fallen: bool| {
        let player: Box<ScriptedController> = Box::new(ScriptedController::new(
            Side::Player,
            vec![Response::Confirm(true)],
        ));
        let mut board = Sandbox::new(Alignment::Light)
            .with_controllers(player, Box::new(HeuristicController::with_seed(Side::Enemy, 3)));
        let herald = board.place("Herald", Side::Player, 3).unwrap();
        board.game.card_mut(herald).unwrap().face_up = true;
        let fallen_one = fallen.then(|| board.put_in_limbo("Fallen One", Side::Player).unwrap());
        board.place("Famine", Side::Enemy, 0).unwrap();
        resolution::resolve_seal(&mut board, 0).unwrap();
        (board, herald, fallen_one)
    };

    let (board, herald, _) = setup(false);
    assert!(board.board(Side::Player).limbo.contains(herald));

    let (board, herald, fallen_one) = setup(true);
    assert_eq!(board.slot(Side::Player, 3), Some(herald));
    let fallen_one = fallen_one.unwrap();
    assert_eq!(
        board.location(fallen_one),
        Some(Location::Graveyard(Side::Player))
    );
    // Famine still takes the undefended seal
    assert_eq!(board.seal(0).alignment, Alignment::Dark);
}

#[test]
fn test_nephilim_lock_blocks_enemy_claim_until_round_end() {
    let mut board = Sandbox::new(Alignment::Light);
    let nephilim = board.place("Nephilim", Side::Player, 6).unwrap();
    board.game.card_mut(nephilim).unwrap().face_up = true;

    resolution::resolve_seal(&mut board, 6).unwrap();
    // ZeroController locks the first offered seal
    assert_eq!(board.seal(0).locked_against, Some(Side::Enemy));

    let claimed =
        seven_seals::game::scoring::claim_seal(&mut board, 0, Alignment::Dark, Side::Enemy, None)
            .unwrap();
    assert!(!claimed);

    seven_seals::game::round::end_of_round(&mut board).unwrap();
    assert_eq!(board.seal(0).locked_against, None);
}
