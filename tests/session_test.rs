//! Async session host driven like a UI would drive it

use seven_seals::config::GameConfig;
use seven_seals::core::Alignment;
use seven_seals::game::{Command, Decision, DecisionContext};
use seven_seals::session::GameSession;
use seven_seals::tournament::ControllerType;
use seven_seals::SealsError;
use std::time::Duration;

/// Place a card whenever possible, otherwise take the neutral answer
fn choose(decision: &Decision) -> Command {
    match decision {
        Decision::Prep(req) => match (req.hand.first(), req.vacant.first()) {
            (Some(card), Some(slot)) => Command::PlaceCard {
                card: *card,
                slot: *slot,
            },
            _ => Command::EndPrep,
        },
        Decision::Confirm(req) if req.context == DecisionContext::FallenOne => {
            Command::ResolveDecision(false)
        }
        _ => Command::ForceSkip,
    }
}

#[tokio::test]
async fn test_session_plays_to_the_end() {
    let config = GameConfig::default().with_seed(21);
    let mut session = GameSession::start(config, ControllerType::Heuristic, 9);

    let first = session.next_decision().await.unwrap().unwrap();
    assert_eq!(first.pending, Some(Decision::ChooseAlignment));
    session.send_text("dark").unwrap();

    let mut answered = 1;
    while let Some(snapshot) = session.next_decision().await.unwrap() {
        let decision = snapshot.pending.as_ref().unwrap();
        session.send(choose(decision)).unwrap();
        answered += 1;
        assert!(answered < 10_000, "session never finished");
    }

    let last = session.latest().unwrap();
    assert!(last.is_game_over());
    let result = session.finish().await.unwrap();
    assert_eq!(result.allegiance, [Alignment::Dark, Alignment::Light]);
    assert!(result.rounds_played >= 1 && result.rounds_played <= 3);
}

#[tokio::test]
async fn test_unparseable_text_is_rejected_before_sending() {
    let config = GameConfig::default().with_seed(3);
    let session = GameSession::start(config, ControllerType::Zero, 1);

    let err = session.send_text("cast fireball").unwrap_err();
    assert!(matches!(err, SealsError::InvalidCommand(_)));

    let result = session.finish().await.unwrap();
    assert!(result.winner.is_some() || result.seals[0] == result.seals[1]);
}

#[tokio::test]
async fn test_subscribers_see_the_same_state() {
    let config = GameConfig::default().with_seed(8);
    let mut session = GameSession::start(config, ControllerType::Random, 4);
    let watcher = session.subscribe();

    // The engine is blocked on the human seat, so nothing newer exists
    let snapshot = session.next_decision().await.unwrap().unwrap();
    let seen = watcher.borrow().clone().unwrap();
    assert_eq!(seen.decision_seq, snapshot.decision_seq);

    let result = session.finish().await.unwrap();
    assert!(result.rounds_played >= 1);
}

#[tokio::test]
async fn test_skipping_every_decision_never_stalls() {
    for seed in 0..12u64 {
        let config = GameConfig::default().with_seed(seed);
        let mut session = GameSession::start(config, ControllerType::Heuristic, seed + 100);

        let drive = async {
            while let Some(snapshot) = session.next_decision().await.unwrap() {
                let command = match snapshot.decision_context {
                    Some(DecisionContext::FallenOne) => Command::ResolveDecision(false),
                    _ => Command::ForceSkip,
                };
                session.send(command).unwrap();
            }
        };
        tokio::time::timeout(Duration::from_secs(10), drive)
            .await
            .unwrap_or_else(|_| panic!("session with seed {seed} stalled"));

        let result = session.finish().await.unwrap();
        assert!(result.rounds_played >= 1 && result.rounds_played <= 3);
    }
}
