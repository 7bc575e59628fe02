//! Ошибки движка: конфиг, порядок операций, восстановимые ошибки ввода.

use holdem_engine::domain::{Chips, TableConfig, TableStakes, MAX_SEATS};
use holdem_engine::engine::{EngineError, GameState, HandPhase, HandStatus, PlayerAction, PlayerActionKind};
use holdem_engine::infra::DeterministicRng;

fn stakes() -> TableStakes {
    TableStakes::new(Chips(5), Chips(10), Chips::ZERO)
}

fn new_game(cfg: TableConfig) -> Result<GameState<DeterministicRng>, EngineError> {
    GameState::new(cfg, DeterministicRng::from_seed(1))
}

//
// ---- конфиг ----
//

#[test]
fn fewer_than_two_seats_is_fatal() {
    let cfg = TableConfig::uniform(1, Chips(100), stakes());
    assert_eq!(new_game(cfg).err(), Some(EngineError::NotEnoughPlayers));

    // два места, но живое только одно
    let cfg = TableConfig {
        starting_stacks: vec![Chips(100), Chips::ZERO],
        stakes: stakes(),
    };
    assert_eq!(new_game(cfg).err(), Some(EngineError::NotEnoughPlayers));
}

#[test]
fn too_many_seats_is_invalid_config() {
    let cfg = TableConfig::uniform(MAX_SEATS + 1, Chips(100), stakes());
    assert!(matches!(new_game(cfg), Err(EngineError::InvalidConfig(_))));

    let cfg = TableConfig::uniform(MAX_SEATS, Chips(100), stakes());
    assert!(new_game(cfg).is_ok());
}

#[test]
fn bad_stakes_are_invalid_config() {
    let cfg = TableConfig::uniform(3, Chips(100), TableStakes::new(Chips(10), Chips(5), Chips::ZERO));
    assert!(matches!(new_game(cfg), Err(EngineError::InvalidConfig(_))));

    let cfg = TableConfig::uniform(3, Chips(100), TableStakes::new(Chips::ZERO, Chips(5), Chips::ZERO));
    assert!(matches!(new_game(cfg), Err(EngineError::InvalidConfig(_))));
}

#[test]
fn config_from_json() {
    let cfg = TableConfig::from_json(
        r#"{"starting_stacks":[1000,1000,500],"stakes":{"small_blind":5,"big_blind":10}}"#,
    )
    .unwrap();
    assert_eq!(cfg.seat_count(), 3);
    assert_eq!(cfg.stakes.ante, Chips::ZERO);
    assert_eq!(cfg.starting_stacks[2], Chips(500));

    assert!(matches!(
        TableConfig::from_json("{not json"),
        Err(EngineError::InvalidConfig(_))
    ));
    assert_eq!(
        TableConfig::from_json(r#"{"starting_stacks":[1000],"stakes":{"small_blind":5,"big_blind":10}}"#).err(),
        Some(EngineError::NotEnoughPlayers)
    );
}

//
// ---- порядок операций ----
//

#[test]
fn actions_outside_hand_are_rejected() {
    let mut g = new_game(TableConfig::uniform(3, Chips(100), stakes())).unwrap();
    assert_eq!(g.phase(), HandPhase::Idle);
    assert_eq!(g.current_actor(), None);

    assert_eq!(
        g.apply_action(PlayerAction::new(0, PlayerActionKind::Check)),
        Err(EngineError::NoActiveHand)
    );
    assert_eq!(g.advance_street(), Err(EngineError::NoActiveHand));
    assert_eq!(g.force_showdown().err(), Some(EngineError::NoActiveHand));
    assert_eq!(g.decision_context(0).err(), Some(EngineError::NoActiveHand));
}

#[test]
fn start_twice_is_rejected() {
    let mut g = new_game(TableConfig::uniform(3, Chips(100), stakes())).unwrap();
    g.start_hand().unwrap();
    assert_eq!(g.start_hand(), Err(EngineError::HandAlreadyInProgress));
}

#[test]
fn out_of_turn_and_early_advance_are_rejected() {
    let mut g = new_game(TableConfig::uniform(3, Chips(100), stakes())).unwrap();
    let actor = match g.start_hand().unwrap() {
        HandStatus::AwaitingAction(seat) => seat,
        other => panic!("unexpected status {other:?}"),
    };
    let not_actor = (actor + 1) % 3;

    assert_eq!(
        g.apply_action(PlayerAction::new(not_actor, PlayerActionKind::Call)),
        Err(EngineError::NotSeatsTurn(not_actor))
    );
    assert_eq!(g.advance_street(), Err(EngineError::BettingRoundIncomplete));
    assert_eq!(g.decision_context(9).err(), Some(EngineError::InvalidSeat(9)));
    assert_eq!(g.current_actor(), Some(actor));
}

#[test]
fn recoverable_errors_do_not_change_state() {
    let mut g = new_game(TableConfig::uniform(3, Chips(100), stakes())).unwrap();
    let actor = match g.start_hand().unwrap() {
        HandStatus::AwaitingAction(seat) => seat,
        other => panic!("unexpected status {other:?}"),
    };
    let seats_before = g.seats().to_vec();
    let pot_before = g.pot_size();
    let events_before = g.history().events.len();

    for kind in [
        PlayerActionKind::Check,
        PlayerActionKind::Commit(Chips(3)),
        PlayerActionKind::Commit(Chips(12)),
        PlayerActionKind::Commit(Chips(1000)),
    ] {
        let err = g.apply_action(PlayerAction::new(actor, kind)).unwrap_err();
        assert!(err.is_recoverable(), "{err:?} должна быть восстановимой");
    }

    assert_eq!(g.seats(), seats_before.as_slice());
    assert_eq!(g.pot_size(), pot_before);
    assert_eq!(g.history().events.len(), events_before);
    assert_eq!(g.current_actor(), Some(actor));
}

#[test]
fn error_messages_are_readable() {
    let err = EngineError::BetTooSmall {
        amount: Chips(3),
        minimum: Chips(10),
    };
    assert!(err.to_string().contains("10"));
    assert!(!EngineError::ChipConservation {
        expected: Chips(1),
        actual: Chips(2)
    }
    .is_recoverable());
}
