//! Тесты валидации действий и раунда ставок.
//!
//! - check / call / commit / all-in и их ограничения;
//! - полный рейз поднимает шаг, короткий all-in – нет;
//! - любое повышение максимума снова открывает действие остальным;
//! - хедз-ап: кнопка ставит SB и ходит первой на префлопе.

use holdem_engine::domain::{Chips, PlayerStatus, SeatIndex, SeatState, Street, TableConfig, TableStakes};
use holdem_engine::engine::betting::BettingRound;
use holdem_engine::engine::validation::{validate_action, ValidatedAction};
use holdem_engine::engine::{EngineError, GameState, HandStatus, PlayerAction, PlayerActionKind};
use holdem_engine::infra::DeterministicRng;

fn seats(stacks: &[u64]) -> Vec<SeatState> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, s)| SeatState::new(i as SeatIndex, Chips(*s)))
        .collect()
}

fn game(players: usize, stack: u64, seed: u64) -> GameState<DeterministicRng> {
    let cfg = TableConfig::uniform(players, Chips(stack), TableStakes::new(Chips(1), Chips(2), Chips::ZERO));
    GameState::new(cfg, DeterministicRng::from_seed(seed)).unwrap()
}

fn act(game: &mut GameState<DeterministicRng>, seat: SeatIndex, kind: PlayerActionKind) -> HandStatus {
    game.apply_action(PlayerAction::new(seat, kind)).unwrap()
}

//
// ---- validate_action ----
//

#[test]
fn check_only_when_nothing_to_call() {
    let table = seats(&[100, 100]);
    let mut round = BettingRound::postflop(Street::Flop, &table, 1, Chips(2));

    assert_eq!(
        validate_action(&table[0], &PlayerActionKind::Check, &round),
        Ok(ValidatedAction::Commit {
            amount: Chips::ZERO,
            all_in: false
        })
    );

    round.current_bet = Chips(10);
    assert_eq!(
        validate_action(&table[0], &PlayerActionKind::Check, &round),
        Err(EngineError::CannotCheck { to_call: Chips(10) })
    );
    // Commit(0) – то же самое, что check
    assert_eq!(
        validate_action(&table[0], &PlayerActionKind::Commit(Chips::ZERO), &round),
        Err(EngineError::CannotCheck { to_call: Chips(10) })
    );
}

#[test]
fn commit_limits() {
    let table = seats(&[100, 100]);
    let mut round = BettingRound::postflop(Street::Flop, &table, 1, Chips(2));
    round.current_bet = Chips(10);
    round.min_raise = Chips(10);

    // больше стека
    assert_eq!(
        validate_action(&table[0], &PlayerActionKind::Commit(Chips(101)), &round),
        Err(EngineError::BetTooLarge {
            amount: Chips(101),
            holdings: Chips(100)
        })
    );
    // меньше колла
    assert_eq!(
        validate_action(&table[0], &PlayerActionKind::Commit(Chips(5)), &round),
        Err(EngineError::BetTooSmall {
            amount: Chips(5),
            minimum: Chips(10)
        })
    );
    // рейз меньше минимального: нужно 10 + 10
    assert_eq!(
        validate_action(&table[0], &PlayerActionKind::Commit(Chips(15)), &round),
        Err(EngineError::BetTooSmall {
            amount: Chips(15),
            minimum: Chips(20)
        })
    );
    assert!(validate_action(&table[0], &PlayerActionKind::Commit(Chips(10)), &round).is_ok());
    assert!(validate_action(&table[0], &PlayerActionKind::Commit(Chips(20)), &round).is_ok());
}

/// Весь стек можно поставить всегда, даже если это меньше колла.
#[test]
fn all_in_is_always_legal() {
    let table = seats(&[7, 100]);
    let mut round = BettingRound::postflop(Street::Flop, &table, 1, Chips(2));
    round.current_bet = Chips(50);

    let expected = Ok(ValidatedAction::Commit {
        amount: Chips(7),
        all_in: true,
    });
    assert_eq!(validate_action(&table[0], &PlayerActionKind::Commit(Chips(7)), &round), expected);
    assert_eq!(validate_action(&table[0], &PlayerActionKind::AllIn, &round), expected);
    assert_eq!(validate_action(&table[0], &PlayerActionKind::Call, &round), expected);
}

#[test]
fn folded_seat_cannot_act() {
    let mut table = seats(&[100, 100]);
    table[0].fold();
    let round = BettingRound::postflop(Street::Flop, &table, 1, Chips(2));
    assert_eq!(
        validate_action(&table[0], &PlayerActionKind::Call, &round),
        Err(EngineError::IllegalAction)
    );
}

//
// ---- BettingRound::apply ----
//

#[test]
fn full_raise_sets_min_raise_and_reopens_action() {
    let mut table = seats(&[100, 100, 100]);
    // кнопка на 2 → порядок 0, 1, 2
    let mut round = BettingRound::postflop(Street::Flop, &table, 2, Chips(2));
    assert_eq!(round.next_actor(&table), Some(0));

    round.apply(&mut table, 0, &PlayerActionKind::Commit(Chips(10))).unwrap();
    assert_eq!(round.current_bet, Chips(10));
    assert_eq!(round.min_raise, Chips(10));
    assert_eq!(round.to_act, vec![1, 2]);

    round.apply(&mut table, 1, &PlayerActionKind::Call).unwrap();
    let applied = round.apply(&mut table, 2, &PlayerActionKind::Commit(Chips(30))).unwrap();
    assert!(applied.raised);
    assert_eq!(round.current_bet, Chips(30));
    assert_eq!(round.min_raise, Chips(20));
    assert_eq!(round.last_aggressor, Some(2));
    assert_eq!(round.to_act, vec![0, 1]);
    assert!(!round.is_round_complete(&table));
}

/// Короткий all-in сверху: шаг рейза не меняется,
/// но остальные всё равно должны ответить.
#[test]
fn short_all_in_reopens_without_raising_min_raise() {
    let mut table = seats(&[100, 100, 15]);
    let mut round = BettingRound::postflop(Street::Turn, &table, 2, Chips(2));

    round.apply(&mut table, 0, &PlayerActionKind::Commit(Chips(10))).unwrap();
    round.apply(&mut table, 1, &PlayerActionKind::Call).unwrap();
    let applied = round.apply(&mut table, 2, &PlayerActionKind::AllIn).unwrap();

    assert!(applied.all_in);
    assert_eq!(table[2].status, PlayerStatus::AllIn);
    assert_eq!(round.current_bet, Chips(15));
    assert_eq!(round.min_raise, Chips(10));
    assert_eq!(round.to_act, vec![0, 1]);
    assert_eq!(round.next_actor(&table), Some(0));

    // рейз-до теперь минимум 15 + 10 = 25, т.е. добавить 15
    assert_eq!(
        round.apply(&mut table, 0, &PlayerActionKind::Commit(Chips(10))),
        Err(EngineError::BetTooSmall {
            amount: Chips(10),
            minimum: Chips(15)
        })
    );
    round.apply(&mut table, 0, &PlayerActionKind::Call).unwrap();
    round.apply(&mut table, 1, &PlayerActionKind::Call).unwrap();
    assert!(round.is_round_complete(&table));
}

#[test]
fn rejected_action_leaves_round_untouched() {
    let mut table = seats(&[100, 100]);
    let mut round = BettingRound::postflop(Street::Flop, &table, 1, Chips(2));
    round.apply(&mut table, 0, &PlayerActionKind::Commit(Chips(10))).unwrap();

    let before_round = round.clone();
    let before_seats = table.clone();
    assert!(round.apply(&mut table, 1, &PlayerActionKind::Check).is_err());
    assert_eq!(round, before_round);
    assert_eq!(table, before_seats);
}

//
// ---- через GameState ----
//

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let mut g = game(2, 100, 7);
    let button = g.button();
    let other = 1 - button;

    let status = g.start_hand().unwrap();
    assert_eq!(status, HandStatus::AwaitingAction(button));
    assert_eq!(g.seats()[button as usize].committed, Chips(1));
    assert_eq!(g.seats()[other as usize].committed, Chips(2));

    // SB доставляет, BB может проверить
    act(&mut g, button, PlayerActionKind::Call);
    assert_eq!(g.current_actor(), Some(other));
    let status = act(&mut g, other, PlayerActionKind::Check);
    assert_eq!(status, HandStatus::StreetComplete(Street::Preflop));

    // постфлоп первым ходит не-кнопка
    let status = g.advance_street().unwrap();
    assert_eq!(status, HandStatus::AwaitingAction(other));
    assert_eq!(g.board().len(), 3);
}

/// 3 места: UTG = кнопка. Рейз BB после лимпов снова открывает действие.
#[test]
fn big_blind_raise_reopens_action_preflop() {
    let mut g = game(3, 200, 11);
    let b = g.button();
    let sb = (b + 1) % 3;
    let bb = (b + 2) % 3;

    assert_eq!(g.start_hand().unwrap(), HandStatus::AwaitingAction(b));
    act(&mut g, b, PlayerActionKind::Call);
    act(&mut g, sb, PlayerActionKind::Call);
    assert_eq!(g.current_actor(), Some(bb));

    let status = act(&mut g, bb, PlayerActionKind::Commit(Chips(4)));
    assert_eq!(status, HandStatus::AwaitingAction(b));
    assert_eq!(g.betting().current_bet, Chips(6));
    assert_eq!(g.betting().min_raise, Chips(4));

    // недостаточный рейз: нужно добавить минимум 4 + 4
    let holdings = g.seats()[b as usize].holdings;
    let err = g
        .apply_action(PlayerAction::new(b, PlayerActionKind::Commit(Chips(5))))
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::BetTooSmall {
            amount: Chips(5),
            minimum: Chips(8)
        }
    );
    assert!(err.is_recoverable());
    assert_eq!(g.current_actor(), Some(b));
    assert_eq!(g.seats()[b as usize].holdings, holdings);

    act(&mut g, b, PlayerActionKind::Call);
    let status = act(&mut g, sb, PlayerActionKind::Call);
    assert_eq!(status, HandStatus::StreetComplete(Street::Preflop));
    assert_eq!(g.pot_size(), Chips(18));
}

#[test]
fn decision_context_reports_call_and_raise_bounds() {
    let mut g = game(3, 200, 3);
    let b = g.button();
    g.start_hand().unwrap();

    let ctx = g.decision_context(b).unwrap();
    assert_eq!(ctx.street, Street::Preflop);
    assert_eq!(ctx.min_call, Chips(2));
    assert_eq!(ctx.min_raise, Chips(2));
    assert_eq!(ctx.max_raise, Chips(200));
    assert_eq!(ctx.pot, Chips(3));
    assert_eq!(ctx.hole_cards.len(), 2);
    assert!(ctx.community_cards.is_empty());
}
