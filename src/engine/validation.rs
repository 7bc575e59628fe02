use crate::domain::chips::Chips;
use crate::domain::player::SeatState;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingRound;
use crate::engine::errors::EngineError;

/// Действие после проверки: сколько фишек реально уходит со стека.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Commit { amount: Chips, all_in: bool },
}

/// Проверка, может ли место выполнить это действие при текущем состоянии ставок.
///
/// Ничего не меняет: при ошибке место можно переспросить.
pub fn validate_action(
    player: &SeatState,
    action: &PlayerActionKind,
    betting: &BettingRound,
) -> Result<ValidatedAction, EngineError> {
    if !player.is_active() {
        return Err(EngineError::IllegalAction);
    }

    let holdings = player.holdings;
    let to_call = diff_to_call(player, betting);

    match *action {
        PlayerActionKind::Fold => Ok(ValidatedAction::Fold),

        PlayerActionKind::Check => check(to_call),

        PlayerActionKind::Call => {
            if to_call.is_zero() {
                check(to_call)
            } else if holdings <= to_call {
                // Колл на остаток стека – это all-in.
                Ok(all_in(holdings))
            } else {
                Ok(ValidatedAction::Commit {
                    amount: to_call,
                    all_in: false,
                })
            }
        }

        PlayerActionKind::AllIn => Ok(all_in(holdings)),

        PlayerActionKind::Commit(amount) => {
            if amount > holdings {
                return Err(EngineError::BetTooLarge { amount, holdings });
            }
            // Весь стек – всегда можно, минимумы не действуют.
            if amount == holdings {
                return Ok(all_in(holdings));
            }
            if amount.is_zero() {
                return check(to_call);
            }
            if amount < to_call {
                return Err(EngineError::BetTooSmall {
                    amount,
                    minimum: to_call,
                });
            }
            let min_raise_to = to_call + betting.min_raise;
            if amount > to_call && amount < min_raise_to {
                return Err(EngineError::BetTooSmall {
                    amount,
                    minimum: min_raise_to,
                });
            }
            Ok(ValidatedAction::Commit {
                amount,
                all_in: false,
            })
        }
    }
}

/// Сколько фишек нужно добавить месту, чтобы уравнять текущую ставку.
pub fn diff_to_call(player: &SeatState, betting: &BettingRound) -> Chips {
    betting.current_bet.saturating_sub(player.committed)
}

fn check(to_call: Chips) -> Result<ValidatedAction, EngineError> {
    if to_call.is_zero() {
        Ok(ValidatedAction::Commit {
            amount: Chips::ZERO,
            all_in: false,
        })
    } else {
        Err(EngineError::CannotCheck { to_call })
    }
}

fn all_in(holdings: Chips) -> ValidatedAction {
    ValidatedAction::Commit {
        amount: holdings,
        all_in: true,
    }
}
