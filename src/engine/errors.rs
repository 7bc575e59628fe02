use crate::domain::{Chips, SeatIndex};
use crate::eval::EvalError;

use thiserror::Error;

/// Ошибки движка покера.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Некорректный конфиг: {0}")]
    InvalidConfig(String),

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Раздача прервана из-за нарушения инварианта, продолжение невозможно")]
    HandAborted,

    #[error("Сейчас не ход места {0}")]
    NotSeatsTurn(SeatIndex),

    #[error("Недопустимое действие в текущем состоянии раздачи")]
    IllegalAction,

    #[error("Ставка {amount} слишком мала, минимум {minimum}")]
    BetTooSmall { amount: Chips, minimum: Chips },

    #[error("Ставка {amount} больше стека {holdings}")]
    BetTooLarge { amount: Chips, holdings: Chips },

    #[error("Невозможно выполнить check – нужно доставить {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("Раунд ставок ещё не завершён")]
    BettingRoundIncomplete,

    #[error("В колоде закончились карты")]
    DeckExhausted,

    #[error("Нарушен баланс фишек: ожидалось {expected}, в банках {actual}")]
    ChipConservation { expected: Chips, actual: Chips },

    #[error("Ошибка оценки руки: {0}")]
    Eval(#[from] EvalError),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Ошибка ввода, после которой можно переспросить то же место:
    /// состояние движка не изменилось.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::BetTooSmall { .. }
                | EngineError::BetTooLarge { .. }
                | EngineError::CannotCheck { .. }
                | EngineError::IllegalAction
                | EngineError::NotSeatsTurn(_)
        )
    }
}
