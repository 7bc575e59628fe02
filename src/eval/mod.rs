//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate_best_hand(hole, board) -> Result<EvaluatedHand, EvalError>`
//!
//! Карты группируются по рангу и масти, дальше категории проверяются
//! строго по старшинству (стрит-флеш, каре, фулл-хаус, ...), первая
//! найденная побеждает.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

use thiserror::Error;

use crate::domain::card::Card;

pub use evaluator::{evaluate_best_hand, evaluate_cards};
pub use hand_rank::{EvaluatedHand, HandCategory};

/// Ошибки оценки руки (только на некорректном входе).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Для оценки нужно минимум 5 карт, получено {0}")]
    NotEnoughCards(usize),

    #[error("Карта {0} встречается дважды")]
    DuplicateCard(Card),
}
