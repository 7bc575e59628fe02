use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, SeatIndex, Street};

/// Тип действия места.
///
/// Внешний decision-коллбек по сути возвращает пару (amount, is_all_in):
/// `Commit(amount)` – обычная ставка, `AllIn` – весь стек.
/// `Check`/`Call` – сокращения для `Commit(0)` и `Commit(to_call)`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    /// Уравнять. Если стека не хватает – колл в all-in.
    Call,
    /// Добавить в банк ровно столько фишек (сверх уже поставленного на улице).
    Commit(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

/// Конкретное действие места.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// В каком месте сидит действующий.
    pub seat: SeatIndex,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(seat: SeatIndex, kind: PlayerActionKind) -> Self {
        Self { seat, kind }
    }
}

/// Что видит место, когда его спрашивают о ходе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionContext {
    pub seat: SeatIndex,
    pub street: Street,
    /// Все фишки в банке, включая ставки текущей улицы.
    pub pot: Chips,
    pub community_cards: Vec<Card>,
    pub hole_cards: Vec<Card>,
    /// Сколько нужно доставить, чтобы уравнять.
    pub min_call: Chips,
    /// Минимальный шаг рейза сверх колла.
    pub min_raise: Chips,
    /// Потолок ставки (no-limit: весь стек).
    pub max_raise: Chips,
}

/// Внешний источник решений (бот, UI, скрипт в тестах).
///
/// Вызывается синхронно и должен вернуть ответ до того, как движок пойдёт дальше.
pub trait DecisionSource {
    fn decide(&mut self, ctx: &DecisionContext) -> PlayerActionKind;
}
