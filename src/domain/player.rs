use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Статус места в контексте раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Место активно в текущей раздаче и может ставить.
    Active,
    /// Сфолдил и больше не претендует на банк.
    Folded,
    /// Поставил весь стек – больше не ходит, но в раздаче.
    AllIn,
    /// Вылетел (нулевой стек после раздачи).
    Busted,
}

/// Состояние места за столом: стек, ставка на улице, статус, карманные карты.
///
/// Меняется только действиями самого места (bet/ante/fold) и выплатой на шоудауне.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatState {
    pub seat: SeatIndex,
    /// Текущий стек (не включает фишки, уже лежащие в банке).
    pub holdings: Chips,
    /// Сколько поставлено на текущей улице.
    pub committed: Chips,
    pub status: PlayerStatus,
    pub hole_cards: Vec<Card>,
}

impl SeatState {
    pub fn new(seat: SeatIndex, holdings: Chips) -> Self {
        let status = if holdings.is_zero() {
            PlayerStatus::Busted
        } else {
            PlayerStatus::Active
        };
        Self {
            seat,
            holdings,
            committed: Chips::ZERO,
            status,
            hole_cards: Vec::new(),
        }
    }

    /// Не сфолдил и не вылетел.
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ещё делать ставки.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    pub fn is_alive(&self) -> bool {
        self.status != PlayerStatus::Busted
    }

    /// Снять со стека не более `amount` (анте). Возвращает реально снятое.
    pub fn pay(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.holdings);
        self.holdings -= real;
        if self.holdings.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        real
    }

    /// Поставить на текущей улице (блайнд, колл, рейз).
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = self.pay(amount);
        self.committed += real;
        real
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    /// Подготовить место к новой раздаче.
    pub fn prepare_for_hand(&mut self) {
        self.committed = Chips::ZERO;
        self.hole_cards.clear();
        if self.is_alive() {
            self.status = PlayerStatus::Active;
        }
    }

    /// Зачислить выигрыш по итогам раздачи и обновить статус.
    pub fn settle(&mut self, earnings: Chips) {
        self.holdings += earnings;
        self.committed = Chips::ZERO;
        if self.holdings.is_zero() {
            self.status = PlayerStatus::Busted;
        }
    }
}
