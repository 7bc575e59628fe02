use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, SeatIndex};
use crate::engine::side_pots::SidePot;
use crate::eval::EvaluatedHand;

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица и сколько карт борда на ней открывается.
    pub fn next(self) -> Option<(Street, usize)> {
        match self {
            Street::Preflop => Some((Street::Flop, 3)),
            Street::Flop => Some((Street::Turn, 1)),
            Street::Turn => Some((Street::River, 1)),
            Street::River | Street::Showdown => None,
        }
    }
}

/// Результат конкретного места в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatResult {
    pub seat: SeatIndex,
    /// Лучшая рука на шоудауне. None – банк забран без вскрытия.
    pub hand: Option<EvaluatedHand>,
    /// Сколько фишек место получило из банков.
    pub payout: Chips,
}

/// Краткое описание завершённой раздачи. Удобно для истории/реплеера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    /// Итоговая раскладка банков (main + side pots).
    pub pots: Vec<SidePot>,
    pub total_pot: Chips,
    /// По одной записи на каждое место, дошедшее до конца раздачи.
    pub results: Vec<SeatResult>,
}

impl HandSummary {
    pub fn payout_of(&self, seat: SeatIndex) -> Chips {
        self.results
            .iter()
            .filter(|r| r.seat == seat)
            .map(|r| r.payout)
            .sum()
    }

    pub fn total_paid(&self) -> Chips {
        self.results.iter().map(|r| r.payout).sum()
    }
}
