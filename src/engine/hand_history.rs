use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::PlayerActionKind;
use crate::eval::HandCategory;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_id: HandId, button: SeatIndex },

    /// Анте (с каждого живого места).
    AntesPosted { antes: Vec<(SeatIndex, Chips)> },

    /// Блайнды.
    BlindsPosted {
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    /// Место получило карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Действие места.
    PlayerActed {
        seat: SeatIndex,
        action: PlayerActionKind,
        added: Chips,
        new_holdings: Chips,
        pot_after: Chips,
    },

    /// Ставки улицы свернуты в банки.
    StreetCollected { street: Street, collected: Chips, pots_total: Chips },

    /// Открыты общие карты на борде.
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        hole_cards: Vec<Card>,
        category: HandCategory,
        score: u32,
    },

    /// Выплата из банка.
    PotAwarded { pot_index: usize, seat: SeatIndex, amount: Chips },

    /// Раздача завершена.
    HandFinished { hand_id: HandId },

    /// Раздача прервана: нарушен баланс фишек.
    HandAborted { hand_id: HandId, reason: String },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    /// Экспорт истории в JSON (для реплея/отладки).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
