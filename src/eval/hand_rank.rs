use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Человеческое описание категории.
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
        }
    }
}

/// Оценённая рука: категория + до 5 карт tie-break'а (от старшей к младшей).
///
/// Сравнение: сначала категория, затем лексикографически ранги карт.
/// Масти в сравнении не участвуют, поэтому равенство = сплит.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub category: HandCategory,
    pub cards: Vec<Card>,
}

impl EvaluatedHand {
    pub fn new(category: HandCategory, cards: Vec<Card>) -> Self {
        Self { category, cards }
    }

    /// Ранги tie-break карт в порядке сравнения.
    pub fn ranks(&self) -> Vec<Rank> {
        self.cards.iter().map(|c| c.rank).collect()
    }

    /// Упакованная сила руки (u32), монотонная относительно `Ord`.
    ///
    /// Схема кодирования:
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Недостающие слоты заполняются нулями.
    pub fn score(&self) -> u32 {
        let mut value = (self.category as u32) & 0x0F;
        for i in 0..5 {
            let nibble = self.cards.get(i).map_or(0, |c| c.rank.value() as u32);
            value = (value << 4) | (nibble & 0x0F);
        }
        value
    }

    pub fn describe(&self) -> String {
        let cards: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        format!("{} [{}]", self.category.name(), cards.join(" "))
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| {
            self.cards
                .iter()
                .map(|c| c.rank)
                .cmp(other.cards.iter().map(|c| c.rank))
        })
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EvaluatedHand {}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
