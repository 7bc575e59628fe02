use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::SeatIndex;

/// Колода карт. В домене — просто упорядоченный список карт.
/// Перемешивание делает engine (через RandomSource из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Diamonds 2..A, Hearts 2..A, Clubs 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Сжечь одну карту и открыть `n` следующих (флоп/тёрн/ривер).
    ///
    /// None, если в колоде не хватает карт — колода при этом не трогается.
    pub fn burn_and_draw(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.cards.len() < n + 1 {
            return None;
        }
        self.cards.pop();
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            taken.push(self.cards.pop()?);
        }
        Some(taken)
    }

    /// Раздать по 2 карты каждому месту из `order`: сначала по одной
    /// карте всем по кругу, затем вторую.
    ///
    /// Результат в том же порядке, что и `order`.
    pub fn deal_hole_cards(&mut self, order: &[SeatIndex]) -> Option<Vec<[Card; 2]>> {
        if self.cards.len() < order.len() * 2 {
            return None;
        }
        let first: Vec<Card> = order.iter().filter_map(|_| self.cards.pop()).collect();
        let second: Vec<Card> = order.iter().filter_map(|_| self.cards.pop()).collect();
        Some(first.into_iter().zip(second).map(|(a, b)| [a, b]).collect())
    }
}
