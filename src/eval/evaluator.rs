use std::collections::{BTreeMap, HashSet};

use crate::domain::card::{Card, Rank, Suit};

use super::hand_rank::{EvaluatedHand, HandCategory};
use super::lookup_tables::{best_straight_window, mask_from_ranks};
use super::EvalError;

/// Главная функция: вычислить лучшую 5-карточную руку из hole + board.
///
/// Обычно `hole.len() == 2`, `board.len()` от 3 до 5, но годится
/// любой набор от 5 карт.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<EvaluatedHand, EvalError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_cards(&all_cards)
}

/// Оценка произвольного набора из 5+ уникальных карт.
pub fn evaluate_cards(cards: &[Card]) -> Result<EvaluatedHand, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(*card) {
            return Err(EvalError::DuplicateCard(*card));
        }
    }

    let groups = RankGroups::new(cards);

    if let Some(sf) = best_straight_flush(cards) {
        return Ok(EvaluatedHand::new(HandCategory::StraightFlush, sf));
    }

    if let Some(quads) = groups.of_size(4).last() {
        let made = quads.to_vec();
        return Ok(with_kickers(HandCategory::FourOfAKind, made, cards));
    }

    if let Some(full_house) = groups.full_house() {
        return Ok(EvaluatedHand::new(HandCategory::FullHouse, full_house));
    }

    if let Some(flush) = best_flush(cards) {
        return Ok(EvaluatedHand::new(HandCategory::Flush, flush));
    }

    if let Some(straight) = find_straight(cards) {
        return Ok(EvaluatedHand::new(HandCategory::Straight, straight));
    }

    if let Some(trips) = groups.of_size(3).last() {
        let made = trips.to_vec();
        return Ok(with_kickers(HandCategory::ThreeOfAKind, made, cards));
    }

    let pairs = groups.of_size(2);
    match pairs.as_slice() {
        [.., low, high] => {
            let mut made = high.to_vec();
            made.extend_from_slice(low);
            Ok(with_kickers(HandCategory::TwoPair, made, cards))
        }
        [pair] => Ok(with_kickers(HandCategory::OnePair, pair.to_vec(), cards)),
        [] => Ok(with_kickers(HandCategory::HighCard, Vec::new(), cards)),
    }
}

/// Карты, сгруппированные по рангу (по возрастанию ранга).
struct RankGroups {
    by_rank: BTreeMap<Rank, Vec<Card>>,
}

impl RankGroups {
    fn new(cards: &[Card]) -> Self {
        let mut by_rank: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
        for card in cards {
            by_rank.entry(card.rank).or_default().push(*card);
        }
        Self { by_rank }
    }

    /// Группы ровно из `size` карт, по возрастанию ранга.
    fn of_size(&self, size: usize) -> Vec<&[Card]> {
        self.by_rank
            .values()
            .filter(|g| g.len() == size)
            .map(Vec::as_slice)
            .collect()
    }

    /// Фулл-хаус: лучший трипс + лучшая из (второй трипс как пара, лучшая пара).
    fn full_house(&self) -> Option<Vec<Card>> {
        let trips = self.of_size(3);
        let pairs = self.of_size(2);

        let (best_trip, lower_trips) = trips.split_last()?;
        let second_trip = lower_trips.last().map(|t| &t[..2]);
        let filler = match (second_trip, pairs.last().copied()) {
            (Some(t), Some(p)) => {
                if t[0].rank >= p[0].rank {
                    t
                } else {
                    p
                }
            }
            (Some(t), None) => t,
            (None, Some(p)) => p,
            (None, None) => return None,
        };

        let mut made = best_trip.to_vec();
        made.extend_from_slice(filler);
        Some(made)
    }
}

/// Дополнить руку кикерами до 5 карт: старшие из оставшихся по рангу.
/// Масть порядок не меняет – сортировка стабильная.
fn with_kickers(category: HandCategory, mut made: Vec<Card>, cards: &[Card]) -> EvaluatedHand {
    let mut rest: Vec<Card> = cards.iter().filter(|c| !made.contains(c)).copied().collect();
    rest.sort_by(|a, b| b.rank.cmp(&a.rank));
    let need = 5usize.saturating_sub(made.len());
    made.extend(rest.into_iter().take(need));
    EvaluatedHand::new(category, made)
}

/// Старший стрит среди уникальных рангов; карты от старшей к младшей.
fn find_straight(cards: &[Card]) -> Option<Vec<Card>> {
    let mask = mask_from_ranks(cards.iter().map(|c| c.rank));
    let window = best_straight_window(mask)?;
    window
        .iter()
        .map(|r| cards.iter().find(|c| c.rank == *r).copied())
        .collect()
}

/// Масти, в которых набралось 5+ карт (порядок D, H, C, S).
fn flush_suits(cards: &[Card]) -> Vec<Vec<Card>> {
    Suit::ALL
        .iter()
        .map(|suit| cards.iter().filter(|c| c.suit == *suit).copied().collect::<Vec<_>>())
        .filter(|suited| suited.len() >= 5)
        .collect()
}

/// Лучший флеш: старшие 5 карт масти. Если мастей несколько – сильнейший
/// по рангам, при полном равенстве – первая масть.
fn best_flush(cards: &[Card]) -> Option<Vec<Card>> {
    flush_suits(cards)
        .into_iter()
        .map(|mut suited| {
            suited.sort_by(|a, b| b.rank.cmp(&a.rank));
            suited.truncate(5);
            suited
        })
        .reduce(|best, next| if ranks_of(&next) > ranks_of(&best) { next } else { best })
}

/// Стрит-флеш: алгоритм стрита только по картам флеш-масти.
fn best_straight_flush(cards: &[Card]) -> Option<Vec<Card>> {
    flush_suits(cards)
        .iter()
        .filter_map(|suited| find_straight(suited))
        .reduce(|best, next| if ranks_of(&next) > ranks_of(&best) { next } else { best })
}

fn ranks_of(cards: &[Card]) -> Vec<Rank> {
    cards.iter().map(|c| c.rank).collect()
}
